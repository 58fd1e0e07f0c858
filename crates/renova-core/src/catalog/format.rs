/// Group digits in threes with `.` (Indonesian locale)
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// `275000000` -> `Rp 275.000.000`
pub fn format_rupiah(price: u64) -> String {
    format!("Rp {}", group_thousands(price))
}

/// `15000` -> `15.000 km`
pub fn format_mileage(km: u64) -> String {
    format!("{} km", group_thousands(km))
}

/// Parse a price typed with or without grouping dots (`Rp 275.000.000`)
///
/// Returns `None` for input with anything other than digits once the
/// prefix, dots and spaces are removed.
pub fn parse_rupiah(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("Rp")
        .or_else(|| trimmed.strip_prefix("rp"))
        .unwrap_or(trimmed);
    let digits: String = body.chars().filter(|c| *c != '.' && *c != ' ').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_examples() {
        assert_eq!(format_rupiah(275_000_000), "Rp 275.000.000");
        assert_eq!(format_mileage(15_000), "15.000 km");
        assert_eq!(format_mileage(0), "0 km");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1.000");
    }

    #[test]
    fn test_parse_rupiah() {
        assert_eq!(parse_rupiah("Rp 275.000.000"), Some(275_000_000));
        assert_eq!(parse_rupiah("260000000"), Some(260_000_000));
        assert_eq!(parse_rupiah("12,5"), None);
        assert_eq!(parse_rupiah(""), None);
    }
}
