#![allow(clippy::unwrap_used, clippy::expect_used)]

use renova_store::migrations::{applied_migrations, apply_migrations, get_migrations};
use rusqlite::Connection;

#[test]
fn test_migrations_apply_in_order_and_are_idempotent() {
    let mut conn = Connection::open_in_memory().unwrap();

    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();

    let applied = applied_migrations(&conn).unwrap();
    let expected: Vec<String> = get_migrations().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(applied, expected);
}

#[test]
fn test_schema_contains_collection_tables() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();

    for table in ["cars", "news", "testimonials", "inbox", "users", "about", "images", "session", "seed_log"] {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1, "missing table {}", table);
    }
}
