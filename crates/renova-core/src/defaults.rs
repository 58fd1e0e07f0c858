//! Default showroom dataset
//!
//! Seeds a fresh local store and backs the read fallback when the selected
//! backend cannot be reached.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{
    AboutData, Car, CarCondition, InboxMessage, MessageKind, NewsPost, Testimonial, User,
    UserRole,
};

/// Email promoted to ADMIN on sign-in unless configured otherwise
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@renova.com";

/// 2024-05-16T00:00:00Z
const SEED_EPOCH_SECS: i64 = 1_715_817_600;

/// Creation time of the n-th seed car; earlier entries are newer
fn seeded_at(position: i64) -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(SEED_EPOCH_SECS - position * 3600)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn cars() -> Vec<Car> {
    vec![
        Car {
            id: "1".to_string(),
            name: "Avanza 1.5 G CVT".to_string(),
            brand: "Toyota".to_string(),
            price: 275_000_000,
            year: 2023,
            engine: "1.5L Dual VVT-i".to_string(),
            transmission: "CVT".to_string(),
            image: "https://images.unsplash.com/photo-1626322969986-e9d6efc25227?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "MPV sejuta umat dengan tampilan baru yang lebih modern. Penggerak roda depan (FWD) membuat kabin lebih luas dan konsumsi BBM lebih irit. Cocok untuk keluarga.".to_string(),
            is_featured: true,
            mileage: 15_000,
            fuel_type: "Bensin".to_string(),
            body_type: "MPV".to_string(),
            color: "Purplish Silver".to_string(),
            interior_color: "Hitam / Coklat".to_string(),
            tax_date: "Mei 2025".to_string(),
            previous_owners: 1,
            service_history: "Lengkap (Auto2000)".to_string(),
            condition: CarCondition::Bekas,
            location: "Jakarta Selatan".to_string(),
            seats: 7,
            plate_number: "B 2910 TZU (Genap)".to_string(),
            gallery: vec![
                "https://images.unsplash.com/photo-1626322969986-e9d6efc25227?auto=format&fit=crop&q=80&w=1200".to_string(),
                "https://images.unsplash.com/photo-1549317661-bd32c8ce0db2?auto=format&fit=crop&q=80&w=1200".to_string(),
                "https://images.unsplash.com/photo-1590362891991-f776e747a588?auto=format&fit=crop&q=80&w=1200".to_string(),
            ],
            created_at: seeded_at(0),
        },
        Car {
            id: "2".to_string(),
            name: "Brio RS Urbanite".to_string(),
            brand: "Honda".to_string(),
            price: 240_000_000,
            year: 2023,
            engine: "1.2L i-VTEC".to_string(),
            transmission: "CVT".to_string(),
            image: "https://images.unsplash.com/photo-1616422285623-13ff0162193c?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "City car terlaris di Indonesia. Lincah, irit, dan sporty. Varian RS Urbanite dengan bodykit agresif, cocok untuk anak muda atau mobilitas harian di Jakarta.".to_string(),
            is_featured: true,
            mileage: 8_000,
            fuel_type: "Bensin".to_string(),
            body_type: "Hatchback".to_string(),
            color: "Phoenix Orange Pearl".to_string(),
            interior_color: "Hitam dengan Aksen Oranye".to_string(),
            tax_date: "Agustus 2024".to_string(),
            previous_owners: 1,
            service_history: "Lengkap".to_string(),
            condition: CarCondition::Bekas,
            location: "Jakarta Barat".to_string(),
            seats: 5,
            plate_number: "B 1123 UKL (Ganjil)".to_string(),
            gallery: vec![
                "https://images.unsplash.com/photo-1616422285623-13ff0162193c?auto=format&fit=crop&q=80&w=1200".to_string(),
                "https://images.unsplash.com/photo-1533473359331-0135ef1bcfb0?auto=format&fit=crop&q=80&w=1200".to_string(),
            ],
            created_at: seeded_at(1),
        },
        Car {
            id: "3".to_string(),
            name: "Xpander Ultimate".to_string(),
            brand: "Mitsubishi".to_string(),
            price: 295_000_000,
            year: 2022,
            engine: "1.5L MIVEC".to_string(),
            transmission: "CVT".to_string(),
            image: "https://images.unsplash.com/photo-1625055082126-78b7b209c25f?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "MPV dengan suspensi paling nyaman di kelasnya. Desain Dynamic Shield yang gagah dan interior mewah dengan soft touch. AC double blower sangat dingin.".to_string(),
            is_featured: true,
            mileage: 25_000,
            fuel_type: "Bensin".to_string(),
            body_type: "MPV".to_string(),
            color: "Quartz White Pearl".to_string(),
            interior_color: "Beige".to_string(),
            tax_date: "Januari 2025".to_string(),
            previous_owners: 1,
            service_history: "Lengkap (Mitsubishi Lautan)".to_string(),
            condition: CarCondition::Bekas,
            location: "Tangerang".to_string(),
            seats: 7,
            plate_number: "B 8899 EXP (Ganjil)".to_string(),
            gallery: Vec::new(),
            created_at: seeded_at(2),
        },
        Car {
            id: "4".to_string(),
            name: "Kijang Innova Reborn 2.4 V".to_string(),
            brand: "Toyota".to_string(),
            price: 415_000_000,
            year: 2021,
            engine: "2.4L Diesel Turbo".to_string(),
            transmission: "Otomatis".to_string(),
            image: "https://images.unsplash.com/photo-1590362891991-f776e747a588?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "Mobil keluarga paling tangguh dan dicari. Mesin diesel 2GD yang bertenaga dan badak. Kabin hening, fitur lengkap, captain seat opsional. Favorit travel.".to_string(),
            is_featured: false,
            mileage: 45_000,
            fuel_type: "Diesel".to_string(),
            body_type: "MPV".to_string(),
            color: "Attitude Black".to_string(),
            interior_color: "Hitam Kayu".to_string(),
            tax_date: "Desember 2024".to_string(),
            previous_owners: 1,
            service_history: "Rutin Auto2000".to_string(),
            condition: CarCondition::Bekas,
            location: "Jakarta Selatan".to_string(),
            seats: 7,
            plate_number: "B 1998 KJG (Genap)".to_string(),
            gallery: Vec::new(),
            created_at: seeded_at(3),
        },
        Car {
            id: "5".to_string(),
            name: "HR-V SE CVT".to_string(),
            brand: "Honda".to_string(),
            price: 385_000_000,
            year: 2023,
            engine: "1.5L DOHC i-VTEC".to_string(),
            transmission: "CVT".to_string(),
            image: "https://images.unsplash.com/photo-1519641471654-76ce0107ad1b?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "Compact SUV yang stylish dengan fitur Honda Sensing lengkap. Panoramic glass roof memberikan kesan mewah dan luas. Sangat populer di kalangan eksekutif muda.".to_string(),
            is_featured: false,
            mileage: 12_000,
            fuel_type: "Bensin".to_string(),
            body_type: "SUV".to_string(),
            color: "Sand Khaki Pearl".to_string(),
            interior_color: "Hitam Kulit".to_string(),
            tax_date: "Maret 2025".to_string(),
            previous_owners: 1,
            service_history: "Lengkap".to_string(),
            condition: CarCondition::Bekas,
            location: "Bekasi".to_string(),
            seats: 5,
            plate_number: "B 2233 HRV (Ganjil)".to_string(),
            gallery: Vec::new(),
            created_at: seeded_at(4),
        },
        Car {
            id: "6".to_string(),
            name: "Sigra 1.2 R DLX".to_string(),
            brand: "Daihatsu".to_string(),
            price: 165_000_000,
            year: 2024,
            engine: "1.2L Dual VVT-i".to_string(),
            transmission: "Otomatis".to_string(),
            image: "https://images.unsplash.com/photo-1549317661-bd32c8ce0db2?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "LCGC 7-seater paling ekonomis. Solusi tepat untuk taksi online atau keluarga muda. Perawatan murah, sparepart melimpah, dan sangat irit BBM.".to_string(),
            is_featured: false,
            mileage: 5_000,
            fuel_type: "Bensin".to_string(),
            body_type: "MPV".to_string(),
            color: "Orange Metallic".to_string(),
            interior_color: "Hitam / Abu".to_string(),
            tax_date: "Juni 2025".to_string(),
            previous_owners: 1,
            service_history: "Lengkap".to_string(),
            condition: CarCondition::Bekas,
            location: "Depok".to_string(),
            seats: 7,
            plate_number: "B 4567 SGR (Ganjil)".to_string(),
            gallery: Vec::new(),
            created_at: seeded_at(5),
        },
        Car {
            id: "7".to_string(),
            name: "Ertiga Hybrid GX".to_string(),
            brand: "Suzuki".to_string(),
            price: 260_000_000,
            year: 2023,
            engine: "1.5L Smart Hybrid".to_string(),
            transmission: "Otomatis".to_string(),
            image: "https://images.unsplash.com/photo-1658428236750-68195449089f?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "LMPV Hybrid pertama di kelasnya. Teknologi Smart Hybrid membuat konsumsi bahan bakar lebih efisien dan start-stop halus. Fitur Cruise Control tersedia.".to_string(),
            is_featured: false,
            mileage: 18_000,
            fuel_type: "Hybrid".to_string(),
            body_type: "MPV".to_string(),
            color: "Magma Grey".to_string(),
            interior_color: "Hitam Wood Panel".to_string(),
            tax_date: "Oktober 2024".to_string(),
            previous_owners: 1,
            service_history: "Lengkap".to_string(),
            condition: CarCondition::Bekas,
            location: "Jakarta Timur".to_string(),
            seats: 7,
            plate_number: "B 1010 ERT (Genap)".to_string(),
            gallery: Vec::new(),
            created_at: seeded_at(6),
        },
        Car {
            id: "8".to_string(),
            name: "Rush 1.5 S TRD Sportivo".to_string(),
            brand: "Toyota".to_string(),
            price: 255_000_000,
            year: 2021,
            engine: "1.5L Dual VVT-i".to_string(),
            transmission: "Otomatis".to_string(),
            image: "https://images.unsplash.com/photo-1627454819213-17727e4b52af?auto=format&fit=crop&q=80&w=1200".to_string(),
            description: "LSUV RWD yang tangguh di segala medan jalanan Indonesia. Ground clearance tinggi, muat 7 penumpang. Desain sporty khas TRD.".to_string(),
            is_featured: false,
            mileage: 38_000,
            fuel_type: "Bensin".to_string(),
            body_type: "SUV".to_string(),
            color: "White".to_string(),
            interior_color: "Hitam".to_string(),
            tax_date: "Juli 2024".to_string(),
            previous_owners: 1,
            service_history: "Lengkap".to_string(),
            condition: CarCondition::Bekas,
            location: "Bogor".to_string(),
            seats: 7,
            plate_number: "F 1234 RSH (Genap)".to_string(),
            gallery: Vec::new(),
            created_at: seeded_at(7),
        },
    ]
}

pub fn news() -> Vec<NewsPost> {
    vec![
        NewsPost {
            id: "1".to_string(),
            title: "Tips Merawat Transmisi CVT Agar Awet".to_string(),
            excerpt: "Pengguna mobil modern wajib tahu, ini cara mengemudi yang benar agar sabuk baja CVT tidak cepat putus.".to_string(),
            content: "Transmisi CVT semakin populer di Indonesia...".to_string(),
            date: date(2024, 5, 15),
            author: "Renova Bengkel".to_string(),
            image: "https://images.unsplash.com/photo-1487754180451-c456f719a1fc?auto=format&fit=crop&q=80&w=800".to_string(),
        },
        NewsPost {
            id: "2".to_string(),
            title: "Perbandingan Konsumsi BBM: Avanza vs Xpander".to_string(),
            excerpt: "Kami menguji dua MPV terlaris ini dalam rute dalam kota Jakarta yang macet dan tol luar kota.".to_string(),
            content: "Dalam pengujian rute kombinasi sejauh 200km...".to_string(),
            date: date(2024, 5, 12),
            author: "Renova Test Drive".to_string(),
            image: "https://images.unsplash.com/photo-1568605117036-5fe5e7bab0b7?auto=format&fit=crop&q=80&w=800".to_string(),
        },
    ]
}

pub fn inbox() -> Vec<InboxMessage> {
    vec![
        InboxMessage {
            id: "1".to_string(),
            kind: MessageKind::General,
            name: "Budi Santoso".to_string(),
            email: "budi.s@gmail.com".to_string(),
            phone: None,
            car_name: None,
            booking_date: None,
            subject: "Simulasi Kredit Innova".to_string(),
            message: "Halo admin, bisa tolong kirimkan simulasi kredit untuk Innova Reborn diesel DP 50 juta tenor 4 tahun?".to_string(),
            date: date(2024, 5, 14),
            is_read: false,
        },
        InboxMessage {
            id: "2".to_string(),
            kind: MessageKind::TestDrive,
            name: "Diana Putri".to_string(),
            email: "diana.p@gmail.com".to_string(),
            phone: Some("081234567890".to_string()),
            car_name: Some("HR-V SE CVT".to_string()),
            booking_date: Some(date(2024, 5, 20)),
            subject: "Booking Test Drive: HR-V SE CVT".to_string(),
            message: "Saya ingin mencoba fitur Honda Sensing di jalan tol.".to_string(),
            date: date(2024, 5, 16),
            is_read: false,
        },
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            id: "1".to_string(),
            name: "Sarah Wijaya".to_string(),
            role: "Pembeli HR-V SE".to_string(),
            rating: 5,
            comment: "Pelayanan sangat ramah, proses kredit dibantu sampai goal. Mobilnya juga sangat mulus seperti baru. Recommended showroom!".to_string(),
            date: date(2024, 5, 10),
            is_visible: true,
        },
        Testimonial {
            id: "2".to_string(),
            name: "Denny Sumargo".to_string(),
            role: "Pembeli Fortuner".to_string(),
            rating: 5,
            comment: "Unit sangat terawat, jujur soal kondisi mobil. Harga bersaing dengan showroom lain di Jakarta Selatan.".to_string(),
            date: date(2024, 4, 22),
            is_visible: true,
        },
        Testimonial {
            id: "3".to_string(),
            name: "Jessica Tanoe".to_string(),
            role: "Trade-in Brio".to_string(),
            rating: 4,
            comment: "Proses trade-in cepat, harga taksiran mobil lama saya cukup tinggi. Terima kasih Renova!".to_string(),
            date: date(2024, 3, 15),
            is_visible: true,
        },
    ]
}

pub fn about() -> AboutData {
    AboutData {
        description: "Selamat datang di Renova Mobil, destinasi utama Anda untuk menemukan kendaraan berkualitas tinggi dengan harga yang kompetitif. Sejak didirikan pada tahun 1998, kami telah mendedikasikan diri untuk mengubah pengalaman membeli mobil bekas menjadi sesuatu yang menyenangkan, transparan, dan terpercaya.\n\nDi Renova, setiap unit kendaraan melewati proses inspeksi 150 titik yang ketat oleh teknisi bersertifikat kami. Kami tidak hanya menjual mobil; kami menjual ketenangan pikiran. Komitmen kami terhadap kualitas memastikan bahwa setiap mobil yang keluar dari showroom kami siap untuk menemani perjalanan Anda tanpa rasa khawatir.".to_string(),
        mission: "Menjadi showroom mobil terpercaya nomor satu di Indonesia yang mengutamakan kepuasan pelanggan melalui integritas, kualitas unit terbaik, dan layanan purna jual yang unggul.".to_string(),
        gallery: vec![
            "https://images.unsplash.com/photo-1562141961-b5d1855d7f30?auto=format&fit=crop&q=80&w=1200".to_string(),
            "https://images.unsplash.com/photo-1485291571150-772bcfc10da5?auto=format&fit=crop&q=80&w=1200".to_string(),
            "https://images.unsplash.com/photo-1550355291-bbee04a92027?auto=format&fit=crop&q=80&w=1200".to_string(),
            "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?auto=format&fit=crop&q=80&w=1200".to_string(),
        ],
    }
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            name: "Administrator".to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            role: UserRole::Admin,
        },
        User {
            id: "2".to_string(),
            name: "Regular User".to_string(),
            email: "user@renova.com".to_string(),
            role: UserRole::User,
        },
    ]
}
