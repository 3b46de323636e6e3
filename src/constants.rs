pub const CASE_SIZE: u32 = 6;
pub const DEFAULT_PAR: u32 = 4;

pub const REPORT_LIFETIME_HOURS: i64 = 6;
pub const REPORT_PREFIX: &str = "cellar_run_";
pub const REPORT_EXTENSION: &str = "pdf";
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const KEY_SEPARATOR: &str = "__";

pub const DEFAULT_ADDRESS: ([u8; 4], u16) = ([127, 0, 0, 1], 5000);
pub const DEFAULT_CATALOG_PATH: &str = "data/spirits.json";
pub const DEFAULT_CACHE_DIR: &str = "pdf_cache";

pub const BOTTOM_BAR_SECTIONS: &[&str] = &["Bottom Bar", "Downstairs"];
pub const TOP_BAR_SECTION: &str = "Top Bar";

pub const AU_PREFIX: &str = "AU ";

/* par exception lists */
pub const VANILLA: &[&str] = &["Absolut Vanilla"];
pub const CORKYS: &[&str] = &["Corky's Raspberry", "Corky's Cherry", "Corky's Apple"];
pub const TOP_BAR_HIGH_VOLUME: &[&str] = &["Captain Morgans Spiced", "Smirnoff Red"];
pub const TOP_BAR_MID_VOLUME: &[&str] = &[
    "Smirnoff Raspberry",
    "Smirnoff Mango and Passionfruit",
    "Archers",
    "Malibu",
];
