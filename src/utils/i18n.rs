use rust_i18n::t;
use tracing::warn;

/// Locales shipped in the message catalog
pub const AVAILABLE_LOCALES: [&str; 2] = ["ko", "en"];

/// Switch the message catalog, falling back to Korean for unknown locales
pub fn set_locale(locale: &str) {
    if AVAILABLE_LOCALES.contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        warn!("Unknown locale '{}', using ko", locale);
        rust_i18n::set_locale("ko");
    }
}

/// Weekday column headers, Sunday first
pub fn weekday_labels() -> [String; 7] {
    [
        t!("weekday_sun").to_string(),
        t!("weekday_mon").to_string(),
        t!("weekday_tue").to_string(),
        t!("weekday_wed").to_string(),
        t!("weekday_thu").to_string(),
        t!("weekday_fri").to_string(),
        t!("weekday_sat").to_string(),
    ]
}
