pub mod i18n;
pub mod optimistic;
pub mod prompt;
pub mod time;
