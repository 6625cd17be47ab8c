use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Header clock text, e.g. `Sunday, 18 Oct 2026 · 3:04 PM`.
pub fn format_datetime<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%A, %d %b %Y · %-I:%M %p").to_string()
}
