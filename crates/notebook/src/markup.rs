//! The handful of Zim wiki markup constructs this crate needs to write.

use time::{Date, OffsetDateTime};
use time::macros::format_description;

/// A heading line. Level 1 is the page title (`====== T ======`); each level
/// below removes one `=` from both sides, down to level 5.
///
/// ```
/// use zimbib_notebook::markup::heading;
/// assert_eq!(heading(1, "References"), "====== References ======\n");
/// assert_eq!(heading(2, "Library"), "===== Library =====\n");
/// ```
pub fn heading(level: u8, text: &str) -> String {
    let marks = "=".repeat(7 - usize::from(level.clamp(1, 5)));
    format!("{marks} {text} {marks}\n")
}

/// A link with an explicit label: `[[target|label]]`.
pub fn link(target: &str, label: &str) -> String {
    format!("[[{target}|{label}]]")
}

/// The creation-date line Zim puts under a new page's title.
///
/// ```
/// use time::macros::date;
/// use zimbib_notebook::markup::created;
/// assert_eq!(created(date!(2024-01-01)), "Created Monday 01 January 2024\n");
/// ```
pub fn created(date: Date) -> String {
    let format = format_description!("[weekday] [day] [month repr:long] [year]");
    // Infallible: a Date carries every component the format asks for.
    let formatted = date.format(format).unwrap_or_else(|_| date.to_string());
    format!("Created {formatted}\n")
}

/// ISO-8601 timestamp with second precision and a numeric offset, as Zim
/// writes it in page file headers: `2024-01-01T10:00:00+01:00`.
pub fn timestamp(at: OffsetDateTime) -> String {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
    );
    at.format(format).unwrap_or_else(|_| at.to_string())
}

/// Local wall clock time, falling back to UTC when the offset is unknown.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
