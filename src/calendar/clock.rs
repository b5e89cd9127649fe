//! Clock-time parsing and the fixed hour window of the day grid.
//!
//! The grid renders hours 8 through 20 inclusive. Start times are
//! stored as raw strings and parsed defensively: anything unreadable
//! degrades to "no time" so a bad record lands in the unscheduled row
//! instead of breaking the view.

use std::sync::OnceLock;

use regex::Regex;

/// First hour row of the day grid.
pub const FIRST_HOUR: u32 = 8;
/// Last hour row of the day grid, inclusive.
pub const LAST_HOUR: u32 = 20;
/// Number of hour rows (8..=20).
pub const HOUR_SLOTS: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// The hour rows of the grid, in render order.
pub fn grid_hours() -> impl Iterator<Item = u32> {
    FIRST_HOUR..=LAST_HOUR
}

fn clock_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?P<hour>\d{1,2}):(?P<minute>\d{2})\s*(?P<ampm>[ap]m)?$").ok()
    })
    .as_ref()
}

/// Parse a clock string into `(hour, minute)`.
///
/// Accepts 24-hour ("14:00", "8:30") and 12-hour ("2:30pm") forms.
/// Returns None for anything else.
pub fn parse_clock_time(raw: &str) -> Option<(u32, u32)> {
    let captures = clock_re()?.captures(raw.trim())?;

    let raw_hour = captures.name("hour")?.as_str().parse::<u32>().ok()?;
    let minute = captures.name("minute")?.as_str().parse::<u32>().ok()?;
    if minute > 59 {
        return None;
    }

    let hour = if let Some(ampm) = captures.name("ampm") {
        if raw_hour == 0 || raw_hour > 12 {
            return None;
        }
        match ampm.as_str().to_ascii_lowercase().as_str() {
            "am" => {
                if raw_hour == 12 {
                    0
                } else {
                    raw_hour
                }
            }
            _ => {
                if raw_hour == 12 {
                    12
                } else {
                    raw_hour + 12
                }
            }
        }
    } else {
        raw_hour
    };

    if hour > 23 {
        return None;
    }
    Some((hour, minute))
}

/// Hour row a start time belongs to: the floor hour of the parsed
/// time, if it falls inside the grid window.
///
/// A parseable time outside 8..=20 matches no row; the item still
/// shows up in date-level views, just not in the hour grid.
pub fn slot_hour(raw: &str) -> Option<u32> {
    let (hour, _minute) = parse_clock_time(raw)?;
    if (FIRST_HOUR..=LAST_HOUR).contains(&hour) {
        Some(hour)
    } else {
        None
    }
}

/// Canonical label for an hour row, and the string a drop on that row
/// writes back: zero-padded `"HH:00"`.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}
