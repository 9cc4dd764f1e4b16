use std::fmt;

use chrono::{Local, Offset};

/// An `Attribution` combines a person's identity (name and e-mail address)
/// with the timestamp for a particular action.
///
/// Attributions appear as the `author` and `committer` lines of a commit.
///
/// The `timestamp` value is in seconds relative to the Unix epoch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribution {
    name: String,
    email: String,
    timestamp: i64,
    tz_offset: i16,
}

impl Attribution {
    /// Creates a new attribution. `tz_offset` is in minutes relative to GMT.
    ///
    /// Offsets outside of `-12:00` to `+14:00` are clamped into that range.
    pub fn new(name: &str, email: &str, timestamp: i64, tz_offset: i16) -> Attribution {
        Attribution {
            name: name.to_string(),
            email: email.to_string(),
            timestamp,
            tz_offset: tz_offset.max(-720).min(840),
        }
    }

    /// Creates an attribution stamped with the current local time.
    ///
    /// The clock is sampled once; the returned value never changes.
    pub fn now(name: &str, email: &str) -> Attribution {
        let now = Local::now();
        let offset_minutes = now.offset().fix().local_minus_utc() / 60;

        Attribution::new(name, email, now.timestamp(), offset_minutes as i16)
    }

    /// Returns the person's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the person's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns the timezone offset (minutes relative to GMT).
    pub fn tz_offset(&self) -> i16 {
        self.tz_offset
    }

    /// Returns the timezone formatted in human readable offset from GMT.
    pub fn format_tz(&self) -> String {
        let sign = if self.tz_offset < 0 { "-" } else { "+" };

        let offset = self.tz_offset.abs();
        let hours = offset / 60;
        let min = offset % 60;

        format!("{}{:02}{:02}", sign, hours, min)
    }
}

fn sanitize(s: &str) -> String {
    // Control characters and angle brackets would break the line format.
    s.trim()
        .chars()
        .filter(|c| !c.is_control() && *c != '<' && *c != '>')
        .collect()
}

impl fmt::Display for Attribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} {}",
            sanitize(&self.name),
            sanitize(&self.email),
            self.timestamp,
            self.format_tz()
        )
    }
}
