//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct used to turn post dates into
//! RSS `pubDate` values and to order posts chronologically.
//!
//! # Examples
//!
//! ```ignore
//! // Parse from ISO format
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! let dt = DateTimeUtc::parse("2024-06-15T14:30:45Z").unwrap();
//!
//! // Format for RSS
//! assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");
//! ```

use anyhow::{Result, bail};

/// UTC datetime without timezone complexity
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Parse an ISO 8601 date or datetime, normalized to UTC.
    ///
    /// Accepts `YYYY-MM-DD`, optionally followed by `T` (or a space) and
    /// `HH:MM[:SS[.fraction]]`, optionally followed by `Z` or a `+HH:MM` /
    /// `-HHMM` offset. Fractional seconds are dropped. Surrounding
    /// whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (date, time) = match s.find(['T', 't', ' ']) {
            Some(i) => (&s[..i], Some(&s[i + 1..])),
            None => (s, None),
        };

        let (year, month, day) = parse_date(date.as_bytes())?;
        let Some(time) = time else {
            let dt = Self::new(year, month, day, 0, 0, 0);
            dt.validate().ok()?;
            return Some(dt);
        };

        let (clock, offset) = split_offset(time)?;
        let (hour, minute, second) = parse_clock(clock)?;
        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        dt.shift_minutes(-offset)
    }

    /// Move by `delta` minutes, crossing day, month and year boundaries.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Minutes of day fit in u8 after / and %
    fn shift_minutes(self, delta: i64) -> Option<Self> {
        if delta == 0 {
            return Some(self);
        }
        let days = days_from_civil(i64::from(self.year), self.month, self.day);
        let total = days * 1440 + i64::from(self.hour) * 60 + i64::from(self.minute) + delta;
        let (year, month, day) = civil_from_days(total.div_euclid(1440));
        let minutes = total.rem_euclid(1440);
        Some(Self::new(
            u16::try_from(year).ok()?,
            month,
            day,
            (minutes / 60) as u8,
            (minutes % 60) as u8,
            self.second,
        ))
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as RFC 2822 for RSS `pubDate`.
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[self.weekday_index()],
            self.day,
            MONTHS[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// Zeller's congruence, 0 = Saturday.
    #[inline]
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

/// `YYYY-MM-DD`
fn parse_date(bytes: &[u8]) -> Option<(u16, u8, u8)> {
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    Some((
        parse_u16(&bytes[0..4])?,
        parse_u8(&bytes[5..7])?,
        parse_u8(&bytes[8..10])?,
    ))
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`
fn parse_clock(clock: &str) -> Option<(u8, u8, u8)> {
    let (clock, fraction) = clock.split_once('.').unwrap_or((clock, "0"));
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let bytes = clock.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return None;
    }
    let hour = parse_u8(&bytes[0..2])?;
    let minute = parse_u8(&bytes[3..5])?;
    let second = match bytes.len() {
        5 => 0,
        8 if bytes[5] == b':' => parse_u8(&bytes[6..8])?,
        _ => return None,
    };
    Some((hour, minute, second))
}

/// Split a trailing zone designator off `time`, returning its offset
/// from UTC in minutes.
fn split_offset(time: &str) -> Option<(&str, i64)> {
    if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        return Some((clock, 0));
    }
    let Some(i) = time.rfind(['+', '-']) else {
        return Some((time, 0));
    };

    let (clock, zone) = time.split_at(i);
    let sign = if zone.starts_with('-') { -1 } else { 1 };
    let digits: Vec<u8> = zone[1..].bytes().filter(|&b| b != b':').collect();
    let (hours, minutes) = match digits.len() {
        2 => (parse_u8(&digits)?, 0),
        4 => (parse_u8(&digits[0..2])?, parse_u8(&digits[2..4])?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((clock, sign * (i64::from(hours) * 60 + i64::from(minutes))))
}

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let (month, day) = (i64::from(month), i64::from(day));
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year - era * 400;
    let doy = (153 * ((month + 9) % 12) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of `days_from_civil`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Month and day are 1-31
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month as u8, day as u8)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::new(2024, 6, 15, 0, 0, 0));
    }

    #[test]
    fn test_parse_with_time() {
        let expected = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45Z"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15 14:30:45"), Some(expected));
        assert_eq!(DateTimeUtc::parse(" 2024-06-15T14:30:45Z\n"), Some(expected));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(DateTimeUtc::parse(""), None);
        assert_eq!(DateTimeUtc::parse("June 15, 2024"), None);
        assert_eq!(DateTimeUtc::parse("2024/06/15"), None);
        assert_eq!(DateTimeUtc::parse("2024-02-30"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T25:00:00Z"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45+25:00"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45."), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14"), None);
    }

    #[test]
    fn test_parse_fraction_and_offset() {
        let expected = DateTimeUtc::new(2024, 3, 1, 10, 0, 0);
        assert_eq!(DateTimeUtc::parse("2024-03-01T10:00:00.000Z"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-03-01T12:00:00+02:00"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-03-01T12:00:00.123456+0200"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-03-01T05:30-04:30"), Some(expected));
        assert_eq!(
            DateTimeUtc::parse("2024-03-01T10:00"),
            Some(DateTimeUtc::new(2024, 3, 1, 10, 0, 0))
        );
    }

    #[test]
    fn test_offset_crosses_day_boundaries() {
        // Leap day, previous year, next month
        assert_eq!(
            DateTimeUtc::parse("2024-03-01T01:00:00+02:00"),
            Some(DateTimeUtc::new(2024, 2, 29, 23, 0, 0))
        );
        assert_eq!(
            DateTimeUtc::parse("2024-01-01T00:30:15+01:00"),
            Some(DateTimeUtc::new(2023, 12, 31, 23, 30, 15))
        );
        assert_eq!(
            DateTimeUtc::parse("2023-02-28T22:00:00-03:00"),
            Some(DateTimeUtc::new(2023, 3, 1, 1, 0, 0))
        );
    }

    #[test]
    fn test_civil_days_round_trip() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(19_783), (2024, 3, 1));
        assert_eq!(days_from_civil(2000, 2, 29), 11_016);
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
    }

    #[test]
    fn test_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(DateTimeUtc::new(2024, 0, 15, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 13, 15, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 4, 31, 12, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 24, 0, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 60, 0).validate().is_err());
        assert!(DateTimeUtc::new(2024, 6, 15, 12, 0, 60).validate().is_err());
    }

    #[test]
    fn test_to_rfc2822() {
        let dt = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");

        let dt = DateTimeUtc::new(2024, 1, 1, 0, 0, 0);
        assert_eq!(dt.to_rfc2822(), "Mon, 01 Jan 2024 00:00:00 GMT");

        let dt = DateTimeUtc::new(2000, 2, 29, 0, 0, 0);
        assert_eq!(dt.to_rfc2822(), "Tue, 29 Feb 2000 00:00:00 GMT");
    }

    #[test]
    fn test_chronological_order() {
        let a = DateTimeUtc::parse("2023-12-31T23:59:59Z").unwrap();
        let b = DateTimeUtc::parse("2024-01-01").unwrap();
        let c = DateTimeUtc::parse("2024-01-01T00:00:01Z").unwrap();
        assert!(a < b && b < c);
    }
}
