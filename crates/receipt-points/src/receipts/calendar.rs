//! Purchase date and time fields.
//!
//! Dates are checked with explicit month and days-in-month rules on the proleptic
//! Gregorian calendar rather than by round-tripping through a calendar library, so
//! edge cases such as year `0000` or 29 February stay visible in one place.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("'{0}' does not match YYYY-MM-DD")]
    MalformedDate(String),
    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    NoSuchDate { year: u16, month: u8, day: u8 },
    #[error("'{0}' does not match HH:MM")]
    MalformedTime(String),
    #[error("{hour:02}:{minute:02} is outside the 24-hour clock")]
    NoSuchTime { hour: u8, minute: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PurchaseDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl PurchaseDate {
    pub fn parse(raw: &str) -> Result<Self, CalendarError> {
        let malformed = || CalendarError::MalformedDate(raw.to_string());
        let bytes = raw.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }

        let year = digits(&bytes[0..4]).ok_or_else(malformed)?;
        let month = digits(&bytes[5..7]).ok_or_else(malformed)?;
        let day = digits(&bytes[8..10]).ok_or_else(malformed)?;

        // Four and two digit groups always fit their integer widths.
        let date = PurchaseDate {
            year: year as u16,
            month: month as u8,
            day: day as u8,
        };

        if !(1..=12).contains(&date.month) || date.day == 0 {
            return Err(date.no_such_date());
        }
        if date.day > days_in_month(date.year, date.month) {
            return Err(date.no_such_date());
        }

        Ok(date)
    }

    /// Ones digit of the day of the month is odd (13 qualifies, 12 does not).
    pub fn is_odd_day(&self) -> bool {
        (self.day % 10) % 2 == 1
    }

    fn no_such_date(&self) -> CalendarError {
        CalendarError::NoSuchDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }
}

impl fmt::Display for PurchaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PurchaseTime {
    pub hour: u8,
    pub minute: u8,
}

impl PurchaseTime {
    pub fn parse(raw: &str) -> Result<Self, CalendarError> {
        let malformed = || CalendarError::MalformedTime(raw.to_string());
        let bytes = raw.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(malformed());
        }

        let hour = digits(&bytes[0..2]).ok_or_else(malformed)? as u8;
        let minute = digits(&bytes[3..5]).ok_or_else(malformed)? as u8;

        if hour > 23 || minute > 59 {
            return Err(CalendarError::NoSuchTime { hour, minute });
        }

        Ok(PurchaseTime { hour, minute })
    }

    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// Strictly after `start` and strictly before `end`.
    pub fn is_strictly_between(&self, start: PurchaseTime, end: PurchaseTime) -> bool {
        let minutes = self.minutes_since_midnight();
        minutes > start.minutes_since_midnight() && minutes < end.minutes_since_midnight()
    }
}

impl fmt::Display for PurchaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, byte| {
        byte.is_ascii_digit().then(|| acc * 10 + u32::from(byte - b'0'))
    })
}
