//! Calendar-independant date.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Julian day number of proleptic Gregorian 0000-01-01.
const JDN_OF_DAY_ZERO: i32 = 1_721_060;

/// Days from 0000-01-01 to 0000-03-01 (year 0 is a leap year).
const MARCH_FIRST_OF_YEAR_ZERO: i32 = 60;

/// Days in a 400-year Gregorian cycle.
const DAYS_PER_ERA: i32 = 146_097;

/// A calendar-independant date, counted as days since proleptic Gregorian
/// 0000-01-01 (the "iso days" scale).
///
/// Every lunisolar calendar in this crate converts to and from this
/// value; it is the interchange format between calendars.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Date {
    iso_days: i32,
}

impl Date {
    /// Creates a `Date` from a count of days since 0000-01-01.
    pub const fn from_iso_days(iso_days: i32) -> Self {
        Self { iso_days }
    }
    /// Returns the count of days since 0000-01-01.
    pub const fn iso_days(&self) -> i32 {
        self.iso_days
    }

    /// Creates a `Date` with a Julian day number (JDN).
    pub const fn from_jdn(jdn: i32) -> Self {
        Self::from_iso_days(jdn - JDN_OF_DAY_ZERO)
    }
    /// Returns the Julian day number (JDN) of the date.
    pub const fn jdn(&self) -> i32 {
        self.iso_days + JDN_OF_DAY_ZERO
    }

    /// Returns the date on which a moment (iso days plus a fraction of a
    /// day) falls.
    pub fn from_moment(moment: f64) -> Self {
        Self::from_iso_days(moment.floor() as i32)
    }
    /// Returns the moment at the beginning of the date.
    pub fn midnight(&self) -> f64 {
        self.iso_days as f64
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `month` or `day` does not exist.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2001, 2, 29));
    /// ```
    pub const fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if month < 1 || month > 12 {
            return None;
        }
        if day < 1 || day > days_in_gregorian_month(year, month) {
            return None;
        }
        // Shift the year to start in March so the leap day is the last day.
        let y = if month <= 2 { year - 1 } else { year };
        let era = y.div_euclid(400);
        let yoe = y.rem_euclid(400);
        let mp = (month + 9) % 12;
        let doy = (153 * mp + 2) / 5 + day - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        Some(Self::from_iso_days(
            era * DAYS_PER_ERA + doe + MARCH_FIRST_OF_YEAR_ZERO,
        ))
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub const fn gregorian(&self) -> (i32, i32, i32) {
        let z = self.iso_days - MARCH_FIRST_OF_YEAR_ZERO;
        let era = z.div_euclid(DAYS_PER_ERA);
        let doe = z.rem_euclid(DAYS_PER_ERA);
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
        (year, month, day)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_iso_days(self.iso_days + rhs)
    }
}
impl Sub<i32> for Date {
    type Output = Date;
    fn sub(self, rhs: i32) -> Self::Output {
        Date::from_iso_days(self.iso_days - rhs)
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.iso_days - rhs.iso_days
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub const fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub const fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

const fn days_in_gregorian_month(year: i32, month: i32) -> i32 {
    match month {
        2 if YearType::from_gregorian(year).is_leap() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
