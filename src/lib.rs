//! Astronomical lunisolar calendars: Chinese, Korean and Japanese.
//!
//! All three calendars come out of one engine parameterized by an epoch and a
//! table of reference locations. Months begin on the local day of the new
//! moon, the month holding the December solstice is always the 11th, and a
//! solstice year with 13 new moons gets a leap month at its first month
//! without a major solar term. Sun and moon positions are computed by an
//! analytic ephemeris, see [`lunisolar::ephemeris`].
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use kalendarilo_lunisolar::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(730485, date.iso_days());
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Chinese lunisolar calendar:
//!
//! ```
//! use kalendarilo_lunisolar::Date;
//! use kalendarilo_lunisolar::lunisolar::{CHINESE, Month::*};
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//! let sui = CHINESE.sui(date);
//!
//! assert_eq!(Ok((4636, Common(11), 25)), sui.ymd_for(date));
//! ```
//!
//! Converting back and forth, with the traditional month name:
//!
//! ```
//! use kalendarilo_lunisolar::Date;
//! use kalendarilo_lunisolar::lunisolar::{CHINESE, Month};
//!
//! let date = CHINESE.new(4660, Month::Leap(2), 1).unwrap();
//! let day = CHINESE.date_to_iso_days(date.year, date.month, date.day);
//!
//! assert_eq!(Date::from_gregorian(2023, 3, 22), Some(day));
//! assert_eq!(date, CHINESE.date_from_iso_days(day));
//! ```
//!
//! # Planned features
//!
//! - Vietnamese calendar (needs a UTC+7 location table with its own
//!   historical offsets)
//! - Faster year-level queries by caching one solstice year at a time
//!
//! Dates far outside the last few millennia are computed but get less
//! accurate, as the ΔT extrapolation drifts.

pub mod date;
pub mod lunisolar;
pub mod time_scales;

pub use date::{Date, YearType};
pub use lunisolar::{CHINESE, JAPANESE, KOREAN, Lunisolar, Month};
