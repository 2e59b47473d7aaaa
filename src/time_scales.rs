//! Deals with different time scales, specifically, conversion between
//! dynamical time (TT), universal time (UT) and local standard time.
//!
//! All moments are counted in days on the same scale as [`Date`], i.e. days
//! since 0000-01-01 plus a fraction of a day.
//!
//! Only conversions necessary for other computations in this crate are
//! included.

use crate::date::Date;

/// [Terristrial time](https://en.wikipedia.org/wiki/Terrestrial_Time).
///
/// Ephemeris series are expressed in this time scale, and results should be
/// converted to UT when calculating dates.
///
/// Note: TDB differs no more than centisenconds from TT during thousands of
/// years, so the two are treated numerically the same.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the actual
/// civil time used for determining the actual date at a given time point.
///
/// Because of irregularity of Earth's rotation, conversion from TT relies on
/// an estimate of ΔT (TT − UT), see [`delta_t`].
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl From<Ut> for Tt {
    fn from(ut: Ut) -> Tt {
        Tt(ut.0 + delta_t(ut.0))
    }
}

impl From<Tt> for Ut {
    fn from(tt: Tt) -> Ut {
        Ut(tt.0 - delta_t(tt.0))
    }
}

impl Ut {
    /// Converts a moment in local standard time, ahead (east) of UTC by
    /// `utc_offset` days, into UT.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_lunisolar::time_scales::Ut;
    ///
    /// let ut = Ut::from_standard(730485.0, 8.0 / 24.0);
    /// assert!((ut.0 - (730485.0 - 1.0 / 3.0)).abs() < 1e-9);
    /// ```
    pub fn from_standard(standard: f64, utc_offset: f64) -> Self {
        Ut(standard - utc_offset)
    }
    /// Returns the moment in local standard time ahead (east) of UTC by
    /// `utc_offset` days.
    pub fn to_standard(self, utc_offset: f64) -> f64 {
        self.0 + utc_offset
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `utc_offset` days.
    ///
    /// For Beijing time (UTC+8), `utc_offset` should be `8.0 / 24.0`.
    ///
    /// # Example
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::time_scales::Ut;
    ///
    /// let evening = Ut(Date::from_gregorian(1999, 12, 30).unwrap().midnight() + 0.7);
    /// assert_eq!((1999, 12, 30), evening.date_in_timezone(0.0).gregorian());
    /// assert_eq!((1999, 12, 31), evening.date_in_timezone(8.0 / 24.0).gregorian());
    /// ```
    pub fn date_in_timezone(&self, utc_offset: f64) -> Date {
        Date::from_moment(self.to_standard(utc_offset))
    }
}

/// Estimates ΔT (TT − UT), in days, for a moment.
///
/// Piecewise polynomials by Espenak & Meeus as arranged by Reingold &
/// Dershowitz. The year of the moment selects the polynomial; inputs
/// outside the fitted eras fall back to the long-term parabola.
pub fn delta_t(moment: f64) -> f64 {
    const SECS_PER_DAY: f64 = 86400.0;

    let year = Date::from_moment(moment).gregorian().0;
    let y = year as f64;

    match year {
        2051..=2150 => {
            let u = (y - 1820.0) / 100.0;
            (-20.0 + 32.0 * u * u + 0.5628 * (2150.0 - y)) / SECS_PER_DAY
        }
        2006..=2050 => {
            let u = y - 2000.0;
            (62.92 + 0.32217 * u + 0.005589 * u * u) / SECS_PER_DAY
        }
        1987..=2005 => {
            let u = y - 2000.0;
            poly(
                u,
                &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599],
            ) / SECS_PER_DAY
        }
        1800..=1986 => {
            let c = centuries_since_1900(year);
            if year >= 1900 {
                poly(
                    c,
                    &[
                        -0.00002, 0.000297, 0.025184, -0.181133, 0.553040, -0.861938,
                        0.677066, -0.212591,
                    ],
                )
            } else {
                poly(
                    c,
                    &[
                        -0.000009, 0.003844, 0.083563, 0.865736, 4.867575, 15.845535,
                        31.332267, 38.291999, 28.316289, 11.636204, 2.043794,
                    ],
                )
            }
        }
        1700..=1799 => {
            let u = y - 1700.0;
            poly(u, &[8.118780842, -0.005092142, 0.003336121, -0.0000266484]) / SECS_PER_DAY
        }
        1600..=1699 => {
            let u = y - 1600.0;
            poly(u, &[120.0, -0.9808, -0.01532, 0.000140272128]) / SECS_PER_DAY
        }
        500..=1599 => {
            let u = (y - 1000.0) / 100.0;
            poly(
                u,
                &[
                    1574.2, -556.01, 71.23472, 0.319781, -0.8503463, -0.005050998,
                    0.0083572073,
                ],
            ) / SECS_PER_DAY
        }
        -499..=499 => {
            let u = y / 100.0;
            poly(
                u,
                &[
                    10583.6, -1014.41, 33.78311, -5.952053, -0.1798452, 0.022174192,
                    0.0090316521,
                ],
            ) / SECS_PER_DAY
        }
        _ => {
            let u = (y - 1820.0) / 100.0;
            (-20.0 + 32.0 * u * u) / SECS_PER_DAY
        }
    }
}

/// Julian centuries from 1900-01-01 to July 1 of `year`, the argument of the
/// 1800–1986 polynomials (which yield days directly).
fn centuries_since_1900(year: i32) -> f64 {
    const JULIAN_CENTURY: f64 = 36525.0;
    let start = Date::from_iso_days(693_961); // 1900-01-01
    let july = Date::from_gregorian(year, 7, 1).unwrap_or(start);
    (july - start) as f64 / JULIAN_CENTURY
}

/// Evaluates a polynomial with coefficients in ascending order of power.
pub(crate) fn poly(x: f64, coefficients: &[f64]) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &a| acc * x + a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment(y: i32, m: i32, d: i32) -> f64 {
        Date::from_gregorian(y, m, d).unwrap().midnight()
    }

    #[test]
    fn epoch_of_1900() {
        assert_eq!((1900, 1, 1), Date::from_iso_days(693_961).gregorian());
    }

    #[test]
    fn delta_t_in_seconds() {
        let secs = |m: f64| delta_t(m) * 86400.0;
        // Observed values: ~63.8 s in 2000, ~29 s in 1950, ~-2.7 s in 1900.
        assert!((secs(moment(2000, 1, 1)) - 63.86).abs() < 1.0);
        assert!((secs(moment(1950, 1, 1)) - 29.1).abs() < 2.0);
        assert!((secs(moment(1900, 1, 1)) + 2.7).abs() < 2.0);
        // Roughly 1.7 hours in AD 1.
        assert!((secs(moment(1, 1, 1)) - 10583.6).abs() < 100.0);
    }

    #[test]
    fn tt_ut_round_trip() {
        let ut = Ut(moment(2023, 1, 22) + 0.25);
        let tt = Tt::from(ut);
        assert!(tt.0 > ut.0);
        assert!((Ut::from(tt).0 - ut.0).abs() < 1e-9);
    }

    #[test]
    fn standard_time() {
        let ut = Ut::from_standard(moment(2000, 1, 1), 9.0 / 24.0);
        assert_eq!((1999, 12, 31), ut.date_in_timezone(0.0).gregorian());
        assert_eq!((2000, 1, 1), ut.date_in_timezone(9.0 / 24.0).gregorian());
        assert!((ut.to_standard(9.0 / 24.0) - moment(2000, 1, 1)).abs() < 1e-9);
    }

    #[test]
    fn polynomial() {
        assert_eq!(0.0, poly(3.0, &[]));
        assert_eq!(1.0 + 2.0 * 3.0 + 4.0 * 9.0, poly(3.0, &[1.0, 2.0, 4.0]));
    }
}
