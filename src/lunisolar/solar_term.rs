//! 冬至與中氣

use super::ephemeris::{self, WINTER, solar_longitude, solar_longitude_after};
use super::{Lunisolar, amod, search};
use crate::date::Date;
use crate::time_scales::Ut;

/// 節氣信息
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SolarTerm {
    /// 節氣序號，`1..=24` 對應立春到大寒
    pub index: u32,
    /// 交節所在日期
    pub start: Date,
}

impl SolarTerm {
    /// 是否為中氣（太陽黃經為 30° 的倍數）
    pub fn is_major(&self) -> bool {
        self.index % 2 == 0
    }
    /// 所給 `date` 在交節後第幾日，為 0 則表示當日交節
    pub fn days_since(&self, date: Date) -> i32 {
        date - self.start
    }
    /// 交節時太陽黃經（度）
    pub fn longitude(&self) -> f64 {
        ((315 + 15 * (self.index as i32 - 1)) % 360) as f64
    }
}

impl Lunisolar {
    /// 取得 `date` 或之前最近一個冬至所在日期（當地時間）。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// let date = Date::from_gregorian(2000, 6, 1).unwrap();
    /// let solstice = CHINESE.december_solstice_on_or_before(date);
    /// assert_eq!("1999-12-22", solstice.iso_gregorian());
    /// ```
    pub fn december_solstice_on_or_before(&self, date: Date) -> Date {
        let approx = ephemeris::estimate_prior_solar_longitude(WINTER, self.midnight(date + 1));
        let start = Date::from_moment(approx.0) - 1;
        let day = search::next(start.iso_days(), |day| {
            WINTER < solar_longitude(self.midnight(Date::from_iso_days(day) + 1))
        });
        Date::from_iso_days(day)
    }

    /// 取得當地 `date` 零時所在的中氣段序號，`1..=12`，冬至起為 11。
    pub fn current_major_solar_term(&self, date: Date) -> u32 {
        let lon = solar_longitude(self.midnight(date));
        amod(2 + (lon / 30.0).floor() as i32, 12) as u32
    }

    /// 以 `date` 為月首的月是否無中氣（閏月的必要條件）。
    pub fn no_major_solar_term(&self, date: Date) -> bool {
        self.current_major_solar_term(date)
            == self.current_major_solar_term(self.new_moon_on_or_after(date + 1))
    }

    /// 取得 `date` 當日所在節氣及其交節日期。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let term = CHINESE.solar_term_on(date);
    /// assert_eq!(22, term.index); // 冬至
    /// assert_eq!(10, term.days_since(date));
    /// ```
    pub fn solar_term_on(&self, date: Date) -> SolarTerm {
        let end = self.midnight(date + 1);
        let boundary = (solar_longitude(end) / 15.0).floor() * 15.0;
        // 一氣約 15.2 日，回溯 20 日必在交節之前
        let crossing = solar_longitude_after(boundary, Ut(end.0 - 20.0));
        SolarTerm {
            index: ((boundary as i32 - 315).rem_euclid(360) / 15 + 1) as u32,
            start: self.local_date(crossing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunisolar::CHINESE;

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn solstices() {
        let data = [
            ((2000, 6, 1), "1999-12-22"),
            ((2000, 12, 20), "1999-12-22"),
            ((2000, 12, 21), "2000-12-21"),
            ((2017, 12, 22), "2017-12-22"),
            ((2022, 12, 22), "2022-12-22"),
            ((2023, 1, 22), "2022-12-22"),
        ];
        for ((y, m, d), std) in data {
            let found = CHINESE.december_solstice_on_or_before(date(y, m, d));
            assert_eq!(std, found.iso_gregorian(), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn solar_terms() {
        let dataset = [
            ((2016, 11, 29), 20, 7),
            ((2016, 12, 7), 21, 0),
            ((2016, 12, 21), 22, 0),
            ((2016, 12, 22), 22, 1),
            ((2017, 1, 20), 24, 0),
            ((2017, 2, 3), 1, 0),
            ((2017, 12, 7), 21, 0),
            ((2017, 12, 21), 21, 14),
        ];
        for ((y, m, d), index, off) in dataset {
            let day = date(y, m, d);
            let term = CHINESE.solar_term_on(day);
            assert_eq!((index, off), (term.index, term.days_since(day)), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn term_longitudes() {
        let term = |index| SolarTerm { index, start: date(2000, 1, 1) };
        assert_eq!(315.0, term(1).longitude());
        assert_eq!(0.0, term(4).longitude());
        assert_eq!(270.0, term(22).longitude());
        assert!(term(22).is_major());
        assert!(!term(1).is_major());
    }

    #[test]
    fn leap_month_has_no_major_term() {
        // 2017 年閏六月始於 07-23，六月始於 06-24
        assert!(CHINESE.no_major_solar_term(date(2017, 7, 23)));
        assert!(!CHINESE.no_major_solar_term(date(2017, 6, 24)));
        assert!(!CHINESE.no_major_solar_term(date(2017, 8, 22)));
        // 2023 年閏二月始於 03-22
        assert!(CHINESE.no_major_solar_term(date(2023, 3, 22)));
        assert!(!CHINESE.no_major_solar_term(date(2023, 2, 20)));
    }

    #[test]
    fn major_terms_around_solstice() {
        // 冬至日 2022-12-22 當地零時尚在冬至前
        assert_eq!(10, CHINESE.current_major_solar_term(date(2022, 12, 22)));
        assert_eq!(11, CHINESE.current_major_solar_term(date(2022, 12, 23)));
    }
}
