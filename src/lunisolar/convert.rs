//! 日期與絕對日數互換，及年層面的查詢

use super::ephemeris::MEAN_TROPICAL_YEAR;
use super::lunation::lunations;
use super::{CyclicalDate, Error, Lunisolar, OrdinalDate, SUPPORTED_YEARS, amod};
use crate::date::Date;

/// 一年的首尾，供年層面的查詢共用，免去重複求歲首。
#[derive(Debug, Copy, Clone)]
pub(crate) struct YearSpan {
    /// 該年正月初一
    pub new_year: Date,
    /// 次年正月初一
    pub next_new_year: Date,
}

impl YearSpan {
    /// 月數，12 或 13
    pub fn months(&self) -> u32 {
        lunations(self.new_year, self.next_new_year) as u32
    }
}

impl Lunisolar {
    /// 取得第 `year` 年（自曆元起算）的正月初一。
    pub fn new_year(&self, year: i32) -> Date {
        let mid_year = self.epoch.iso_days() as f64 + (year as f64 - 0.5) * MEAN_TROPICAL_YEAR;
        self.new_year_on_or_before(Date::from_moment(mid_year))
    }

    /// 歲首 `new_year` 所開始之年，自曆元起算。
    pub(crate) fn year_of_new_year(&self, new_year: Date) -> i32 {
        (1.5 + (new_year - self.epoch) as f64 / MEAN_TROPICAL_YEAR).floor() as i32
    }

    /// 將以序數月表示的年月日轉為日期。
    ///
    /// 不驗證輸入：月、日超出範圍者順延至後續月日。需驗證時先用 [`Self::valid_date`]。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// let date = CHINESE.date_to_iso_days(4660, 3, 1);
    /// assert_eq!(Date::from_gregorian(2023, 3, 22), Some(date));
    /// ```
    pub fn date_to_iso_days(&self, year: i32, month: u32, day: u32) -> Date {
        let new_year = self.new_year(year);
        // 每月至少 29 日，至多 30 日，此估計恰落在所求月首之前一月內
        let months = i32::try_from(month).unwrap_or(i32::MAX).saturating_sub(1);
        let estimate = new_year.iso_days().saturating_add(months.saturating_mul(29));
        let start = self.new_moon_on_or_after(Date::from_iso_days(estimate));
        let days = i32::try_from(day).unwrap_or(i32::MAX).saturating_sub(1);
        Date::from_iso_days(start.iso_days().saturating_add(days))
    }

    /// 將日期轉為以序數月表示的年月日。
    pub fn date_from_iso_days(&self, date: Date) -> OrdinalDate {
        let new_year = self.new_year_on_or_before(date);
        let start = self.new_moon_before(date + 1);
        OrdinalDate {
            year: self.year_of_new_year(new_year),
            month: (lunations(new_year, start) + 1) as u32,
            day: (date - start + 1) as u32,
        }
    }

    /// 將六十年週期紀年的日期轉為絕對日期。
    pub fn cyclical_date_to_iso_days(&self, date: CyclicalDate) -> Date {
        self.date_to_iso_days(date.elapsed_years(), date.month, date.day)
    }

    /// 將絕對日期轉為六十年週期紀年的日期。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, CyclicalDate};
    ///
    /// let date = Date::from_gregorian(1998, 1, 28).unwrap();
    /// assert_eq!(
    ///     CyclicalDate { cycle: 78, year: 15, month: 1, day: 1 },
    ///     CHINESE.cyclical_date_from_iso_days(date),
    /// );
    /// ```
    pub fn cyclical_date_from_iso_days(&self, date: Date) -> CyclicalDate {
        self.date_from_iso_days(date).into()
    }

    /// 週內年，`1..=60`
    pub fn cyclic_year(&self, year: i32) -> u32 {
        amod(year, 60) as u32
    }

    /// 該年是否有閏月
    pub fn is_leap_year(&self, year: i32) -> bool {
        self.months_in_year(year) == 13
    }

    /// 該年月數，12 或 13
    pub fn months_in_year(&self, year: i32) -> u32 {
        self.year_span(year).months()
    }

    /// 該年日數
    pub fn days_in_year(&self, year: i32) -> u32 {
        let span = self.year_span(year);
        (span.next_new_year - span.new_year) as u32
    }

    pub(crate) fn year_span(&self, year: i32) -> YearSpan {
        YearSpan {
            new_year: self.new_year(year),
            next_new_year: self.new_year(year + 1),
        }
    }

    /// 該年第 `month` 月（序數月）的日數，29 或 30。
    pub fn days_in_month(&self, year: i32, month: u32) -> Result<u32, Error> {
        self.check_year(year)?;
        self.month_length(&self.year_span(year), month)
    }

    fn month_length(&self, span: &YearSpan, month: u32) -> Result<u32, Error> {
        let max = span.months();
        if !(1..=max).contains(&month) {
            return Err(Error::InvalidMonth { month, max });
        }
        let start = self.new_moon_on_or_after(span.new_year + 29 * (month as i32 - 1));
        Ok((self.new_moon_on_or_after(start + 1) - start) as u32)
    }

    /// 在已知年首尾下驗證年月日，不查年份範圍。
    pub(crate) fn checked_date(
        &self,
        span: &YearSpan,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<OrdinalDate, Error> {
        let max_day = self.month_length(span, month)?;
        if !(1..=max_day).contains(&day) {
            return Err(Error::InvalidDay { day, month, max_day });
        }
        Ok(OrdinalDate { year, month, day })
    }

    /// 驗證以序數月表示的年月日。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, Error};
    ///
    /// assert!(CHINESE.valid_date(4660, 13, 1).is_ok());
    /// assert_eq!(
    ///     Err(Error::InvalidMonth { month: 13, max: 12 }),
    ///     CHINESE.valid_date(4661, 13, 1),
    /// );
    /// ```
    pub fn valid_date(&self, year: i32, month: u32, day: u32) -> Result<OrdinalDate, Error> {
        self.check_year(year)?;
        self.checked_date(&self.year_span(year), year, month, day)
    }

    /// 驗證六十年週期紀年的日期。
    pub fn valid_cyclical_date(
        &self,
        cycle: i32,
        year: u32,
        month: u32,
        day: u32,
    ) -> Result<CyclicalDate, Error> {
        if !(1..=60).contains(&year) {
            return Err(Error::InvalidCyclicYear { year });
        }
        let date = CyclicalDate { cycle, year, month, day };
        self.valid_date(date.elapsed_years(), month, day)?;
        Ok(date)
    }

    /// `date` 為其所在年的第幾日，正月初一為 1。
    pub fn day_of_year(&self, date: Date) -> u32 {
        (date - self.new_year_on_or_before(date) + 1) as u32
    }

    /// 第 `year` 年正月初一所在的公元年（天文紀年）。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, JAPANESE, KOREAN};
    ///
    /// assert_eq!(2023, CHINESE.related_gregorian_year(4660));
    /// assert_eq!(2023, KOREAN.related_gregorian_year(4356));
    /// assert_eq!(2023, JAPANESE.related_gregorian_year(2683));
    /// ```
    pub fn related_gregorian_year(&self, year: i32) -> i32 {
        self.epoch.gregorian().0 + year - 1
    }

    /// 正月初一落在公元 `gregorian_year` 年的年份。
    pub fn year_for_gregorian(&self, gregorian_year: i32) -> i32 {
        gregorian_year - self.epoch.gregorian().0 + 1
    }

    pub(crate) fn check_year(&self, year: i32) -> Result<(), Error> {
        let related = i64::from(self.epoch.gregorian().0) + i64::from(year) - 1;
        match i32::try_from(related) {
            Ok(related) if SUPPORTED_YEARS.contains(&related) => Ok(()),
            _ => Err(Error::OutOfRange { year: i64::from(year) }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunisolar::{CHINESE, JAPANESE, KOREAN};

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn new_years() {
        let data = [
            (4637, "2000-02-05"),
            (4654, "2017-01-28"),
            (4659, "2022-02-01"),
            (4660, "2023-01-22"),
            (4661, "2024-02-10"),
        ];
        for (year, std) in data {
            let new_year = CHINESE.new_year(year);
            assert_eq!(std, new_year.iso_gregorian());
            assert_eq!(year, CHINESE.year_of_new_year(new_year));
        }
    }

    #[test]
    fn ordinal_dates() {
        let data = [
            ((2023, 1, 22), (4660, 1, 1)),
            ((2023, 3, 21), (4660, 2, 30)),
            ((2023, 3, 22), (4660, 3, 1)),
            ((2023, 4, 20), (4660, 4, 1)),
            ((2024, 2, 9), (4660, 13, 30)),
            ((2017, 7, 23), (4654, 7, 1)),
            ((2017, 8, 22), (4654, 8, 1)),
            ((2000, 1, 1), (4636, 11, 25)),
        ];
        for ((y, m, d), (year, month, day)) in data {
            let std = OrdinalDate { year, month, day };
            let day = date(y, m, d);
            assert_eq!(std, CHINESE.date_from_iso_days(day), "{y}-{m}-{d}");
            assert_eq!(day, CHINESE.date_to_iso_days(year, month, std.day), "{y}-{m}-{d}");
        }
    }

    #[test]
    fn round_trip_over_two_years() {
        let mut day = date(2016, 11, 1);
        while day < date(2018, 3, 1) {
            let ymd = CHINESE.date_from_iso_days(day);
            assert_eq!(day, CHINESE.date_to_iso_days(ymd.year, ymd.month, ymd.day));
            day = day + 1;
        }
    }

    #[test]
    fn cyclical() {
        let day = date(2023, 1, 22);
        let found = CHINESE.cyclical_date_from_iso_days(day);
        assert_eq!(CyclicalDate { cycle: 78, year: 40, month: 1, day: 1 }, found);
        assert_eq!(day, CHINESE.cyclical_date_to_iso_days(found));
        assert_eq!(40, CHINESE.cyclic_year(4660));
    }

    #[test]
    fn year_lengths() {
        assert!(CHINESE.is_leap_year(4660));
        assert!(!CHINESE.is_leap_year(4661));
        assert_eq!(13, CHINESE.months_in_year(4654));
        assert_eq!(384, CHINESE.days_in_year(4660));
        assert_eq!(354, CHINESE.days_in_year(4661));
    }

    #[test]
    fn month_lengths() {
        // 4660 年：正月 29 日，二月 30 日，閏二月 29 日
        assert_eq!(Ok(29), CHINESE.days_in_month(4660, 1));
        assert_eq!(Ok(30), CHINESE.days_in_month(4660, 2));
        assert_eq!(Ok(29), CHINESE.days_in_month(4660, 3));
        assert_eq!(
            Err(Error::InvalidMonth { month: 0, max: 13 }),
            CHINESE.days_in_month(4660, 0)
        );
        assert_eq!(
            Err(Error::InvalidDay { day: 30, month: 1, max_day: 29 }),
            CHINESE.valid_date(4660, 1, 30)
        );
    }

    #[test]
    fn cyclical_validation() {
        assert_eq!(
            Err(Error::InvalidCyclicYear { year: 61 }),
            CHINESE.valid_cyclical_date(78, 61, 1, 1)
        );
        assert_eq!(
            Ok(CyclicalDate { cycle: 78, year: 40, month: 3, day: 1 }),
            CHINESE.valid_cyclical_date(78, 40, 3, 1)
        );
    }

    #[test]
    fn range_checks() {
        assert_eq!(
            Err(Error::OutOfRange { year: 20_000 }),
            CHINESE.days_in_month(20_000, 1)
        );
        assert_eq!(
            Err(Error::OutOfRange { year: i32::MAX as i64 }),
            CHINESE.valid_date(i32::MAX, 1, 1)
        );
    }

    #[test]
    fn oversized_coordinates_roll_forward() {
        // 不驗證的換算遇極大月日亦不溢出
        let beyond = CHINESE.new_year(4661);
        assert_eq!(date(2023, 3, 22) + 29, CHINESE.date_to_iso_days(4660, 3, 30));
        assert!(CHINESE.date_to_iso_days(4660, 1, u32::MAX) > beyond);
        assert!(CHINESE.date_to_iso_days(4660, u32::MAX, 1) > beyond);
        assert!(CHINESE.date_to_iso_days(4660, u32::MAX, u32::MAX) > beyond);
    }

    #[test]
    fn related_years() {
        for calendar in [&CHINESE, &KOREAN, &JAPANESE] {
            for year in [1, 1000, 2683, 4660] {
                let related = calendar.related_gregorian_year(year);
                assert_eq!(year, calendar.year_for_gregorian(related));
            }
            let year = calendar.year_for_gregorian(2023);
            assert_eq!(2023, calendar.new_year(year).gregorian().0, "{}", calendar.name());
        }
    }

    #[test]
    fn days_of_year() {
        assert_eq!(1, CHINESE.day_of_year(date(2023, 1, 22)));
        assert_eq!(59, CHINESE.day_of_year(date(2023, 3, 21)));
        assert_eq!(384, CHINESE.day_of_year(date(2024, 2, 9)));
    }
}
