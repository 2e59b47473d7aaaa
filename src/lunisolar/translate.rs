//! 序數月與傳統月名互換

use super::convert::YearSpan;
use super::{Error, Lunisolar, Month, OrdinalDate};

impl Lunisolar {
    /// 取得該年閏月的序數月，無閏月則為 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// assert_eq!(Some(3), CHINESE.leap_month(4660)); // 閏二月
    /// assert_eq!(None, CHINESE.leap_month(4661));
    /// ```
    pub fn leap_month(&self, year: i32) -> Option<u32> {
        self.leap_in(&self.year_span(year))
    }

    /// 逐月標記一年，找出閏月。跨冬至時才換用次一歲的邊界。
    fn leap_in(&self, span: &YearSpan) -> Option<u32> {
        if span.months() != 13 {
            return None;
        }
        let mut bracket = self.bracket(span.new_year);
        let mut start = span.new_year;
        for ordinal in 1..=13 {
            if start >= bracket.next_solstice {
                bracket = self.bracket(start);
            }
            if self.label_month(&bracket, start).is_leap() {
                return Some(ordinal);
            }
            start = self.new_moon_on_or_after(start + 1);
        }
        None
    }

    /// 該年第 `month` 月（序數月）是否為閏月。月份超出範圍者為 `false`。
    pub fn is_leap_month(&self, year: i32, month: u32) -> bool {
        self.leap_month(year) == Some(month)
    }

    /// 將序數月轉為傳統月名：閏月之後各月序數減一，閏月本身為所閏之月。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, Month};
    ///
    /// assert_eq!(Ok(Month::Common(2)), CHINESE.lunar_month_of_year(4660, 2));
    /// assert_eq!(Ok(Month::Leap(2)), CHINESE.lunar_month_of_year(4660, 3));
    /// assert_eq!(Ok(Month::Common(3)), CHINESE.lunar_month_of_year(4660, 4));
    /// ```
    pub fn lunar_month_of_year(&self, year: i32, month: u32) -> Result<Month, Error> {
        self.check_year(year)?;
        let span = self.year_span(year);
        let max = span.months();
        if !(1..=max).contains(&month) {
            return Err(Error::InvalidMonth { month, max });
        }
        Ok(match self.leap_in(&span) {
            Some(leap) if month == leap => Month::Leap(month - 1),
            Some(leap) if month > leap => Month::Common(month - 1),
            _ => Month::Common(month),
        })
    }

    /// 以傳統月名建立日期，轉為序數月表示。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, Error, Month};
    ///
    /// let date = CHINESE.new(4660, Month::Leap(2), 1).unwrap();
    /// assert_eq!((4660, 3, 1), (date.year, date.month, date.day));
    ///
    /// assert_eq!(
    ///     Err(Error::NoLeapMonth { year: 4661 }),
    ///     CHINESE.new(4661, Month::Leap(2), 1),
    /// );
    /// ```
    pub fn new(&self, year: i32, month: Month, day: u32) -> Result<OrdinalDate, Error> {
        self.check_year(year)?;
        let num = month.num();
        if !(1..=12).contains(&num) {
            return Err(Error::InvalidMonth { month: num, max: 12 });
        }
        let span = self.year_span(year);
        let ordinal = match (month, self.leap_in(&span)) {
            (Month::Leap(_), None) => return Err(Error::NoLeapMonth { year }),
            (Month::Leap(requested), Some(leap)) if requested + 1 != leap => {
                return Err(Error::LeapMonthMismatch {
                    year,
                    requested,
                    actual: leap - 1,
                });
            }
            (Month::Leap(_), Some(leap)) => leap,
            (Month::Common(num), Some(leap)) if num >= leap => num + 1,
            (Month::Common(num), _) => num,
        };
        self.checked_date(&span, year, ordinal, day)
    }
}
