//! 以當地標準時定朔日

use super::Lunisolar;
use super::ephemeris::{self, MEAN_SYNODIC_MONTH};
use crate::date::Date;
use crate::time_scales::Ut;

impl Lunisolar {
    /// 當地 `date` 零時對應的世界時
    pub(crate) fn midnight(&self, date: Date) -> Ut {
        Ut::from_standard(date.midnight(), self.location(date).utc_offset)
    }

    /// 世界時刻在當地所屬的日期
    pub(crate) fn local_date(&self, ut: Ut) -> Date {
        let location = self.location(Date::from_moment(ut.0));
        ut.date_in_timezone(location.utc_offset)
    }

    /// 取得嚴格早於當地 `date` 零時的最後一個朔所在日期。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// let new_moon = Date::from_gregorian(2023, 1, 22).unwrap();
    /// assert_eq!(new_moon, CHINESE.new_moon_before(new_moon + 1));
    /// assert!(CHINESE.new_moon_before(new_moon) < new_moon - 28);
    /// ```
    pub fn new_moon_before(&self, date: Date) -> Date {
        self.local_date(ephemeris::new_moon_before(self.midnight(date)))
    }

    /// 取得當地 `date` 零時或之後的第一個朔所在日期。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// let new_moon = Date::from_gregorian(2023, 1, 22).unwrap();
    /// assert_eq!(new_moon, CHINESE.new_moon_on_or_after(new_moon - 10));
    /// assert_eq!(new_moon, CHINESE.new_moon_on_or_after(new_moon));
    /// ```
    pub fn new_moon_on_or_after(&self, date: Date) -> Date {
        self.local_date(ephemeris::new_moon_at_or_after(self.midnight(date)))
    }
}

/// 兩個朔日之間相隔的朔望月數（取整）
pub(crate) fn lunations(from: Date, to: Date) -> i32 {
    ((to - from) as f64 / MEAN_SYNODIC_MONTH).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunisolar::{CHINESE, KOREAN};

    fn date(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn new_moon_days() {
        // 2000 年各月朔日（北京時間）
        let stds = [
            "1999-12-08", "2000-01-07", "2000-02-05", "2000-03-06", "2000-04-05",
            "2000-05-04", "2000-06-02", "2000-07-02", "2000-07-31", "2000-08-29",
            "2000-09-28", "2000-10-27", "2000-11-26",
        ];
        let mut moon = CHINESE.new_moon_on_or_after(date(1999, 12, 1));
        for std in stds {
            assert_eq!(std, moon.iso_gregorian());
            moon = CHINESE.new_moon_on_or_after(moon + 1);
        }
    }

    #[test]
    fn local_time_decides_the_day() {
        // 2012-04-21 07:18 UT 合朔：北京 15:18，首爾 16:18，同日；
        // 2023-01-21 20:53 UT 合朔：北京 04:53，首爾 05:53，皆為次日。
        assert_eq!(date(2012, 4, 21), CHINESE.new_moon_on_or_after(date(2012, 4, 15)));
        assert_eq!(date(2012, 4, 21), KOREAN.new_moon_on_or_after(date(2012, 4, 15)));
        assert_eq!(date(2023, 1, 22), KOREAN.new_moon_on_or_after(date(2023, 1, 15)));
    }

    #[test]
    fn before_and_after_agree() {
        let mut day = date(1990, 1, 1);
        while day < date(1992, 1, 1) {
            let before = CHINESE.new_moon_before(day);
            let after = CHINESE.new_moon_on_or_after(day);
            assert!(before < day && day <= after, "{}", day.iso_gregorian());
            assert_eq!(after, CHINESE.new_moon_on_or_after(before + 1), "{}", day.iso_gregorian());
            assert!((29..=30).contains(&(after - before)) || after == day);
            day = day + 5;
        }
    }

    #[test]
    fn counting_lunations() {
        assert_eq!(0, lunations(date(2023, 1, 22), date(2023, 1, 22)));
        assert_eq!(1, lunations(date(2023, 1, 22), date(2023, 2, 20)));
        assert_eq!(12, lunations(date(2023, 1, 22), date(2024, 1, 11)));
        assert_eq!(-1, lunations(date(2023, 2, 20), date(2023, 1, 22)));
    }
}
