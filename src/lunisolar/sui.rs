//! 「歲」與歲首
//!
//! 「歲」為相鄰兩冬至間的時段。置閏以歲為單位：歲內（十二月首至次一冬至所在月前）
//! 有十三個朔則為閏歲，閏首個無中氣之月。

use tracing::debug;

use super::lunation::lunations;
use super::{Lunisolar, Month, MonthAndLeap, NewMoon};
use crate::date::Date;

/// 一歲的邊界
#[derive(Debug, Copy, Clone)]
pub(crate) struct Bracket {
    /// 該歲始端的冬至
    pub solstice: Date,
    /// 該歲末端的冬至
    pub next_solstice: Date,
    /// 冬至後首月（十二月或閏十一月）之首
    pub m12: Date,
    /// 是否閏歲
    pub leap: bool,
}

impl Lunisolar {
    /// 取得 `date` 或之前最近一個冬至所開始的歲。
    pub(crate) fn bracket(&self, date: Date) -> Bracket {
        let solstice = self.december_solstice_on_or_before(date);
        let next_solstice = self.december_solstice_on_or_before(solstice + 370);
        let m12 = self.new_moon_on_or_after(solstice + 1);
        let next_m11 = self.new_moon_before(next_solstice + 1);
        Bracket {
            solstice,
            next_solstice,
            m12,
            // 十二月首至次一十一月首間有十二個朔望月，則歲有十三個月
            leap: lunations(m12, next_m11) == 12,
        }
    }

    /// 自 `bracket` 內某月首 `start` 回溯至十二月首，其間是否有無中氣之月。
    fn prior_leap(&self, bracket: &Bracket, start: Date) -> bool {
        let mut month = start;
        while month >= bracket.m12 {
            if self.no_major_solar_term(month) {
                return true;
            }
            month = self.new_moon_before(month);
        }
        false
    }

    /// 在已知歲邊界下分解以 `start` 為首的月。
    pub(crate) fn label_month(&self, bracket: &Bracket, start: Date) -> Month {
        let here = bracket.leap && start >= bracket.m12 && self.no_major_solar_term(start);
        let earlier = bracket.leap && self.prior_leap(bracket, self.new_moon_before(start));
        let cardinal = super::amod(lunations(bracket.m12, start) - (here || earlier) as i32, 12);
        if here && !earlier {
            Month::Leap(cardinal as u32)
        } else {
            Month::Common(cardinal as u32)
        }
    }

    /// 取得 `date` 所在月的序數月、月名與月首。閏月以此為唯一判定。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, Month};
    ///
    /// let date = Date::from_gregorian(2017, 8, 1).unwrap();
    /// let found = CHINESE.month_and_leap(date);
    /// assert_eq!(Month::Leap(6), found.month);
    /// assert_eq!(7, found.ordinal);
    /// assert_eq!("2017-07-23", found.start.iso_gregorian());
    /// ```
    pub fn month_and_leap(&self, date: Date) -> MonthAndLeap {
        let bracket = self.bracket(date);
        let start = self.new_moon_before(date + 1);
        let month = self.label_month(&bracket, start);
        let ordinal = lunations(self.new_year_on_or_before(date), start) + 1;
        MonthAndLeap {
            ordinal: ordinal as u32,
            month,
            start,
        }
    }

    /// 取得 `date` 或之前最近一個冬至所開始之歲內的歲首（正月初一）。
    ///
    /// 閏歲中若十二月或十三月首無中氣（即閏十一月或閏十二月），歲首順延一月。
    pub fn new_year_in_sui(&self, date: Date) -> Date {
        let bracket = self.bracket(date);
        let m13 = self.new_moon_on_or_after(bracket.m12 + 1);
        if bracket.leap
            && (self.no_major_solar_term(bracket.m12) || self.no_major_solar_term(m13))
        {
            let new_year = self.new_moon_on_or_after(m13 + 1);
            debug!(
                calendar = %self.name,
                solstice = %bracket.solstice.iso_gregorian(),
                new_year = %new_year.iso_gregorian(),
                "leap month before new year, new year delayed"
            );
            new_year
        } else {
            m13
        }
    }

    /// 取得 `date` 當日或之前最近的歲首。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::CHINESE;
    ///
    /// let date = Date::from_gregorian(2023, 5, 1).unwrap();
    /// assert_eq!("2023-01-22", CHINESE.new_year_on_or_before(date).iso_gregorian());
    /// ```
    pub fn new_year_on_or_before(&self, date: Date) -> Date {
        let new_year = self.new_year_in_sui(date);
        if date >= new_year {
            new_year
        } else {
            debug!(
                calendar = %self.name,
                date = %date.iso_gregorian(),
                "date precedes new year of its sui, looking 180 days back"
            );
            self.new_year_in_sui(date - 180)
        }
    }

    /// 取得 `date` 所在的歲，列出其全部月首。
    ///
    /// 所在歲以 `date` 所在月定：冬至所在月（十一月）屬前一歲之末。
    ///
    /// # 用例
    ///
    /// ```
    /// use kalendarilo_lunisolar::Date;
    /// use kalendarilo_lunisolar::lunisolar::{CHINESE, Month::*};
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// let sui = CHINESE.sui(date);
    ///
    /// assert_eq!(Ok((4636, Common(11), 25)), sui.ymd_for(date));
    /// ```
    pub fn sui(&self, date: Date) -> Sui {
        let bracket = self.bracket(self.new_moon_before(date + 1));
        let next = self.bracket(bracket.next_solstice);
        let mut months = Vec::with_capacity(14);
        let mut start = bracket.m12;
        while start < next.m12 {
            let month = self.label_month(&bracket, start);
            months.push(NewMoon { month, date: start });
            start = self.new_moon_on_or_after(start + 1);
        }
        let month = self.label_month(&next, next.m12);
        months.push(NewMoon { month, date: next.m12 });

        let new_year = self.new_year_in_sui(bracket.solstice);
        Sui {
            year: self.year_of_new_year(new_year),
            solstice: bracket.solstice,
            next_solstice: bracket.next_solstice,
            leap: bracket.leap,
            new_year,
            months,
        }
    }
}

/// 一歲的月表，自冬至後首月（十二月或閏十一月）至次歲同月。
///
/// 由 [`Lunisolar::sui`] 取得。
#[derive(Debug, Clone, PartialEq)]
pub struct Sui {
    /// 歲內正月所屬之年（自曆元起算）
    pub year: i32,
    /// 始端冬至所在日期
    pub solstice: Date,
    /// 末端冬至所在日期
    pub next_solstice: Date,
    /// 是否閏歲（有十三個月）
    pub leap: bool,
    /// 歲內正月初一
    pub new_year: Date,
    /// 全部月首，包括次一歲首月用以標記本歲最末日
    pub months: Vec<NewMoon>,
}

impl Sui {
    /// 取得給定日期在該歲的年月日，返回格式為 `(年, 月, 日)`，年自曆元起算。
    ///
    /// 若所給日期不在該歲，則回報 `Err` 並指出該日期在該歲之前還是之後。
    pub fn ymd_for(&self, date: Date) -> Result<(i32, Month, u32), OtherSui> {
        let (first, rest) = self.months.split_first().ok_or(OtherSui::Before)?;
        let end = rest.last().map_or(first.date, |m| m.date);

        if date < first.date {
            return Err(OtherSui::Before);
        } else if date >= end {
            return Err(OtherSui::After);
        }

        let idx = self.months.partition_point(|m| m.date <= date) - 1;
        let m = self.months[idx];
        let y = if m.date < self.new_year {
            self.year - 1
        } else {
            self.year
        };
        Ok((y, m.month, (date - m.date + 1) as u32))
    }
}

/// 表示給定日期不在該歲，並指出其在前還是在後。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OtherSui {
    Before,
    After,
}
