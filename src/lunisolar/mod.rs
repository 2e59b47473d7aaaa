//! Lunisolar calendars: Chinese, Korean and Japanese
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 三種曆法同出一法：以定朔定月，以冬至所在月為十一月，一「歲」（兩冬至間）有十三個
//! 朔則置閏，閏於首個無中氣之月。各曆只在曆元與觀測地點（含歷史時區）上不同，見
//! [`Lunisolar`]。天文時刻由 [`ephemeris`] 計算。
//!
//! 年有兩種表示：
//!
//! - 序數月：年內各月依次編為 `1..=12`，閏年為 `1..=13`，不標閏，見 [`OrdinalDate`]、
//!   [`CyclicalDate`]；
//! - 傳統月名：`1..=12` 並標明是否閏月，見 [`Month`]。
//!
//! 兩者之間的換算須知該年閏月所在，見 [`Lunisolar::lunar_month_of_year`] 與
//! [`Lunisolar::new`]。
//!
//! # 用例
//!
//! ```
//! use kalendarilo_lunisolar::Date;
//! use kalendarilo_lunisolar::lunisolar::{CHINESE, Month};
//!
//! let date = Date::from_gregorian(2023, 3, 22).unwrap();
//! let ymd = CHINESE.date_from_iso_days(date);
//! assert_eq!((4660, 3, 1), (ymd.year, ymd.month, ymd.day));
//! assert_eq!(Ok(Month::Leap(2)), CHINESE.lunar_month_of_year(4660, 3));
//! ```

use std::borrow::Cow;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::date::Date;

mod convert;
mod cycle;
pub mod ephemeris;
mod error;
mod location;
mod lunation;
mod search;
mod solar_term;
mod sui;
mod translate;
mod variants;

pub use cycle::{amod, cycle_and_year, elapsed_years, sexagenary_for_year};
pub use error::Error;
pub use location::{Location, LocationEra};
pub use solar_term::SolarTerm;
pub use sui::{OtherSui, Sui};
pub use variants::{CHINESE, JAPANESE, KOREAN};

/// 支持的公元年範圍（天文紀年），超出者由可失敗的接口回報 [`Error::OutOfRange`]。
pub const SUPPORTED_YEARS: RangeInclusive<i32> = -9999..=9999;

/// 一種陰陽曆：曆元與觀測地點時段表。
///
/// 本類型為純數據，可由任意 serde 格式讀入（讀入時驗證時段表）；內置三種見
/// [`CHINESE`]、[`KOREAN`]、[`JAPANESE`]。所有計算皆為純函數，可在多線程中共用。
///
/// # 用例
///
/// ```
/// use kalendarilo_lunisolar::Date;
/// use kalendarilo_lunisolar::lunisolar::{Location, LocationEra, Lunisolar};
///
/// let beijing = Location::with_offset_hours(39.9, 116.4, 43.5, 8.0);
/// let calendar = Lunisolar::custom(
///     "beijing-standard-time",
///     Date::from_gregorian(-2636, 2, 15).unwrap(),
///     vec![LocationEra { since: None, location: beijing }],
/// )
/// .unwrap();
///
/// let new_year = Date::from_gregorian(2023, 1, 22).unwrap();
/// assert_eq!(new_year, calendar.new_year(4660));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Config")]
pub struct Lunisolar {
    name: Cow<'static, str>,
    epoch: Date,
    eras: Cow<'static, [LocationEra]>,
}

/// [`Lunisolar`] 讀入時的未驗證形式
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Config {
    name: String,
    epoch: Date,
    eras: Vec<LocationEra>,
}

impl TryFrom<Config> for Lunisolar {
    type Error = Error;
    fn try_from(config: Config) -> Result<Self, Error> {
        Lunisolar::custom(config.name, config.epoch, config.eras)
    }
}

impl Lunisolar {
    /// 建立一種曆法。`epoch` 為第 1 年正月前後的日期，`eras` 為按時間排列的觀測地點
    /// 時段表，首段須無始。
    pub fn custom(
        name: impl Into<String>,
        epoch: Date,
        eras: Vec<LocationEra>,
    ) -> Result<Self, Error> {
        location::validate(&eras).map_err(|reason| Error::InvalidLocationTable { reason })?;
        Ok(Self {
            name: Cow::Owned(name.into()),
            epoch,
            eras: Cow::Owned(eras),
        })
    }

    /// 以靜態數據建立，供內置曆法使用；時段表的正確性由測試保證。
    const fn from_static(name: &'static str, epoch: Date, eras: &'static [LocationEra]) -> Self {
        Self {
            name: Cow::Borrowed(name),
            epoch,
            eras: Cow::Borrowed(eras),
        }
    }

    /// 曆法名稱
    pub fn name(&self) -> &str {
        &self.name
    }
    /// 曆元
    pub fn epoch(&self) -> Date {
        self.epoch
    }
    /// 觀測地點時段表
    pub fn eras(&self) -> &[LocationEra] {
        &self.eras
    }
    /// 取得 `date` 當日的觀測地點。每次天文查詢都按所涉時刻重新查表。
    pub fn location(&self, date: Date) -> Location {
        location::locate(&self.eras, date)
    }
}

/// 月名，`Common` 為平月，`Leap` 為閏月（數字為其所閏之月）。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序號，無論平閏。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 閏月為 `true`，平月為 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
}

/// 以序數月表示的日期，`year` 為自曆元起算的年數。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct OrdinalDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// 以六十年週期紀年、序數月表示的日期。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CyclicalDate {
    pub cycle: i32,
    /// 週內年，`1..=60`
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl CyclicalDate {
    /// 自曆元起算的年數
    pub fn elapsed_years(&self) -> i32 {
        elapsed_years(self.cycle, self.year)
    }
    /// 轉為序數月日期
    pub fn ordinal(&self) -> OrdinalDate {
        OrdinalDate {
            year: self.elapsed_years(),
            month: self.month,
            day: self.day,
        }
    }
}

impl From<OrdinalDate> for CyclicalDate {
    fn from(date: OrdinalDate) -> Self {
        let (cycle, year) = cycle_and_year(date.year);
        CyclicalDate {
            cycle,
            year,
            month: date.month,
            day: date.day,
        }
    }
}

/// 某月的完整分解：序數月、傳統月名（含閏）、月首日期。
///
/// 由 [`Lunisolar::month_and_leap`] 取得，是判定閏月的唯一依據。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MonthAndLeap {
    pub ordinal: u32,
    pub month: Month,
    pub start: Date,
}

/// 月首信息
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NewMoon {
    /// 月名
    pub month: Month,
    /// 月首所在日期
    pub date: Date,
}
