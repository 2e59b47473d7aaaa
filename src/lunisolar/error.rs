//! 建立日期與配置曆法時的錯誤

/// [`super::Lunisolar`] 各可失敗操作的錯誤類型。
///
/// 自絕對日期換算永不失敗，只驗證調用方給出的年月日及曆法配置。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// 所求之年無閏月
    #[error("year {year} has no leap month")]
    NoLeapMonth {
        /// 所求之年（自曆元起算）
        year: i32,
    },

    /// 所求閏月並非該年的閏月
    #[error("leap month {requested} requested, but the leap month of year {year} follows month {actual}")]
    LeapMonthMismatch {
        /// 所求之年（自曆元起算）
        year: i32,
        /// 所求閏月所閏之月
        requested: u32,
        /// 該年閏月實際所閏之月
        actual: u32,
    },

    /// 月份超出該年月數
    #[error("invalid month: {month} (must be 1..={max})")]
    InvalidMonth {
        /// 所給月份
        month: u32,
        /// 最大有效月份
        max: u32,
    },

    /// 日數超出該月日數
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// 所給日數
        day: u32,
        /// 所在序數月
        month: u32,
        /// 該月日數，29 或 30
        max_day: u32,
    },

    /// 週內年不在 `1..=60`
    #[error("invalid cyclic year: {year} (must be 1..=60)")]
    InvalidCyclicYear {
        /// 所給週內年
        year: u32,
    },

    /// 所對應公元年超出支援範圍
    #[error("year {year} is out of the supported range")]
    OutOfRange {
        /// 所求之年（自曆元起算）
        year: i64,
    },

    /// 曆法配置中的地點時段表無效
    #[error("invalid location table: {reason}")]
    InvalidLocationTable {
        /// 無效之處
        reason: &'static str,
    },
}

impl Error {
    /// 錯誤是否表示所求日期不存在
    pub fn is_invalid_date(&self) -> bool {
        matches!(
            self,
            Error::NoLeapMonth { .. }
                | Error::LeapMonthMismatch { .. }
                | Error::InvalidMonth { .. }
                | Error::InvalidDay { .. }
                | Error::InvalidCyclicYear { .. }
        )
    }
}
