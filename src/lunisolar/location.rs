//! 曆法所依據的觀測地點及其歷史時區

use serde::{Deserialize, Serialize};

use crate::date::Date;

/// 觀測地點，`utc_offset` 為該地標準時超前 UTC 的日數（可為小數，如北京地方平時）。
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// 緯度（度，北為正）
    pub latitude: f64,
    /// 經度（度，東為正）
    pub longitude: f64,
    /// 海拔（米）
    pub altitude: f64,
    /// 標準時與 UTC 之差（日）
    pub utc_offset: f64,
}

impl Location {
    /// 以時差小時數建立地點。
    pub const fn with_offset_hours(
        latitude: f64,
        longitude: f64,
        altitude: f64,
        hours: f64,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            utc_offset: hours / 24.0,
        }
    }
}

/// 自 `since` 當日起（`None` 表示無始）適用 `location`，直至下一時段開始。
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEra {
    #[serde(default)]
    pub since: Option<Date>,
    pub location: Location,
}

/// 在按時間排列的時段表中查出 `date` 當日的地點。
///
/// 時段表須非空，且首段無始；[`super::Lunisolar`] 建立時已驗證。
pub(crate) fn locate(eras: &[LocationEra], date: Date) -> Location {
    let idx = eras.partition_point(|era| era.since.is_none_or(|since| since <= date));
    eras[idx.saturating_sub(1)].location
}

/// 驗證時段表：非空、首段無始、其餘各段起始日嚴格遞增。
pub(crate) fn validate(eras: &[LocationEra]) -> Result<(), &'static str> {
    let (first, rest) = eras.split_first().ok_or("location table is empty")?;
    if first.since.is_some() {
        return Err("first location era must be open-ended");
    }
    let mut prev = None;
    for era in rest {
        let since = era.since.ok_or("only the first location era may be open-ended")?;
        if prev.is_some_and(|prev| prev >= since) {
            return Err("location eras must be in strictly increasing order");
        }
        prev = Some(since);
    }
    if eras.iter().any(|era| !era.location.utc_offset.is_finite()) {
        return Err("utc offset must be finite");
    }
    Ok(())
}
