//! 內置曆法：中國農曆、朝鮮檀紀曆、日本和曆

use super::{Location, LocationEra, Lunisolar};
use crate::date::Date;

const fn ymd(year: i32, month: i32, day: i32) -> Date {
    match Date::from_gregorian(year, month, day) {
        Some(date) => date,
        None => panic!("invalid date in calendar table"),
    }
}

const fn since(year: i32, month: i32, day: i32, location: Location) -> LocationEra {
    LocationEra {
        since: Some(ymd(year, month, day)),
        location,
    }
}

const BEIJING_LATITUDE: f64 = 39.0 + 55.0 / 60.0;
const BEIJING_LONGITUDE: f64 = 116.0 + 25.0 / 60.0;

const fn beijing(hours: f64) -> Location {
    Location::with_offset_hours(BEIJING_LATITUDE, BEIJING_LONGITUDE, 43.5, hours)
}

const CHINESE_ERAS: [LocationEra; 2] = [
    // 北京地方平時
    LocationEra {
        since: None,
        location: beijing(1397.0 / 180.0),
    },
    since(1929, 1, 1, beijing(8.0)),
];

const SEOUL_LATITUDE: f64 = 37.0 + 34.0 / 60.0;
const SEOUL_LONGITUDE: f64 = 126.0 + 58.0 / 60.0;

const fn seoul(hours: f64) -> Location {
    Location::with_offset_hours(SEOUL_LATITUDE, SEOUL_LONGITUDE, 0.0, hours)
}

const KOREAN_ERAS: [LocationEra; 5] = [
    // 首爾地方平時
    LocationEra {
        since: None,
        location: seoul(3809.0 / 450.0),
    },
    since(1908, 4, 1, seoul(8.5)),
    since(1912, 1, 1, seoul(9.0)),
    since(1954, 3, 21, seoul(8.5)),
    since(1961, 8, 10, seoul(9.0)),
];

const JAPANESE_ERAS: [LocationEra; 2] = [
    // 東京地方平時
    LocationEra {
        since: None,
        location: Location::with_offset_hours(35.7, 139.77, 24.0, 9.0 + 143.0 / 450.0),
    },
    // 日本標準時子午線
    since(1888, 1, 1, Location::with_offset_hours(35.0, 135.0, 0.0, 9.0)),
];

/// 中國農曆（夏曆），曆元為黃帝紀元元年（公元前 2637 年）正月前後。
pub const CHINESE: Lunisolar = Lunisolar::from_static("chinese", ymd(-2636, 2, 15), &CHINESE_ERAS);

/// 朝鮮半島陰曆，以檀君紀元紀年。
pub const KOREAN: Lunisolar = Lunisolar::from_static("korean", ymd(-2332, 2, 15), &KOREAN_ERAS);

/// 日本舊曆（天保曆以後之定氣法），以皇紀紀年。
pub const JAPANESE: Lunisolar =
    Lunisolar::from_static("japanese", ymd(-659, 2, 11), &JAPANESE_ERAS);
