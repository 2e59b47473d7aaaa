//! 太陽黃經與合朔時刻的解析曆表
//!
//! 太陽黃經用 Bretagnon–Simon 的 49 項週期級數，加光行差與章動；合朔用
//! Meeus《天文算法》第 49 章的級數。兩者皆以力學時（[`Tt`]）計算，結果轉為
//! 世界時（[`Ut`]）。本模塊只負責天文時刻，不涉時區與曆法。
//!
//! 精度約為數十秒，足以判定朔與中氣所在日期；極少數臨界時刻在午夜前後者，結果
//! 可能與官方曆書相差一日。

use super::search;
use crate::time_scales::{Tt, Ut, poly};

/// 平朔望月長度（日）
pub const MEAN_SYNODIC_MONTH: f64 = 29.530588861;

/// 平回歸年長度（日）
pub const MEAN_TROPICAL_YEAR: f64 = 365.242189;

/// J2000.0 曆元（2000-01-01 12:00 TT），以 [`crate::Date`] 的日數表示。
const J2000: f64 = 730485.5;

const JULIAN_CENTURY: f64 = 36525.0;

/// 冬至時太陽黃經
pub const WINTER: f64 = 270.0;

/// 自 J2000.0 起算的儒略世紀數（力學時）
fn julian_centuries(ut: Ut) -> f64 {
    (Tt::from(ut).0 - J2000) / JULIAN_CENTURY
}

fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

#[rustfmt::skip]
const SOLAR_COEFFICIENTS: [f64; 49] = [
    403406.0, 195207.0, 119433.0, 112392.0, 3891.0, 2819.0, 1721.0, 660.0, 350.0, 334.0,
    314.0, 268.0, 242.0, 234.0, 158.0, 132.0, 129.0, 114.0, 99.0, 93.0,
    86.0, 78.0, 72.0, 68.0, 64.0, 46.0, 38.0, 37.0, 32.0, 29.0,
    28.0, 27.0, 27.0, 25.0, 24.0, 21.0, 21.0, 20.0, 18.0, 17.0,
    14.0, 13.0, 13.0, 13.0, 12.0, 10.0, 10.0, 10.0, 10.0,
];

#[rustfmt::skip]
const SOLAR_ADDENDS: [f64; 49] = [
    270.54861, 340.19128, 63.91854, 331.26220, 317.843, 86.631, 240.052, 310.26, 247.23, 260.87,
    297.82, 343.14, 166.79, 81.53, 3.50, 132.75, 182.95, 162.03, 29.8, 266.4,
    249.2, 157.6, 257.8, 185.1, 69.9, 8.0, 197.1, 250.4, 65.3, 162.7,
    341.5, 291.6, 98.5, 146.7, 110.0, 5.2, 342.6, 230.9, 256.1, 45.3,
    242.9, 115.2, 151.8, 285.3, 53.3, 126.6, 205.7, 85.9, 146.1,
];

#[rustfmt::skip]
const SOLAR_MULTIPLIERS: [f64; 49] = [
    0.9287892, 35999.1376958, 35999.4089666, 35998.7287385, 71998.20261, 71998.4403,
    36000.35726, 71997.4812, 32964.4678, -19.4410, 445267.1117, 45036.8840, 3.1008,
    22518.4434, -19.9739, 65928.9345, 9038.0293, 3034.7684, 33718.148, 3034.448,
    -2280.773, 29929.992, 31556.493, 149.588, 9037.750, 107997.405, -4444.176, 151.771,
    67555.316, 31556.080, -4561.540, 107996.706, 1221.655, 62894.167, 31437.369,
    14578.298, -31931.757, 34777.243, 1221.999, 62894.511, -4442.039, 107997.909,
    119.066, 16859.071, -4.578, 26895.292, -39.127, 12297.536, 90073.778,
];

/// 取得某時刻的太陽視黃經（度，`0.0..360.0`）。
pub fn solar_longitude(ut: Ut) -> f64 {
    let c = julian_centuries(ut);
    let series: f64 = SOLAR_COEFFICIENTS
        .iter()
        .zip(&SOLAR_ADDENDS)
        .zip(&SOLAR_MULTIPLIERS)
        .map(|((x, y), z)| x * sin_deg(y + z * c))
        .sum();
    let lambda = 282.7771834 + 36000.76953744 * c + 0.000005729577951308232 * series;
    (lambda + aberration(c) + nutation(c)).rem_euclid(360.0)
}

fn aberration(c: f64) -> f64 {
    0.0000974 * cos_deg(177.63 + 35999.01848 * c) - 0.005575
}

fn nutation(c: f64) -> f64 {
    let a = poly(c, &[124.90, -1934.134, 0.002063]);
    let b = poly(c, &[201.11, 72001.5377, 0.00057]);
    -0.004778 * sin_deg(a) - 0.0003667 * sin_deg(b)
}

/// 取得 `ut` 之後太陽黃經首次到達 `lambda` 的時刻。
///
/// 先按平均速度估計，再於估計值前後五日內二分至約一秒。
pub fn solar_longitude_after(lambda: f64, ut: Ut) -> Ut {
    let rate = MEAN_TROPICAL_YEAR / 360.0;
    let tau = ut.0 + rate * (lambda - solar_longitude(ut)).rem_euclid(360.0);
    let mut lo = ut.0.max(tau - 5.0);
    let mut hi = tau + 5.0;
    while hi - lo >= 1e-5 {
        let mid = (lo + hi) / 2.0;
        if (solar_longitude(Ut(mid)) - lambda).rem_euclid(360.0) < 180.0 {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Ut((lo + hi) / 2.0)
}

/// 估計 `ut` 或之前太陽黃經最近一次為 `lambda` 的時刻，誤差在一日內。
pub fn estimate_prior_solar_longitude(lambda: f64, ut: Ut) -> Ut {
    let rate = MEAN_TROPICAL_YEAR / 360.0;
    let tau = ut.0 - rate * (solar_longitude(ut) - lambda).rem_euclid(360.0);
    let delta = (solar_longitude(Ut(tau)) - lambda + 180.0).rem_euclid(360.0) - 180.0;
    Ut(ut.0.min(tau - rate * delta))
}

#[rustfmt::skip]
const SINE_COEFFICIENTS: [f64; 24] = [
    -0.40720, 0.17241, 0.01608, 0.01039, 0.00739, -0.00514, 0.00208, -0.00111,
    -0.00057, 0.00056, -0.00042, 0.00042, 0.00038, -0.00024, -0.00007, 0.00004,
    0.00004, 0.00003, 0.00003, -0.00003, 0.00003, -0.00002, -0.00002, 0.00002,
];
#[rustfmt::skip]
const E_FACTOR: [i32; 24] = [0, 1, 0, 0, 1, 1, 2, 0, 0, 1, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
#[rustfmt::skip]
const SOLAR_ANOMALY_COEFFICIENTS: [f64; 24] = [
    0.0, 1.0, 0.0, 0.0, -1.0, 1.0, 2.0, 0.0, 0.0, 1.0, 0.0, 1.0,
    1.0, -1.0, 2.0, 0.0, 3.0, 1.0, 0.0, 1.0, -1.0, -1.0, 1.0, 0.0,
];
#[rustfmt::skip]
const LUNAR_ANOMALY_COEFFICIENTS: [f64; 24] = [
    1.0, 0.0, 2.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 2.0, 3.0, 0.0,
    0.0, 2.0, 1.0, 2.0, 0.0, 1.0, 2.0, 1.0, 1.0, 1.0, 3.0, 4.0,
];
#[rustfmt::skip]
const MOON_ARGUMENT_COEFFICIENTS: [f64; 24] = [
    0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, -2.0, 2.0, 0.0, 0.0, 2.0,
    -2.0, 0.0, 0.0, -2.0, 0.0, -2.0, 2.0, 2.0, 2.0, -2.0, 0.0, 0.0,
];

#[rustfmt::skip]
const PLANETARY_ADDENDS: [f64; 13] = [
    251.88, 251.83, 349.42, 84.66, 141.74, 207.14, 154.84, 34.52, 207.19, 291.34,
    161.72, 239.56, 331.55,
];
#[rustfmt::skip]
const PLANETARY_MULTIPLIERS: [f64; 13] = [
    0.016321, 26.651886, 36.412478, 18.206239, 53.303771, 2.453732, 7.306860,
    27.261239, 0.121824, 1.844379, 24.198154, 25.513099, 3.592518,
];
#[rustfmt::skip]
const PLANETARY_FACTORS: [f64; 13] = [
    0.000165, 0.000164, 0.000126, 0.000110, 0.000062, 0.000060, 0.000056, 0.000047,
    0.000042, 0.000040, 0.000037, 0.000035, 0.000023,
];

/// 第 0 個朔在 J2000.0 之前的序數（公元 1 年 1 月的朔）
const NEW_MOON_ZERO: i32 = 24724;

/// 取得第 `n` 個朔的時刻，第 0 個為公元 1 年 1 月 11 日前後的朔。
pub fn nth_new_moon(n: i32) -> Ut {
    let k = (n - NEW_MOON_ZERO) as f64;
    let c = k / 1236.85;
    let approx = J2000
        + poly(
            c,
            &[
                5.09766,
                MEAN_SYNODIC_MONTH * 1236.85,
                0.00015437,
                -0.000000150,
                0.00000000073,
            ],
        );
    let e = poly(c, &[1.0, -0.002516, -0.0000074]);
    let solar_anomaly = poly(c, &[2.5534, 1236.85 * 29.10535670, -0.0000014, -0.00000011]);
    let lunar_anomaly = poly(
        c,
        &[201.5643, 385.81693528 * 1236.85, 0.0107582, 0.00001238, -0.000000058],
    );
    let moon_argument = poly(
        c,
        &[160.7108, 390.67050284 * 1236.85, -0.0016118, -0.00000227, 0.000000011],
    );
    let omega = poly(c, &[124.7746, -1.56375588 * 1236.85, 0.0020672, 0.00000215]);

    let periodic: f64 = (0..24)
        .map(|i| {
            SINE_COEFFICIENTS[i]
                * e.powi(E_FACTOR[i])
                * sin_deg(
                    SOLAR_ANOMALY_COEFFICIENTS[i] * solar_anomaly
                        + LUNAR_ANOMALY_COEFFICIENTS[i] * lunar_anomaly
                        + MOON_ARGUMENT_COEFFICIENTS[i] * moon_argument,
                )
        })
        .sum();
    let correction = -0.00017 * sin_deg(omega) + periodic;
    let extra = 0.000325 * sin_deg(poly(c, &[299.77, 132.8475848, -0.009173]));
    let additional: f64 = PLANETARY_ADDENDS
        .iter()
        .zip(&PLANETARY_MULTIPLIERS)
        .zip(&PLANETARY_FACTORS)
        .map(|((i, j), l)| l * sin_deg(i + j * k))
        .sum();

    Ut::from(Tt(approx + correction + extra + additional))
}

/// 依平朔估計 `ut` 附近的朔序數，實際的朔與此相差不過一二。
fn mean_new_moon_index(ut: Ut) -> i32 {
    ((ut.0 - J2000 - 5.09766) / MEAN_SYNODIC_MONTH).floor() as i32 + NEW_MOON_ZERO
}

/// 取得嚴格早於 `ut` 的最後一個朔。
pub fn new_moon_before(ut: Ut) -> Ut {
    let start = mean_new_moon_index(ut) - 2;
    nth_new_moon(search::last(start, |n| nth_new_moon(n) < ut))
}

/// 取得 `ut` 或之後的第一個朔。
pub fn new_moon_at_or_after(ut: Ut) -> Ut {
    let start = mean_new_moon_index(ut) - 2;
    nth_new_moon(search::next(start, |n| nth_new_moon(n) >= ut))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;

    fn ut(y: i32, m: i32, d: i32, hours: f64) -> Ut {
        Ut(Date::from_gregorian(y, m, d).unwrap().midnight() + hours / 24.0)
    }

    fn angle_diff(a: f64, b: f64) -> f64 {
        (a - b + 180.0).rem_euclid(360.0) - 180.0
    }

    #[test]
    fn solar_longitude_at_equinoxes_and_solstices() {
        // 2000 年春分 03-20 07:35 UT，夏至 06-21 01:48 UT，冬至 12-21 13:37 UT
        let data = [
            (ut(2000, 3, 20, 7.0 + 35.0 / 60.0), 0.0),
            (ut(2000, 6, 21, 1.0 + 48.0 / 60.0), 90.0),
            (ut(2000, 12, 21, 13.0 + 37.0 / 60.0), 270.0),
        ];
        for (t, expected) in data {
            let lon = solar_longitude(t);
            assert!(angle_diff(lon, expected).abs() < 0.01, "{t:?}: {lon}");
        }
    }

    #[test]
    fn solar_longitude_after_matches_target() {
        let start = ut(2022, 12, 1, 0.0);
        let solstice = solar_longitude_after(WINTER, start);
        // 2022 年冬至 12-21 21:48 UT
        assert!((solstice.0 - ut(2022, 12, 21, 21.8).0).abs() < 0.01);
        assert!(angle_diff(solar_longitude(solstice), WINTER).abs() < 1e-3);
    }

    #[test]
    fn estimate_prior_is_close() {
        let from = ut(2023, 6, 1, 0.0);
        let estimate = estimate_prior_solar_longitude(WINTER, from);
        assert!((estimate.0 - ut(2022, 12, 21, 21.8).0).abs() < 1.0);
        assert!(estimate <= from);
    }

    #[test]
    fn new_moons() {
        // 2000-01-06 18:14 UT，2023-01-21 20:53 UT，1998-01-28 06:01 UT
        let data = [
            ut(2000, 1, 6, 18.0 + 14.0 / 60.0),
            ut(2023, 1, 21, 20.0 + 53.0 / 60.0),
            ut(1998, 1, 28, 6.0 + 1.0 / 60.0),
        ];
        for expected in data {
            let found = new_moon_at_or_after(Ut(expected.0 - 3.0));
            assert!((found.0 - expected.0).abs() < 10.0 / 1440.0, "{found:?} vs {expected:?}");
            let before = new_moon_before(Ut(expected.0 + 3.0));
            assert_eq!(found, before);
        }
    }

    #[test]
    fn new_moon_search_is_strict() {
        let moon = new_moon_at_or_after(ut(2023, 1, 1, 0.0));
        assert_eq!(moon, new_moon_at_or_after(moon));
        assert!(new_moon_before(moon) < moon);
        assert!(moon.0 - new_moon_before(moon).0 > 29.0);
    }

    #[test]
    fn consecutive_new_moons() {
        let mut prev = nth_new_moon(24724);
        for n in 24725..24725 + 40 {
            let moon = nth_new_moon(n);
            let gap = moon.0 - prev.0;
            assert!((29.2..29.9).contains(&gap), "lunation {n}: {gap}");
            prev = moon;
        }
    }
}
