//! 六十年一週的紀年算術

/// 取值於 `1..=m` 的模（`m` 為正），即 `x` 同餘於結果而結果不為 0。
///
/// # 用例
///
/// ```
/// use kalendarilo_lunisolar::lunisolar::amod;
///
/// assert_eq!(12, amod(0, 12));
/// assert_eq!(11, amod(-1, 12));
/// assert_eq!(1, amod(13, 12));
/// ```
pub fn amod(x: i32, m: i32) -> i32 {
    match x.rem_euclid(m) {
        0 => m,
        r => r,
    }
}

/// 將自曆元起算的年數轉為 `(週, 週內年)`，週內年取值 `1..=60`。
///
/// 與 [`elapsed_years`] 互逆，對零及負數同樣成立（週數為 0 或負）。
///
/// # 用例
///
/// ```
/// use kalendarilo_lunisolar::lunisolar::cycle_and_year;
///
/// assert_eq!((78, 40), cycle_and_year(4660));
/// assert_eq!((1, 60), cycle_and_year(60));
/// assert_eq!((0, 60), cycle_and_year(0));
/// ```
pub fn cycle_and_year(elapsed_years: i32) -> (i32, u32) {
    (
        1 + (elapsed_years - 1).div_euclid(60),
        amod(elapsed_years, 60) as u32,
    )
}

/// 將 `(週, 週內年)` 轉回自曆元起算的年數。
pub fn elapsed_years(cycle: i32, year: u32) -> i32 {
    (cycle - 1) * 60 + year as i32
}

/// 取得所給公元年（天文紀年）的干支序號，1 為甲子、60 為癸亥。
///
/// # 用例
///
/// ```
/// use kalendarilo_lunisolar::lunisolar::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// assert_eq!(40, sexagenary_for_year(2023)); // 癸卯
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    (year.rem_euclid(60) as u32 + 2696) % 60 + 1
}
