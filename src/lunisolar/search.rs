//! 有界逐日（逐朔）搜索

use tracing::{trace, warn};

/// 單次搜索容許的最大步數。各搜索域內目標函數單調，實際步數不過數日；
/// 達此上限則停止搜索並記錄警告。
const MAX_STEPS: u32 = 400;

/// 自 `start` 起遞增，返回首個使 `pred` 成立的整數。
///
/// `MAX_STEPS` 步內未找到則返回 `start + MAX_STEPS`。
pub(crate) fn next(start: i32, pred: impl Fn(i32) -> bool) -> i32 {
    let mut i = start;
    for steps in 0..MAX_STEPS {
        if pred(i) {
            trace!(start, steps, "forward search finished");
            return i;
        }
        i = i.saturating_add(1);
    }
    warn!(start, steps = MAX_STEPS, "search did not converge, giving up");
    i
}

/// 自 `start` 起遞增，返回使 `pred` 連續成立的最後一個整數。
///
/// 調用方須保證 `pred(start)` 成立。
pub(crate) fn last(start: i32, pred: impl Fn(i32) -> bool) -> i32 {
    debug_assert!(pred(start), "search predicate fails at its start {start}");
    next(start.saturating_add(1), |i| !pred(i)) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_finds_first_match() {
        assert_eq!(10, next(3, |i| i * i >= 100));
        assert_eq!(3, next(3, |_| true));
        assert_eq!(-4, next(-10, |i| i > -5));
    }

    #[test]
    fn last_finds_final_match() {
        assert_eq!(9, last(3, |i| i * i < 100));
        assert_eq!(3, last(3, |i| i == 3));
    }

    #[test]
    fn searches_stop_at_the_cap() {
        let cap = MAX_STEPS as i32;
        assert_eq!(3 + cap, next(3, |_| false));
        assert_eq!(cap, last(0, |_| true));
        assert_eq!(cap - 1, next(0, |i| i == cap - 1));
    }
}
