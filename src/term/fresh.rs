//! Process-wide source of fresh instantiation ids

use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_ID: AtomicI64 = AtomicI64::new(0);

/// Return an id never handed out before in this process.
///
/// The only guarantee is uniqueness: the namespace is never reclaimed, and
/// concurrent callers always receive distinct values.
pub fn fresh_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = fresh_id();
        let b = fresh_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fresh_ids_increase() {
        let a = fresh_id();
        let b = fresh_id();
        assert!(b > a);
    }
}
