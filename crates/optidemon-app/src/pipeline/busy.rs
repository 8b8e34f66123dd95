//! Single in-flight run guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "a run is active" flag.
///
/// Acquisition hands out a [`BusyGuard`]; the flag clears when the guard is
/// dropped, on every exit path including unwinding.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or `None` if a run already holds it.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(self.0.clone()))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Proof that the caller owns the busy flag.
#[derive(Debug)]
#[must_use = "the run is only guarded while the BusyGuard is alive"]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused() {
        let flag = BusyFlag::new();
        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.is_busy());
        assert!(flag.try_acquire().is_none());
    }

    #[test]
    fn test_drop_releases() {
        let flag = BusyFlag::new();
        {
            let _guard = flag.try_acquire().unwrap();
        }
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn test_panic_releases() {
        let flag = BusyFlag::new();
        let cloned = flag.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = cloned.try_acquire().unwrap();
            panic!("stage blew up");
        });
        assert!(result.is_err());
        assert!(!flag.is_busy());
    }
}
