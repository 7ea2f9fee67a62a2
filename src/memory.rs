//! Bounded accounting for filter-owned string bounds.
//!
//! A [`MemoryBudget`] is shared by every string filter of a query fragment.
//! Materializing a bound reserves its size up front; when the reservation is
//! refused the filter gives up its bounds instead of failing the query.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

#[derive(Debug)]
pub struct MemoryBudget {
    limit: usize,
    used: AtomicUsize,
}

impl MemoryBudget {
    pub fn new(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            limit,
            used: AtomicUsize::new(0),
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn used(&self) -> usize {
        self.used.load(Ordering::Acquire)
    }

    /// Reserve `bytes`, `None` if that would exceed the limit.
    pub fn try_reserve(self: &Arc<Self>, bytes: usize) -> Option<Reservation> {
        self.grow(bytes)?;
        Some(Reservation {
            budget: Arc::clone(self),
            bytes,
        })
    }

    fn grow(&self, bytes: usize) -> Option<()> {
        self.used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(bytes).filter(|total| *total <= self.limit)
            })
            .ok()
            .map(|_| ())
    }

    fn shrink(&self, bytes: usize) {
        self.used.fetch_sub(bytes, Ordering::AcqRel);
    }
}

/// Bytes held against a [`MemoryBudget`], released on drop.
#[derive(Debug)]
pub struct Reservation {
    budget: Arc<MemoryBudget>,
    bytes: usize,
}

impl Reservation {
    pub fn size(&self) -> usize {
        self.bytes
    }

    /// Resize to `bytes`. On failure the reservation keeps its old size.
    pub fn try_resize(&mut self, bytes: usize) -> bool {
        if bytes > self.bytes {
            if self.budget.grow(bytes - self.bytes).is_none() {
                return false;
            }
        } else {
            self.budget.shrink(self.bytes - bytes);
        }
        self.bytes = bytes;
        true
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.budget.shrink(self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservations_are_bounded() {
        let budget = MemoryBudget::new(100);
        let first = budget.try_reserve(60).unwrap();
        assert!(budget.try_reserve(41).is_none());
        let second = budget.try_reserve(40).unwrap();
        assert_eq!(budget.used(), 100);

        drop(first);
        assert_eq!(budget.used(), 40);
        drop(second);
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn resize_keeps_old_size_on_failure() {
        let budget = MemoryBudget::new(10);
        let mut reservation = budget.try_reserve(4).unwrap();
        assert!(!reservation.try_resize(11));
        assert_eq!(reservation.size(), 4);
        assert!(reservation.try_resize(10));
        assert_eq!(budget.used(), 10);
        assert!(reservation.try_resize(2));
        assert_eq!(budget.used(), 2);
    }
}
