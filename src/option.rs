use std::sync::Arc;

use crate::memory::MemoryBudget;

/// Longest string bound a materialized filter keeps, in bytes.
pub const DEFAULT_MAX_BOUND_LENGTH: usize = 1024;

/// Construction options shared by every filter a factory call creates.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    pub(crate) max_bound_length: usize,
    pub(crate) memory_budget: Option<Arc<MemoryBudget>>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            max_bound_length: DEFAULT_MAX_BOUND_LENGTH,
            memory_budget: None,
        }
    }
}

impl FilterOptions {
    /// Panics if `max_bound_length` is zero.
    pub fn max_bound_length(self, max_bound_length: usize) -> Self {
        assert!(max_bound_length > 0, "max_bound_length must be positive");
        FilterOptions {
            max_bound_length,
            ..self
        }
    }

    pub fn memory_budget(self, memory_budget: Arc<MemoryBudget>) -> Self {
        FilterOptions {
            memory_budget: Some(memory_budget),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let options = FilterOptions::default();
        assert_eq!(options.max_bound_length, 1024);
        assert!(options.memory_budget.is_none());

        let budget = MemoryBudget::new(64);
        let options = options.max_bound_length(16).memory_budget(budget.clone());
        assert_eq!(options.max_bound_length, 16);
        assert!(Arc::ptr_eq(options.memory_budget.as_ref().unwrap(), &budget));
    }
}
