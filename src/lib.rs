//! Typed min/max runtime filters for Tonbo scans.
//!
//! A filter summarizes the value range seen on one side of a join, typically
//! the build side, as `[min, max]`. The other side checks each data block's
//! own `[min, max]` against it and skips blocks that cannot overlap. Filters
//! built on separate workers merge in any order, travel as a
//! [`FilterMessage`], and drive row-group pruning of Parquet files through
//! [`pruning`].
//!
//! ```
//! use tonbo_runtime_filter::{ColumnType, FilterOptions, RuntimeFilter, ValueRef};
//!
//! let mut filter = RuntimeFilter::new(&ColumnType::Int32, &FilterOptions::default());
//! filter.insert(Some(ValueRef::Int32(5)));
//! filter.insert(Some(ValueRef::Int32(10)));
//!
//! assert!(filter.eval_overlap(&ColumnType::Int32, ValueRef::Int32(7), ValueRef::Int32(20)));
//! assert!(!filter.eval_overlap(&ColumnType::Int32, ValueRef::Int32(20), ValueRef::Int32(30)));
//! ```

mod observability;

mod error;
mod filter;
mod memory;
mod message;
mod option;
pub mod pruning;
mod runtime;
pub mod scalar;
pub mod serdes;
mod types;
mod value;

pub use crate::{
    error::{CodecError, FilterError},
    filter::{MinMaxFilter, StringMinMaxFilter},
    memory::{MemoryBudget, Reservation},
    message::FilterMessage,
    option::{FilterOptions, DEFAULT_MAX_BOUND_LENGTH},
    runtime::RuntimeFilter,
    scalar::{IntegerScalar, Scalar},
    types::{ColumnType, DecimalWidth, IntKind, MAX_DECIMAL_PRECISION},
    value::{Value, ValueRef},
};
