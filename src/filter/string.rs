use std::{fmt, mem, sync::Arc};

use super::{FilterState, MinMaxFilter};
use crate::{
    memory::{MemoryBudget, Reservation},
    message::FilterMessage,
    observability::log_debug,
    option::FilterOptions,
    scalar::{Bytes, Scalar},
    types::ColumnType,
};

/// Min/max filter over byte strings.
///
/// Inserted values borrow the batch they come from for `'a`. Before that
/// batch goes away the caller runs [`StringMinMaxFilter::materialize`] (or
/// [`StringMinMaxFilter::into_static`]), which copies the bounds into
/// filter-owned memory, cut to at most `max_bound_length` bytes.
#[derive(Debug)]
pub struct StringMinMaxFilter<'a> {
    inner: MinMaxFilter<Bytes<'a>>,
    max_bound_length: usize,
    budget: Option<Arc<MemoryBudget>>,
    reservation: Option<Reservation>,
}

impl<'a> StringMinMaxFilter<'a> {
    pub fn new(options: &FilterOptions) -> Self {
        StringMinMaxFilter {
            inner: MinMaxFilter::new(),
            max_bound_length: options.max_bound_length,
            budget: options.memory_budget.clone(),
            reservation: None,
        }
    }

    /// Rebuild from a wire form. The bounds are owned from the start.
    pub fn from_message(message: &FilterMessage, options: &FilterOptions) -> Self {
        let mut filter = Self::new(options);
        filter.inner = MinMaxFilter::from_message(message);
        filter.account_owned();
        filter
    }

    pub fn is_always_false(&self) -> bool {
        self.inner.is_always_false()
    }

    pub fn is_always_true(&self) -> bool {
        self.inner.is_always_true()
    }

    pub fn min(&self) -> Option<&[u8]> {
        self.inner.min().map(Bytes::as_slice)
    }

    pub fn max(&self) -> Option<&[u8]> {
        self.inner.max().map(Bytes::as_slice)
    }

    /// Whether no bound borrows caller memory.
    pub fn is_materialized(&self) -> bool {
        match &self.inner.state {
            FilterState::Range { min, max } => !min.is_borrowed() && !max.is_borrowed(),
            _ => true,
        }
    }

    pub fn set_always_true(&mut self) {
        self.inner.set_always_true();
        self.reservation = None;
    }

    /// Widen the range to include `value` without copying it.
    pub fn insert(&mut self, value: Option<&'a [u8]>) {
        self.inner.insert(value.map(Bytes::borrowed));
    }

    /// Join `other` into `self`, borrowing the bounds that end up in `self`.
    pub fn or(&mut self, other: &'a StringMinMaxFilter<'_>) {
        match &other.inner.state {
            FilterState::AlwaysFalse => {}
            FilterState::AlwaysTrue => self.set_always_true(),
            FilterState::Range { min, max } => {
                self.insert(Some(min.as_slice()));
                self.insert(Some(max.as_slice()));
            }
        }
    }

    /// Copy every borrowed bound into filter-owned memory.
    ///
    /// A bound longer than `max_bound_length` is cut: the min to a prefix,
    /// the max to a prefix whose last byte below `0xff` is incremented. When
    /// the max cannot be cut that way, or the copy does not fit the memory
    /// budget, the filter becomes always-true instead.
    pub fn materialize(&mut self) {
        let limit = self.max_bound_length;
        let planned = match &self.inner.state {
            FilterState::Range { min, max } if min.is_borrowed() || max.is_borrowed() => {
                let overflow = max.is_borrowed()
                    && max.len() > limit
                    && max.as_slice()[..limit].iter().all(|b| *b == u8::MAX);
                let size = |bound: &Bytes<'_>| {
                    if bound.is_borrowed() {
                        bound.len().min(limit)
                    } else {
                        bound.len()
                    }
                };
                (!overflow).then(|| size(min) + size(max))
            }
            FilterState::Range { .. } => return,
            _ => {
                self.reservation = None;
                return;
            }
        };
        let Some(planned) = planned else {
            self.degrade("max_bound_overflow");
            return;
        };
        if !self.reserve(planned) {
            self.degrade("memory_budget");
            return;
        }

        let mut copied = true;
        if let FilterState::Range { min, max } = &mut self.inner.state {
            if min.is_borrowed() {
                match own_bound(min.as_slice(), limit, false) {
                    Some(bytes) => *min = Bytes::owned(bytes),
                    None => copied = false,
                }
            }
            if max.is_borrowed() && copied {
                match own_bound(max.as_slice(), limit, true) {
                    Some(bytes) => *max = Bytes::owned(bytes),
                    None => copied = false,
                }
            }
        }
        if !copied {
            self.degrade("allocation_failed");
        }
    }

    /// Materialize and detach from every borrowed batch.
    pub fn into_static(mut self) -> StringMinMaxFilter<'static> {
        self.materialize();
        let StringMinMaxFilter {
            inner,
            max_bound_length,
            budget,
            reservation,
        } = self;
        let state = match inner.state {
            FilterState::AlwaysFalse => FilterState::AlwaysFalse,
            FilterState::AlwaysTrue => FilterState::AlwaysTrue,
            FilterState::Range { min, max } => FilterState::Range {
                min: min.into_static(),
                max: max.into_static(),
            },
        };
        StringMinMaxFilter {
            inner: MinMaxFilter { state },
            max_bound_length,
            budget,
            reservation,
        }
    }

    pub fn eval_overlap(&self, data_min: &[u8], data_max: &[u8]) -> bool {
        match &self.inner.state {
            FilterState::AlwaysFalse => false,
            FilterState::AlwaysTrue => true,
            FilterState::Range { min, max } => {
                !(max.as_slice() < data_min || data_max < min.as_slice())
            }
        }
    }

    /// Estimated coverage of `[data_min, data_max]`, from the first eight
    /// bytes of each bound.
    pub fn compute_overlap_ratio(&self, data_min: &[u8], data_max: &[u8]) -> f32 {
        match &self.inner.state {
            FilterState::AlwaysFalse => 0.0,
            FilterState::AlwaysTrue => 1.0,
            FilterState::Range { min, max } => {
                let (min, max) = (min.as_slice(), max.as_slice());
                if max < data_min || data_max < min {
                    0.0
                } else if min <= data_min && data_max <= max {
                    1.0
                } else {
                    Bytes::overlap_ratio(
                        &ColumnType::String,
                        &Bytes::borrowed(min),
                        &Bytes::borrowed(max),
                        &Bytes::borrowed(data_min),
                        &Bytes::borrowed(data_max),
                    )
                }
            }
        }
    }

    pub fn to_message(&self) -> FilterMessage {
        self.inner.to_message()
    }

    fn degrade(&mut self, reason: &'static str) {
        log_debug!(
            component = "string_filter",
            event = "filter_degraded",
            reason = reason,
        );
        self.set_always_true();
    }

    /// Hold `bytes` against the budget, if there is one.
    fn reserve(&mut self, bytes: usize) -> bool {
        let Some(budget) = &self.budget else {
            return true;
        };
        match &mut self.reservation {
            Some(reservation) => reservation.try_resize(bytes),
            None => match budget.try_reserve(bytes) {
                Some(reservation) => {
                    self.reservation = Some(reservation);
                    true
                }
                None => false,
            },
        }
    }

    /// Charge the budget for bounds that are already owned.
    fn account_owned(&mut self) {
        let owned: usize = match &self.inner.state {
            FilterState::Range { min, max } => {
                [min, max].iter().filter(|b| !b.is_borrowed()).map(|b| b.len()).sum()
            }
            _ => 0,
        };
        if !self.reserve(owned) {
            self.degrade("memory_budget");
        }
    }
}

impl StringMinMaxFilter<'static> {
    /// Run `update` on a view of this filter that may borrow `'b` data, then
    /// copy whatever it borrowed.
    ///
    /// Should `update` panic, the filter is left always-true.
    pub(crate) fn update<'b>(&mut self, update: impl FnOnce(&mut StringMinMaxFilter<'b>)) {
        let placeholder = StringMinMaxFilter {
            inner: MinMaxFilter::always_true(),
            max_bound_length: self.max_bound_length,
            budget: None,
            reservation: None,
        };
        let mut scoped: StringMinMaxFilter<'b> = mem::replace(self, placeholder);
        update(&mut scoped);
        *self = scoped.into_static();
    }
}

impl Clone for StringMinMaxFilter<'_> {
    fn clone(&self) -> Self {
        let mut filter = StringMinMaxFilter {
            inner: self.inner.clone(),
            max_bound_length: self.max_bound_length,
            budget: self.budget.clone(),
            reservation: None,
        };
        filter.account_owned();
        filter
    }
}

impl PartialEq for StringMinMaxFilter<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Display for StringMinMaxFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

fn copy_bytes(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len()).ok()?;
    buf.extend_from_slice(bytes);
    Some(buf)
}

/// Copy a borrowed bound, cut to `limit` bytes. An upper bound that was cut
/// is moved past every string it prefixes.
fn own_bound(bytes: &[u8], limit: usize, upper: bool) -> Option<Vec<u8>> {
    let cut = bytes.len() > limit;
    if cut {
        log_truncated(if upper { "max" } else { "min" }, bytes.len(), limit);
    }
    let mut copy = copy_bytes(&bytes[..bytes.len().min(limit)])?;
    if cut && upper {
        increment_prefix(&mut copy);
    }
    Some(copy)
}

/// Turn a prefix into the smallest string of its length above every string
/// it prefixes. The caller guarantees some byte is below `0xff`.
fn increment_prefix(prefix: &mut [u8]) {
    for byte in prefix.iter_mut().rev() {
        if *byte == u8::MAX {
            *byte = 0;
        } else {
            *byte += 1;
            return;
        }
    }
    unreachable!("prefix of 0xff bytes has no successor");
}

fn log_truncated(bound: &'static str, length: usize, max_bound_length: usize) {
    log_debug!(
        component = "string_filter",
        event = "string_bound_truncated",
        bound = bound,
        length = length,
        max_bound_length = max_bound_length,
    );
}
