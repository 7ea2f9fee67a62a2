//! Row-group pruning against column-chunk min/max statistics.

use parquet::file::{metadata::ColumnChunkMetaData, statistics::Statistics};

use crate::{
    observability::{log_debug, log_trace},
    pruning::{config::PruningConfig, PruneError, PruneInput, PruneOutput, Pruner},
    scalar::{Date, Decimal16, Decimal4, Decimal8},
    types::{ColumnType, DecimalWidth},
    value::ValueRef,
};

/// Pruner that drops row groups whose statistics cannot overlap the filter.
///
/// Row groups without usable statistics are always kept.
#[derive(Clone, Debug, Default)]
pub struct MinMaxPruner {
    config: PruningConfig,
}

impl MinMaxPruner {
    pub fn new(config: PruningConfig) -> Self {
        Self { config }
    }
}

impl Pruner for MinMaxPruner {
    fn prune(&self, input: &PruneInput<'_>) -> Result<PruneOutput, PruneError> {
        if !input.filter.accepts_column(&input.column_type) {
            return Err(PruneError::message(format!(
                "{} filter cannot be evaluated against a {} column",
                input.filter.kind(),
                input.column_type
            )));
        }

        let metadata = input.metadata;
        let total = metadata.num_row_groups();
        let mut row_groups = Vec::with_capacity(total);
        let mut selected_rows = 0f64;
        let mut accepted_rows = 0f64;

        for (index, row_group) in metadata.row_groups().iter().enumerate() {
            let chunk = row_group.columns().get(input.column_index).ok_or_else(|| {
                PruneError::message(format!(
                    "column index {} out of range for row group {index} with {} columns",
                    input.column_index,
                    row_group.num_columns()
                ))
            })?;

            let ratio = match chunk_range(chunk, &input.column_type) {
                Some((min, max)) => {
                    if !input.filter.eval_overlap(&input.column_type, min, max) {
                        continue;
                    }
                    input
                        .filter
                        .compute_overlap_ratio(&input.column_type, min, max)
                }
                None => {
                    log_trace!(
                        component = "pruning",
                        event = "statistics_unsupported",
                        row_group = index,
                        column = input.column_index,
                    );
                    1.0
                }
            };

            let rows = row_group.num_rows().max(0) as f64;
            selected_rows += rows;
            accepted_rows += rows * ratio as f64;
            row_groups.push(index);
        }

        let overlap_ratio = if selected_rows > 0.0 {
            (accepted_rows / selected_rows) as f32
        } else {
            0.0
        };
        let filter_effective = self.config.is_effective(overlap_ratio);

        log_debug!(
            component = "pruning",
            event = "row_groups_pruned",
            total,
            selected = row_groups.len(),
            overlap_ratio,
            filter_effective,
        );

        Ok(PruneOutput {
            row_groups,
            overlap_ratio,
            filter_effective,
        })
    }
}

/// Min and max of a column chunk, as values of `column`.
fn chunk_range<'s>(
    chunk: &'s ColumnChunkMetaData,
    column: &ColumnType,
) -> Option<(ValueRef<'s>, ValueRef<'s>)> {
    match (column, chunk.statistics()?) {
        (ColumnType::Boolean, Statistics::Boolean(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Bool(*v)))
        }
        (ColumnType::Int8, Statistics::Int32(s)) => bounds(s.min_opt(), s.max_opt(), |v| {
            i8::try_from(*v).ok().map(ValueRef::Int8)
        }),
        (ColumnType::Int16, Statistics::Int32(s)) => bounds(s.min_opt(), s.max_opt(), |v| {
            i16::try_from(*v).ok().map(ValueRef::Int16)
        }),
        (ColumnType::Int32, Statistics::Int32(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Int32(*v)))
        }
        (ColumnType::Int64, Statistics::Int64(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Int64(*v)))
        }
        (ColumnType::Float, Statistics::Float(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Float(*v)))
        }
        (ColumnType::Double, Statistics::Double(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Double(*v)))
        }
        (ColumnType::Date, Statistics::Int32(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Date(Date(*v))))
        }
        (ColumnType::String, Statistics::ByteArray(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Bytes(v.data())))
        }
        (ColumnType::String, Statistics::FixedLenByteArray(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| Some(ValueRef::Bytes(v.data())))
        }
        (ColumnType::Decimal { precision, .. }, Statistics::Int32(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| decimal(*precision, *v as i128))
        }
        (ColumnType::Decimal { precision, .. }, Statistics::Int64(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| decimal(*precision, *v as i128))
        }
        (ColumnType::Decimal { precision, .. }, Statistics::ByteArray(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| {
                decimal(*precision, decimal_from_be(v.data())?)
            })
        }
        (ColumnType::Decimal { precision, .. }, Statistics::FixedLenByteArray(s)) => {
            bounds(s.min_opt(), s.max_opt(), |v| {
                decimal(*precision, decimal_from_be(v.data())?)
            })
        }
        // timestamp statistics depend on the stored unit, which the column
        // type does not carry
        _ => None,
    }
}

/// Converts a statistics min/max pair. The accessors stay at the call sites
/// since `ValueStatistics` only exposes them for parquet's own value types.
fn bounds<'s, T: 's>(
    min: Option<&'s T>,
    max: Option<&'s T>,
    convert: impl Fn(&'s T) -> Option<ValueRef<'s>>,
) -> Option<(ValueRef<'s>, ValueRef<'s>)> {
    Some((convert(min?)?, convert(max?)?))
}

fn decimal(precision: u8, value: i128) -> Option<ValueRef<'static>> {
    match DecimalWidth::from_precision(precision) {
        DecimalWidth::W4 => Decimal4::from_i128(value).map(ValueRef::Decimal4),
        DecimalWidth::W8 => Decimal8::from_i128(value).map(ValueRef::Decimal8),
        DecimalWidth::W16 => Decimal16::from_i128(value).map(ValueRef::Decimal16),
    }
}

/// Sign-extend a big-endian two's complement integer of up to 16 bytes.
fn decimal_from_be(bytes: &[u8]) -> Option<i128> {
    if bytes.is_empty() || bytes.len() > 16 {
        return None;
    }
    let fill = if bytes[0] & 0x80 != 0 { 0xff } else { 0 };
    let mut buf = [fill; 16];
    buf[16 - bytes.len()..].copy_from_slice(bytes);
    Some(i128::from_be_bytes(buf))
}
