//! End-to-end behavior through the runtime-typed entry points.

use arrow::array::{Int16Array, StringArray};
use tonbo_runtime_filter::{
    ColumnType, FilterOptions, IntKind, MemoryBudget, RuntimeFilter, StringMinMaxFilter, ValueRef,
};

fn int_filter(column: &ColumnType, values: &[i64]) -> RuntimeFilter {
    let mut filter = RuntimeFilter::new(column, &FilterOptions::default());
    for value in values {
        let value = match column {
            ColumnType::Int8 => ValueRef::Int8(*value as i8),
            ColumnType::Int16 => ValueRef::Int16(*value as i16),
            ColumnType::Int32 => ValueRef::Int32(*value as i32),
            _ => ValueRef::Int64(*value),
        };
        filter.insert(Some(value));
    }
    filter
}

#[test]
fn insert_then_evaluate() {
    let filter = int_filter(&ColumnType::Int32, &[5, 10]);
    let column = ColumnType::Int32;
    assert!(filter.eval_overlap(&column, ValueRef::Int32(7), ValueRef::Int32(20)));
    assert!(!filter.eval_overlap(&column, ValueRef::Int32(20), ValueRef::Int32(30)));
    assert_eq!(
        filter.to_string(),
        "IntMinMaxFilter(min=5, max=10, always_false=false, always_true=false)"
    );
}

#[test]
fn merge_partial_filters() {
    let mut merged = RuntimeFilter::new(&ColumnType::Int64, &FilterOptions::default());
    merged.or(&int_filter(&ColumnType::Int64, &[3, 8]));
    assert_eq!(merged, int_filter(&ColumnType::Int64, &[3, 8]));

    merged.or(&int_filter(&ColumnType::Int64, &[1, 5]));
    assert_eq!(merged, int_filter(&ColumnType::Int64, &[1, 8]));
}

#[test]
fn partial_overlap_ratio() {
    let filter = int_filter(&ColumnType::Int32, &[0, 9]);
    let ratio =
        filter.compute_overlap_ratio(&ColumnType::Int32, ValueRef::Int32(5), ValueRef::Int32(14));
    assert_eq!(ratio, 0.5);
}

#[test]
fn boolean_filter() {
    let mut filter = RuntimeFilter::new(&ColumnType::Boolean, &FilterOptions::default());
    filter.insert(Some(ValueRef::Bool(true)));

    let column = ColumnType::Boolean;
    let (f, t) = (ValueRef::Bool(false), ValueRef::Bool(true));
    assert!(filter.eval_overlap(&column, f, t));
    assert_eq!(filter.compute_overlap_ratio(&column, f, t), 1.0);
    assert!(!filter.eval_overlap(&column, f, f));
    assert_eq!(filter.compute_overlap_ratio(&column, f, f), 0.0);
}

#[test]
fn unrepresentable_cast_skips_data() {
    let filter = int_filter(&ColumnType::Int32, &[200, 300]);
    assert_eq!(filter.cast_int_bounds(IntKind::Int8), None);
    assert!(!filter.eval_overlap(
        &ColumnType::Int8,
        ValueRef::Int8(i8::MIN),
        ValueRef::Int8(i8::MAX)
    ));

    let filter = int_filter(&ColumnType::Int64, &[-5, 1 << 40]);
    assert_eq!(
        filter.cast_int_bounds(IntKind::Int16),
        Some((-5, i16::MAX as i64))
    );
    assert!(filter.eval_overlap(
        &ColumnType::Int16,
        ValueRef::Int16(100),
        ValueRef::Int16(200)
    ));
}

#[test]
fn arrays_from_a_build_side() {
    let mut filter = RuntimeFilter::new(&ColumnType::Int16, &FilterOptions::default());
    filter
        .insert_array(&Int16Array::from(vec![Some(40), None, Some(-2)]))
        .expect("int16 array");
    assert_eq!(filter, int_filter(&ColumnType::Int16, &[-2, 40]));

    let err = filter
        .insert_array(&StringArray::from(vec!["a"]))
        .expect_err("string array into a smallint filter");
    assert!(err.to_string().starts_with("Type mismatch"));
}

#[test]
fn long_string_bounds_are_truncated() {
    let options = FilterOptions::default().max_bound_length(4);
    let mut filter = RuntimeFilter::new(&ColumnType::String, &options);
    filter
        .insert_array(&StringArray::from(vec!["abcdefgh", "abczzzzz"]))
        .expect("string array");

    // min is cut to "abcd", max to "abcz" and then bumped to "abc{"
    let column = ColumnType::String;
    let admits = |value: &[u8]| {
        filter.eval_overlap(&column, ValueRef::Bytes(value), ValueRef::Bytes(value))
    };
    assert!(admits(b"abcdefgh".as_slice()));
    assert!(admits(b"abczzzzz".as_slice()));
    assert!(admits(b"abc{".as_slice()));
    assert!(!admits(b"abd".as_slice()));
    assert!(!admits(b"abc".as_slice()));
}

#[test]
fn all_ff_max_degrades_to_top() {
    let options = FilterOptions::default().max_bound_length(2);
    let mut filter = StringMinMaxFilter::new(&options);
    let max = [0xffu8, 0xff, 0x01];
    filter.insert(Some(b"a".as_slice()));
    filter.insert(Some(max.as_slice()));
    filter.materialize();
    assert!(filter.is_always_true());
}

#[test]
fn oversized_ff_max_at_default_length_degrades_to_top() {
    let mut filter = StringMinMaxFilter::new(&FilterOptions::default());
    let max = vec![0xffu8; 1_500];
    filter.insert(Some(b"a".as_slice()));
    filter.insert(Some(max.as_slice()));
    filter.materialize();
    assert!(filter.is_always_true());
    assert_eq!(filter.min(), None);
}

#[test]
fn exhausted_budget_degrades_to_top() {
    let budget = MemoryBudget::new(8);
    let options = FilterOptions::default().memory_budget(budget.clone());
    let mut filter = RuntimeFilter::new(&ColumnType::String, &options);
    filter
        .insert_array(&StringArray::from(vec!["a long string value", "another long value"]))
        .expect("string array");
    assert!(filter.is_always_true());
    assert_eq!(budget.used(), 0);
}
