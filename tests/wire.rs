//! Filters crossing the wire between producer and consumer.

use std::io::Cursor;

use tonbo_runtime_filter::{
    scalar::Timestamp,
    serdes::{Decode, Encode},
    CodecError, ColumnType, FilterMessage, FilterOptions, RuntimeFilter, Value, ValueRef,
};

async fn round_trip(message: &FilterMessage) -> FilterMessage {
    let mut buf = Vec::new();
    message.encode(&mut Cursor::new(&mut buf)).await.unwrap();
    assert_eq!(buf.len(), message.size());
    FilterMessage::decode(&mut Cursor::new(buf)).await.unwrap()
}

#[tokio::test]
async fn runtime_filters_survive_the_wire() {
    let options = FilterOptions::default();
    let cases: Vec<(ColumnType, Vec<ValueRef<'static>>)> = vec![
        (
            ColumnType::Int8,
            vec![ValueRef::Int8(-3), ValueRef::Int8(9)],
        ),
        (
            ColumnType::Double,
            vec![ValueRef::Double(0.25), ValueRef::Double(-1e9)],
        ),
        (
            ColumnType::String,
            vec![ValueRef::Bytes(b"kiwi"), ValueRef::Bytes(b"apple")],
        ),
        (
            ColumnType::Timestamp,
            vec![ValueRef::Timestamp(Timestamp::new(19_000, 42))],
        ),
        (ColumnType::Int64, vec![]),
    ];

    for (column, values) in cases {
        let mut filter = RuntimeFilter::new(&column, &options);
        for value in values {
            filter.insert(Some(value));
        }
        let decoded = round_trip(&filter.to_message()).await;
        assert_eq!(RuntimeFilter::from_message(&decoded, &column, &options), filter);
    }
}

#[tokio::test]
async fn merging_decoded_messages() {
    let column = ColumnType::Int32;
    let left = FilterMessage::ranged(Value::Int32(3), Value::Int32(8));
    let right = FilterMessage::ranged(Value::Int32(1), Value::Int32(5));

    let mut merged = FilterMessage::bottom();
    merged.or_into(&round_trip(&left).await, &column);
    merged.or_into(&round_trip(&right).await, &column);
    assert_eq!(merged, FilterMessage::ranged(Value::Int32(1), Value::Int32(8)));

    merged.or_into(&FilterMessage::top(), &column);
    assert_eq!(round_trip(&merged).await, FilterMessage::top());
}

#[tokio::test]
async fn truncated_input_is_an_error() {
    let mut buf = Vec::new();
    FilterMessage::ranged(Value::Int64(1), Value::Int64(2))
        .encode(&mut Cursor::new(&mut buf))
        .await
        .unwrap();
    buf.truncate(buf.len() - 3);

    let err = FilterMessage::decode(&mut Cursor::new(buf)).await.unwrap_err();
    assert!(matches!(err, CodecError::Io(_)));
}
