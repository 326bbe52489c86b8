//! Tests for the records module.

use std::borrow::Cow;
use std::sync::Arc;

use super::*;
use crate::buffer::{ByteBuf, ByteOrder};
use crate::index::Shape;
use crate::schema::{FieldDef, RecordSchema};
use crate::types::{DataType, Value};

fn mixed_schema() -> Arc<RecordSchema> {
    Arc::new(
        RecordSchema::packed(vec![
            FieldDef::scalar("id", DataType::Int16),
            FieldDef::scalar("temp", DataType::Float64).with_order(ByteOrder::Little),
            FieldDef::new("code", DataType::Char, Shape::vector(4)),
            FieldDef::scalar("station", DataType::String),
            FieldDef::scalar("flag", DataType::UInt8),
        ])
        .unwrap(),
    )
}

fn mixed_record() -> Record {
    let mut data = Vec::new();
    data.extend_from_slice(&258i16.to_be_bytes());
    data.extend_from_slice(&1.5f64.to_le_bytes());
    data.extend_from_slice(b"AB\0\0");
    data.extend_from_slice(&1u32.to_be_bytes());
    data.push(7);

    let heap: Arc<[String]> = vec!["zero".to_string(), "alpha".to_string()].into();
    Record::Buf(BufRecord::new(
        mixed_schema(),
        ByteBuf::new(data),
        0,
        ByteOrder::Big,
        Some(heap),
    ))
}

#[test]
fn buf_record_decodes_scalar_fields() {
    let record = mixed_record();
    assert_eq!(record.get_i16("id").unwrap(), 258);
    assert_eq!(record.get_u8("flag").unwrap(), 7);
}

#[test]
fn per_field_order_override_wins_over_store_default() {
    // "temp" was written little-endian into a big-endian record.
    let record = mixed_record();
    assert_eq!(record.get_f64("temp").unwrap(), 1.5);
}

#[test]
fn interleaved_reads_of_differently_ordered_fields() {
    let record = mixed_record();
    assert_eq!(record.get_i16("id").unwrap(), 258);
    assert_eq!(record.get_f64("temp").unwrap(), 1.5);
    assert_eq!(record.get_i16("id").unwrap(), 258);
}

#[test]
fn char_array_reads_as_trimmed_string() {
    let record = mixed_record();
    assert_eq!(record.get_string("code").unwrap(), "AB");
}

#[test]
fn string_field_resolves_through_the_heap() {
    let record = mixed_record();
    assert_eq!(record.get_string("station").unwrap(), "alpha");
}

#[test]
fn unknown_field_name_is_an_error() {
    let record = mixed_record();
    let err = record.get_f64("missing").unwrap_err();
    assert!(err.to_string().contains("no field named"));
}

#[test]
fn array_field_decodes_every_element() {
    let schema = Arc::new(
        RecordSchema::packed(vec![FieldDef::new(
            "levels",
            DataType::Int32,
            Shape::vector(3),
        )])
        .unwrap(),
    );
    let mut data = Vec::new();
    for v in [5i32, -6, 7] {
        data.extend_from_slice(&v.to_be_bytes());
    }
    let record = Record::Buf(BufRecord::new(
        schema,
        ByteBuf::new(data),
        0,
        ByteOrder::Big,
        None,
    ));
    assert_eq!(record.get("levels").unwrap(), Value::Int32s(vec![5, -6, 7]));
    assert_eq!(record.get_f64s("levels").unwrap(), vec![5.0, -6.0, 7.0]);
}

#[test]
fn nested_struct_field_decodes_in_place() {
    let nested = Arc::new(
        RecordSchema::packed(vec![
            FieldDef::scalar("x", DataType::Int16),
            FieldDef::scalar("y", DataType::Int16),
        ])
        .unwrap(),
    );
    let schema = Arc::new(
        RecordSchema::packed(vec![
            FieldDef::scalar("t", DataType::UInt8),
            FieldDef::scalar("pos", DataType::Struct).with_nested(nested),
        ])
        .unwrap(),
    );
    let mut data = vec![9u8];
    data.extend_from_slice(&3i16.to_be_bytes());
    data.extend_from_slice(&(-4i16).to_be_bytes());

    let record = Record::Buf(BufRecord::new(
        schema,
        ByteBuf::new(data),
        0,
        ByteOrder::Big,
        None,
    ));
    let pos = record.get_record("pos").unwrap();
    assert_eq!(pos.get_i16("x").unwrap(), 3);
    assert_eq!(pos.get_i16("y").unwrap(), -4);
}

#[test]
fn sequence_field_in_flat_buffer_is_unsupported() {
    let schema = Arc::new(
        RecordSchema::adhoc(vec![FieldDef::scalar("obs", DataType::Sequence)]).unwrap(),
    );
    let record = Record::Buf(BufRecord::new(
        schema,
        ByteBuf::new(vec![0u8; 8]),
        0,
        ByteOrder::Big,
        None,
    ));
    let err = record.get("obs").unwrap_err();
    assert!(err.to_string().contains("unsupported operation"));
}

#[test]
fn record_of_builds_a_single_field_record() {
    let record = record_of("count", Value::Int64(42)).unwrap();
    assert_eq!(record.schema().field_count(), 1);
    assert_eq!(
        record.schema().find("count").unwrap().data_type(),
        DataType::Int64
    );
    assert_eq!(record.get_i64("count").unwrap(), 42);
}

#[test]
fn record_of_infers_array_shape() {
    let record = record_of("profile", Value::Float32s(vec![1.0, 2.0])).unwrap();
    assert_eq!(record.schema().find("profile").unwrap().shape().size(), 2);
    assert_eq!(record.get_f32s("profile").unwrap(), vec![1.0, 2.0]);
}

#[test]
fn proxy_forwards_reads_by_name() {
    let record = mixed_record();
    let narrow = Arc::new(
        RecordSchema::adhoc(vec![FieldDef::scalar("id", DataType::Int16)]).unwrap(),
    );
    let proxy = Record::proxy(record, narrow);
    assert_eq!(proxy.get_i16("id").unwrap(), 258);
}

#[test]
fn proxy_hides_fields_outside_its_member_set() {
    let record = mixed_record();
    let narrow = Arc::new(
        RecordSchema::adhoc(vec![FieldDef::scalar("id", DataType::Int16)]).unwrap(),
    );
    let proxy = Record::proxy(record, narrow);
    let err = proxy.get_f64("temp").unwrap_err();
    assert!(err.to_string().contains("no field named"));
}

#[test]
fn merge_of_single_record_returns_it_unchanged() {
    let record = record_of("a", Value::Int32(5)).unwrap();
    let schema = Arc::clone(record.schema());
    let merged = merge(vec![None, Some(record), None]).unwrap();
    // Same instance: the schema handle is the very same allocation.
    assert!(Arc::ptr_eq(merged.schema(), &schema));
    assert_eq!(merged.get_i32("a").unwrap(), 5);
}

#[test]
fn merge_of_none_is_an_error() {
    let err = merge(vec![None, None]).unwrap_err();
    assert!(err.to_string().contains("merge of no records"));
}

#[test]
fn merge_exposes_fields_of_all_contributors() {
    let a = record_of("t", Value::Float64(20.5)).unwrap();
    let b = record_of("rh", Value::Float32(0.8)).unwrap();
    let merged = merge(vec![Some(a), Some(b)]).unwrap();
    assert_eq!(merged.schema().field_count(), 2);
    assert_eq!(merged.get_f64("t").unwrap(), 20.5);
    assert_eq!(merged.get_f32("rh").unwrap(), 0.8);
}

#[test]
fn merge_resolves_duplicate_names_to_the_first_owner() {
    let a = record_of("v", Value::Int32(1)).unwrap();
    let b = record_of("v", Value::Int32(2)).unwrap();
    let merged = merge(vec![Some(a), Some(b)]).unwrap();
    assert_eq!(merged.get_i32("v").unwrap(), 1);
}

#[test]
fn bool_field_resists_numeric_reads() {
    let record = record_of("ok", Value::Bool(true)).unwrap();
    assert!(record.get_bool("ok").unwrap());
    let err = record.get_f64("ok").unwrap_err();
    assert!(err.to_string().contains("forbidden conversion"));
}

#[test]
fn owned_text_round_trips() {
    let record = record_of("name", Value::Text(Cow::Owned("buoy-7".to_string()))).unwrap();
    assert_eq!(record.get_string("name").unwrap(), "buoy-7");
}
