// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.


use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fixtures::{codec, person, round_trip, COLOR, EMPLOYEE, PERSON, POINT};
use graphline::{
    graph_eq, ArrayRef, CollectionRef, NativeHandle, SerializationType, TypeDesc, Value,
};

#[test]
fn test_primitive_roots() {
    let codec = codec();
    let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    let values = [
        Value::from(true),
        Value::from('x'),
        Value::from(-8i8),
        Value::from(i16::MIN),
        Value::from(i32::MAX),
        Value::from(i64::MIN),
        Value::from(255u8),
        Value::from(u16::MAX),
        Value::from(u32::MAX),
        Value::from(u64::MAX),
        Value::from(1.5f32),
        Value::from(std::f64::consts::PI),
        Value::from(date),
        Value::from(NaiveDateTime::new(
            date,
            NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap(),
        )),
    ];
    for value in values {
        assert_eq!(round_trip(&codec, &value), value);
    }
}

#[test]
fn test_strings_with_line_breaks() {
    let codec = codec();
    for text in ["", "plain", "two\nlines", "crlf\r\nend", "back\\slash\\n", "\n"] {
        let value = Value::from(text);
        let encoded = codec.to_text(&value).unwrap();
        assert_eq!(encoded.lines().count(), 3, "{:?}", text);
        assert_eq!(codec.from_text(&encoded).unwrap(), value);
    }
}

#[test]
fn test_unescaped_strings() {
    let codec = codec().escape_strings(false);
    let plain = Value::from("C:\\temp");
    assert_eq!(codec.to_text(&plain).unwrap(), "root\nString\nC:\\temp\n");
    assert_eq!(round_trip(&codec, &plain), plain);

    // Without escaping a line break splits the value across lines.
    let broken = Value::from("first\nsecond");
    let decoded = codec.from_text(&codec.to_text(&broken).unwrap()).unwrap();
    assert_eq!(decoded, Value::from("first"));
}

#[test]
fn test_enum_round_trip() {
    let codec = codec();
    let green = codec
        .type_resolver()
        .enum_value(&TypeDesc::named(COLOR), "Green")
        .unwrap();
    let value = Value::Enum(green);
    let text = codec.to_text(&value).unwrap();
    assert_eq!(text, format!("root\nEnum\nfalse\n{COLOR}\nGreen\n"));
    assert_eq!(codec.from_text(&text).unwrap(), value);
    assert!(codec
        .type_resolver()
        .enum_value(&TypeDesc::named(COLOR), "Purple")
        .is_err());
}

#[test]
fn test_handle_round_trip() {
    let codec = codec();
    let value = Value::Handle(NativeHandle(-5));
    let text = codec.to_text(&value).unwrap();
    assert_eq!(text, "root\nIntPtr\n-5\n");
    assert_eq!(codec.from_text(&text).unwrap(), value);
}

#[test]
fn test_inheritance_keeps_shadowed_fields_apart() {
    let codec = codec();
    let employee = codec
        .type_resolver()
        .allocate(&TypeDesc::named(EMPLOYEE))
        .unwrap();
    assert_eq!(employee.level_count(), 2);
    assert_eq!(employee.declaring_type(1), Some(TypeDesc::named(PERSON)));
    employee.set_at(0, "name", "derived").unwrap();
    employee.set_at(1, "name", "base").unwrap();
    employee.set("salary", 1234.5f64).unwrap();
    employee.set("age", 28i32).unwrap();

    let decoded = round_trip(&codec, &Value::Object(employee.clone()));
    assert!(graph_eq(&Value::Object(employee), &decoded));
    let decoded = decoded.as_object().unwrap();
    assert_eq!(decoded.type_desc(), TypeDesc::named(EMPLOYEE));
    assert_eq!(decoded.get_at(0, "name"), Some(Value::from("derived")));
    assert_eq!(decoded.get_at(1, "name"), Some(Value::from("base")));
    assert_eq!(decoded.get("name"), Some(Value::from("derived")));
    assert_eq!(decoded.get("age"), Some(Value::from(28i32)));
    assert_eq!(decoded.get("salary"), Some(Value::from(1234.5f64)));
}

#[test]
fn test_every_level_is_written() {
    let codec = codec();
    let employee = codec
        .type_resolver()
        .allocate(&TypeDesc::named(EMPLOYEE))
        .unwrap();
    let text = codec.to_text(&Value::Object(employee)).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(&lines[..5], &["root", "Object", "false", EMPLOYEE, "2"]);
    assert!(lines.contains(&"3"));
}

#[test]
fn test_missing_constructor_yields_allowed_null() {
    let codec = codec();
    let point = codec
        .type_resolver()
        .allocate(&TypeDesc::named(POINT))
        .unwrap();
    point.set("x", 3i32).unwrap();
    let text = codec.to_text(&Value::Object(point)).unwrap();

    let node = codec.deserialize_node(&mut text.as_bytes()).unwrap();
    assert_eq!(node.name(), "root");
    assert_eq!(node.tag(), SerializationType::Object);
    assert!(node.allow_null());
    assert!(node.value().is_null());
}

#[test]
fn test_missing_constructor_inside_graph() {
    let codec = codec();
    let point = codec
        .type_resolver()
        .allocate(&TypeDesc::named(POINT))
        .unwrap();
    let ann = person(&codec, "Ann", 30);
    ann.set("friend", point).unwrap();
    let list = CollectionRef::list_of(TypeDesc::named(PERSON));
    list.push(Value::Object(ann)).unwrap();
    list.push(Value::from("after")).unwrap();

    let decoded = round_trip(&codec, &Value::Collection(list));
    let elements = decoded.as_collection().unwrap().elements();
    let ann = elements[0].as_object().unwrap();
    assert!(ann.get("friend").unwrap().is_null());
    assert_eq!(ann.get("age"), Some(Value::from(30i32)));
    assert_eq!(elements[1], Value::from("after"));
}

#[test]
fn test_array_of_scalars() {
    let codec = codec();
    let array = ArrayRef::new(
        TypeDesc::named("f64"),
        vec![Value::from(0.5f64), Value::from(-2.25f64), Value::Null],
    );
    let decoded = round_trip(&codec, &Value::Array(array));
    let decoded = decoded.as_array().unwrap();
    assert_eq!(decoded.element_type(), TypeDesc::named("f64"));
    assert_eq!(
        decoded.items(),
        vec![Value::from(0.5f64), Value::from(-2.25f64), Value::Null]
    );
}

#[test]
fn test_empty_containers() {
    let codec = codec();
    let list = Value::Collection(CollectionRef::list_of(TypeDesc::named("i32")));
    let map = Value::Collection(CollectionRef::map_of(
        TypeDesc::named("string"),
        TypeDesc::named("string"),
    ));
    let array = Value::Array(ArrayRef::new(TypeDesc::named("string"), vec![]));
    for value in [list, map, array] {
        assert!(graph_eq(&value, &round_trip(&codec, &value)));
    }
}

#[test]
fn test_root_node_name() {
    let codec = codec();
    let value = Value::Object(person(&codec, "Ann", 30));
    let text = codec.to_text(&value).unwrap();
    let node = codec.deserialize_node(&mut text.as_bytes()).unwrap();
    assert_eq!(node.name(), "root");
    assert!(!node.allow_null());
    assert!(graph_eq(&value, node.value()));
}
