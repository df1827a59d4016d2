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

//! Exact line layout of encoded graphs.


use fixtures::{codec, person, PERSON};
use graphline::{CollectionRef, TypeDesc, Value};

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn test_single_object() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    let text = codec.to_text(&Value::Object(ann)).unwrap();
    assert_eq!(
        lines(&text),
        vec![
            "root", "Object", "false", PERSON, "3", "name", "String", "Ann", "age", "Any", "false",
            "i32", "30", "friend", "Null",
        ]
    );
}

#[test]
fn test_shared_element_is_written_once() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    let list = CollectionRef::list_of(TypeDesc::named(PERSON));
    list.push(Value::Object(ann.clone())).unwrap();
    list.push(Value::Object(ann)).unwrap();
    let text = codec.to_text(&Value::Collection(list)).unwrap();
    let lines = lines(&text);
    assert_eq!(
        &lines[..10],
        &["root", "GenericEnumerable", "2", "true", "List", "1", "false", PERSON, "0", "Object"]
    );
    // the second element refers back to the tag line of the first
    assert_eq!(&lines[lines.len() - 3..], &["1", "Reference", "9"]);
    assert_eq!(lines.iter().filter(|l| **l == "Object").count(), 1);
}

#[test]
fn test_self_reference_points_at_root_tag() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    ann.set("friend", ann.clone()).unwrap();
    let text = codec.to_text(&Value::Object(ann)).unwrap();
    let lines = lines(&text);
    assert_eq!(&lines[lines.len() - 3..], &["friend", "Reference", "1"]);
}

#[test]
fn test_map_entry_names() {
    let codec = codec();
    let map = CollectionRef::map_of(TypeDesc::named("string"), TypeDesc::named("i32"));
    map.insert(Value::from("one"), Value::from(1i32)).unwrap();
    let text = codec.to_text(&Value::Collection(map)).unwrap();
    assert_eq!(
        lines(&text),
        vec![
            "root",
            "GenericEnumerable",
            "1",
            "true",
            "Map",
            "2",
            "false",
            "string",
            "false",
            "i32",
            "key_0",
            "String",
            "one",
            "value_0",
            "Any",
            "false",
            "i32",
            "1",
        ]
    );
}

#[test]
fn test_array_layout() {
    let codec = codec();
    let array = graphline::ArrayRef::new(
        TypeDesc::named("string"),
        vec![Value::from("a"), Value::Null],
    );
    let text = codec.to_text(&Value::Array(array)).unwrap();
    assert_eq!(
        lines(&text),
        vec!["root", "Enumerable", "2", "false", "string", "0", "String", "a", "1", "Null"]
    );
}

#[test]
fn test_int_array_layout() {
    let codec = codec();
    let items = vec![Value::from(1i32), Value::from(2i32), Value::from(3i32)];
    let array = graphline::ArrayRef::new(TypeDesc::named("i32"), items.clone());
    let text = codec.to_text(&Value::Array(array)).unwrap();
    assert_eq!(
        lines(&text),
        vec![
            "root", "Enumerable", "3", "false", "i32", "0", "Any", "false", "i32", "1", "1", "Any",
            "false", "i32", "2", "2", "Any", "false", "i32", "3",
        ]
    );
    let decoded = codec.from_text(&text).unwrap();
    assert_eq!(decoded.as_array().unwrap().items(), items);
}

#[test]
fn test_nested_generic_type_layout() {
    let codec = codec();
    let ty = TypeDesc::map_of(
        TypeDesc::named("string"),
        TypeDesc::list_of(TypeDesc::array_of(TypeDesc::named("i32"))),
    );
    let text = codec.to_text(&Value::Type(ty)).unwrap();
    assert_eq!(
        lines(&text),
        vec![
            "root", "Type", "true", "Map", "2", "false", "string", "true", "List", "1", "true",
            "Array", "1", "false", "i32",
        ]
    );
}

#[test]
fn test_stream_is_rewound() {
    use std::io::{Cursor, Read};

    let codec = codec();
    let mut cursor = Cursor::new(Vec::new());
    codec.serialize(&mut cursor, &Value::from(7i64)).unwrap();
    assert_eq!(cursor.position(), 0);
    let mut text = String::new();
    cursor.read_to_string(&mut text).unwrap();
    assert_eq!(text, "root\nAny\nfalse\ni64\n7\n");
}
