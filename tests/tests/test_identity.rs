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

//! Shared references and cycles survive a round trip.


use fixtures::{codec, person, round_trip, EMPLOYEE, PERSON};
use graphline::{graph_eq, ArrayRef, CollectionRef, ObjectRef, TypeDesc, Value};

#[test]
fn test_shared_object_in_list() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    let bob = person(&codec, "Bob", 41);
    let list = CollectionRef::list_of(TypeDesc::named(PERSON));
    for p in [&ann, &bob, &ann, &bob, &ann] {
        list.push(Value::Object(p.clone())).unwrap();
    }
    let root = Value::Collection(list);
    let decoded = round_trip(&codec, &root);
    assert!(graph_eq(&root, &decoded));

    let elements = decoded.as_collection().unwrap().elements();
    assert_eq!(elements.len(), 5);
    let first = elements[0].as_object().unwrap();
    let second = elements[1].as_object().unwrap();
    assert!(ObjectRef::ptr_eq(first, elements[2].as_object().unwrap()));
    assert!(ObjectRef::ptr_eq(first, elements[4].as_object().unwrap()));
    assert!(ObjectRef::ptr_eq(second, elements[3].as_object().unwrap()));
    assert!(!ObjectRef::ptr_eq(first, second));
    assert_eq!(second.get("name"), Some(Value::from("Bob")));
}

#[test]
fn test_self_cycle() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    ann.set("friend", ann.clone()).unwrap();
    let decoded = round_trip(&codec, &Value::Object(ann));
    let object = decoded.as_object().unwrap();
    let friend = object.get("friend").unwrap();
    assert!(ObjectRef::ptr_eq(object, friend.as_object().unwrap()));
}

#[test]
fn test_mutual_cycle() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    let bob = person(&codec, "Bob", 41);
    ann.set("friend", bob.clone()).unwrap();
    bob.set("friend", ann.clone()).unwrap();
    let root = Value::Object(ann);
    let decoded = round_trip(&codec, &root);
    assert!(graph_eq(&root, &decoded));

    let ann = decoded.as_object().unwrap();
    let bob = ann.get("friend").unwrap();
    let back = bob.as_object().unwrap().get("friend").unwrap();
    assert!(ObjectRef::ptr_eq(ann, back.as_object().unwrap()));
    assert_eq!(bob.as_object().unwrap().get("age"), Some(Value::from(41i32)));
}

#[test]
fn test_equal_copies_stay_distinct() {
    let codec = codec();
    let list = CollectionRef::list_of(TypeDesc::named(PERSON));
    list.push(Value::Object(person(&codec, "Ann", 30))).unwrap();
    list.push(Value::Object(person(&codec, "Ann", 30))).unwrap();
    let root = Value::Collection(list);
    let decoded = round_trip(&codec, &root);
    assert!(graph_eq(&root, &decoded));
    let elements = decoded.as_collection().unwrap().elements();
    assert!(!ObjectRef::ptr_eq(
        elements[0].as_object().unwrap(),
        elements[1].as_object().unwrap()
    ));
}

#[test]
fn test_array_containing_itself() {
    let codec = codec();
    let array = ArrayRef::with_len(TypeDesc::array_of(TypeDesc::named("i32")), 2);
    array.set(0, Value::Array(array.clone())).unwrap();
    let inner = ArrayRef::new(TypeDesc::named("i32"), vec![Value::from(1i32), Value::from(2i32)]);
    array.set(1, Value::Array(inner)).unwrap();

    let root = Value::Array(array);
    let decoded = round_trip(&codec, &root);
    assert!(graph_eq(&root, &decoded));
    let decoded = decoded.as_array().unwrap();
    assert!(ArrayRef::ptr_eq(decoded, decoded.get(0).unwrap().as_array().unwrap()));
    assert_eq!(
        decoded.get(1).unwrap().as_array().unwrap().items(),
        vec![Value::from(1i32), Value::from(2i32)]
    );
}

#[test]
fn test_list_containing_itself() {
    let codec = codec();
    let list = CollectionRef::list_of(TypeDesc::named("string"));
    list.push(Value::from("head")).unwrap();
    list.push(Value::Collection(list.clone())).unwrap();
    let decoded = round_trip(&codec, &Value::Collection(list));
    let decoded = decoded.as_collection().unwrap();
    let elements = decoded.elements();
    assert_eq!(elements[0], Value::from("head"));
    assert!(CollectionRef::ptr_eq(decoded, elements[1].as_collection().unwrap()));
}

#[test]
fn test_map_with_shared_object_keys() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    let bob = person(&codec, "Bob", 41);
    let map = CollectionRef::map_of(TypeDesc::named(PERSON), TypeDesc::named(PERSON));
    map.insert(Value::Object(ann.clone()), Value::Object(bob.clone())).unwrap();
    map.insert(Value::Object(bob), Value::Object(ann)).unwrap();

    let root = Value::Collection(map);
    let decoded = round_trip(&codec, &root);
    assert!(graph_eq(&root, &decoded));

    let entries = decoded.as_collection().unwrap().entries();
    assert_eq!(entries.len(), 2);
    assert!(ObjectRef::ptr_eq(
        entries[0].0.as_object().unwrap(),
        entries[1].1.as_object().unwrap()
    ));
    assert!(ObjectRef::ptr_eq(
        entries[0].1.as_object().unwrap(),
        entries[1].0.as_object().unwrap()
    ));
}

#[test]
fn test_map_lookup_after_round_trip() {
    let codec = codec();
    let map = CollectionRef::map_of(TypeDesc::named("string"), TypeDesc::named("i64"));
    map.insert(Value::from("one"), Value::from(1i64)).unwrap();
    map.insert(Value::from("two"), Value::from(2i64)).unwrap();
    let decoded = round_trip(&codec, &Value::Collection(map));
    let decoded = decoded.as_collection().unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(&Value::from("two")), Some(Value::from(2i64)));
    assert_eq!(decoded.get(&Value::from("three")), None);
}

#[test]
fn test_shared_type_descriptor() {
    let codec = codec();
    let ty = TypeDesc::list_of(TypeDesc::named(EMPLOYEE));
    let array = ArrayRef::new(
        TypeDesc::named("string"),
        vec![Value::Type(ty.clone()), Value::Type(ty.clone())],
    );
    let text = codec.to_text(&Value::Array(array)).unwrap();
    assert_eq!(text.lines().filter(|l| *l == "Type").count(), 1);
    assert_eq!(text.lines().filter(|l| *l == "Reference").count(), 1);

    let decoded = codec.from_text(&text).unwrap();
    let items = decoded.as_array().unwrap().items();
    assert_eq!(items[0].as_type(), Some(&ty));
    assert_eq!(items[1].as_type(), Some(&ty));
}

#[test]
fn test_identity_does_not_span_calls() {
    let codec = codec();
    let ann = Value::Object(person(&codec, "Ann", 30));
    let first = codec.to_text(&ann).unwrap();
    let second = codec.to_text(&ann).unwrap();
    assert_eq!(first, second);
    assert!(!first.contains("Reference"));
}

#[test]
fn test_back_reference_at_depth_limit() {
    let codec = codec().max_depth(1);
    let array = ArrayRef::with_len(TypeDesc::named("string"), 1);
    array.set(0, Value::Array(array.clone())).unwrap();
    let text = codec.to_text(&Value::Array(array)).unwrap();
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec!["root", "Enumerable", "1", "false", "string", "0", "Reference", "1"]
    );
    let decoded = codec.from_text(&text).unwrap();
    let decoded = decoded.as_array().unwrap();
    assert!(ArrayRef::ptr_eq(decoded, decoded.get(0).unwrap().as_array().unwrap()));
}
