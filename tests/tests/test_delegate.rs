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

//! Callables and member descriptors.


use fixtures::{codec, person, round_trip, BINARY_OP, CALLBACK, COUNTER, EMPLOYEE, PERSON};
use graphline::{
    CallableRef, CollectionRef, Error, MemberInfo, MemberKind, ObjectRef, TypeDesc, Value,
};
use graphline_core::resolver::type_resolver::MemberRef;

#[test]
fn test_bound_delegate_invokes_after_round_trip() {
    let codec = codec();
    let ann = person(&codec, "Ann", 30);
    let greet = codec
        .type_resolver()
        .bind_method(
            &TypeDesc::named(CALLBACK),
            &TypeDesc::named(PERSON),
            "greet",
            Some(Value::Object(ann)),
        )
        .unwrap();
    assert_eq!(greet.invoke(&[]).unwrap(), Value::from("Hello, Ann"));

    let text = codec.to_text(&Value::Delegate(greet)).unwrap();
    assert!(text.lines().any(|l| l == "target"));
    assert!(text.lines().any(|l| l == "delegateTarget"));

    let decoded = codec.from_text(&text).unwrap();
    let callable = decoded.as_delegate().unwrap();
    assert!(callable.is_bound());
    assert_eq!(callable.delegate_type(), &TypeDesc::named(CALLBACK));
    assert_eq!(callable.method().name(), "greet");
    assert_eq!(callable.invoke(&[]).unwrap(), Value::from("Hello, Ann"));
}

#[test]
fn test_unbound_delegate_round_trip() {
    let codec = codec();
    let add = codec
        .type_resolver()
        .bind_method(
            &TypeDesc::named(BINARY_OP),
            &TypeDesc::named(PERSON),
            "add",
            None,
        )
        .unwrap();
    let text = codec.to_text(&Value::Delegate(add)).unwrap();
    assert!(text.ends_with("Method\nnull_target\n"));

    let decoded = codec.from_text(&text).unwrap();
    let callable = decoded.as_delegate().unwrap();
    assert!(!callable.is_bound());
    let sum = callable
        .invoke(&[Value::from(40i64), Value::from(2i32)])
        .unwrap();
    assert_eq!(sum, Value::from(42i64));
}

#[test]
fn test_delegate_target_shares_identity_with_graph() {
    let codec = codec();
    let counter = codec
        .type_resolver()
        .allocate(&TypeDesc::named(COUNTER))
        .unwrap();
    let increment = codec
        .type_resolver()
        .bind_method(
            &TypeDesc::named(CALLBACK),
            &TypeDesc::named(COUNTER),
            "increment",
            Some(Value::Object(counter.clone())),
        )
        .unwrap();
    let list = CollectionRef::list_of(TypeDesc::named("string"));
    list.push(Value::Object(counter)).unwrap();
    list.push(Value::Delegate(increment.clone())).unwrap();
    list.push(Value::Delegate(increment)).unwrap();

    let decoded = round_trip(&codec, &Value::Collection(list));
    let elements = decoded.as_collection().unwrap().elements();
    let counter = elements[0].as_object().unwrap();
    let first = elements[1].as_delegate().unwrap();
    let second = elements[2].as_delegate().unwrap();
    assert!(CallableRef::ptr_eq(first, second));
    assert!(ObjectRef::ptr_eq(
        counter,
        first.target().unwrap().as_object().unwrap()
    ));

    first.invoke(&[]).unwrap();
    second.invoke(&[]).unwrap();
    assert_eq!(counter.get("count"), Some(Value::from(2i64)));
}

#[test]
fn test_inherited_method_binds_on_derived_type() {
    let codec = codec();
    let resolver = codec.type_resolver();
    let employee = resolver.allocate(&TypeDesc::named(EMPLOYEE)).unwrap();
    employee.set("name", "Eve").unwrap();
    let greet = resolver
        .bind_method(
            &TypeDesc::named(CALLBACK),
            &TypeDesc::named(EMPLOYEE),
            "greet",
            Some(Value::Object(employee)),
        )
        .unwrap();
    let decoded = round_trip(&codec, &Value::Delegate(greet));
    let callable = decoded.as_delegate().unwrap();
    assert_eq!(callable.method().declaring_type(), &TypeDesc::named(EMPLOYEE));
    assert_eq!(callable.invoke(&[]).unwrap(), Value::from("Hello, Eve"));
}

#[test]
fn test_bind_rejects_misuse() {
    let codec = codec();
    let resolver = codec.type_resolver();
    let callback = TypeDesc::named(CALLBACK);
    let person_type = TypeDesc::named(PERSON);
    let ann = Value::Object(person(&codec, "Ann", 30));

    let static_with_target = resolver.bind_method(&callback, &person_type, "add", Some(ann.clone()));
    assert!(matches!(static_with_target, Err(Error::Argument(_))));

    let not_a_delegate = resolver.bind_method(&person_type, &person_type, "greet", Some(ann.clone()));
    assert!(matches!(not_a_delegate, Err(Error::Argument(_))));

    let null_target = resolver.bind_method(&callback, &person_type, "greet", Some(Value::Null));
    assert!(matches!(null_target, Err(Error::Argument(_))));

    let missing = resolver.bind_method(&callback, &person_type, "fly", Some(ann));
    assert!(matches!(missing, Err(Error::MissingMember { .. })));
}

#[test]
fn test_delegate_with_unknown_marker() {
    let codec = codec();
    let text = format!(
        "root\nDelegate\nfalse\n{CALLBACK}\nadd\nfalse\n{PERSON}\nMethod\nsomewhere\n"
    );
    assert!(matches!(codec.from_text(&text), Err(Error::Format(_))));
}

#[test]
fn test_member_info_round_trip() {
    let codec = codec();
    let members = [
        MemberInfo::new("age", TypeDesc::named(PERSON), MemberKind::Field),
        MemberInfo::new("salary", TypeDesc::named(EMPLOYEE), MemberKind::Field),
        MemberInfo::new("display_name", TypeDesc::named(PERSON), MemberKind::Property),
        MemberInfo::method("greet", TypeDesc::named(EMPLOYEE)),
    ];
    for member in members {
        let decoded = round_trip(&codec, &Value::Member(member.clone()));
        assert_eq!(decoded.as_member(), Some(&member));
    }
}

#[test]
fn test_member_info_is_shared() {
    let codec = codec();
    let member = Value::Member(MemberInfo::method("greet", TypeDesc::named(PERSON)));
    let list = CollectionRef::list_of(TypeDesc::named("string"));
    list.push(member.clone()).unwrap();
    list.push(member).unwrap();
    let text = codec.to_text(&Value::Collection(list)).unwrap();
    assert_eq!(text.lines().filter(|l| *l == "MemberInfo").count(), 1);
    let decoded = codec.from_text(&text).unwrap();
    let elements = decoded.as_collection().unwrap().elements();
    assert_eq!(elements[0], elements[1]);
}

#[test]
fn test_property_getter_through_member_lookup() {
    let codec = codec();
    let member = MemberInfo::new("display_name", TypeDesc::named(EMPLOYEE), MemberKind::Property);
    let employee = codec
        .type_resolver()
        .allocate(&TypeDesc::named(EMPLOYEE))
        .unwrap();
    employee.set("name", "eve").unwrap();
    match codec.type_resolver().find_member(&member).unwrap() {
        MemberRef::Property(property) => {
            let value = (property.getter)(&Value::Object(employee)).unwrap();
            assert_eq!(value, Value::from("EVE"));
        }
        other => panic!("expected a property, got {:?}", other),
    }
}
