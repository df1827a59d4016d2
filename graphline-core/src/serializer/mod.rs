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

//! Node framing and per-category payload codecs.
//!
//! A node is a name line, a tag line, then a payload whose shape depends on
//! the tag. `write_node` and `read_node` handle the framing, back-references
//! and the depth limit. The [`Serializer`] impls in the submodules handle
//! the payloads.

use crate::error::Error;
use crate::meta::{MemberInfo, TypeDesc};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::SerializationType;
use crate::value::{
    ArrayRef, CallableRef, CollectionRef, EnumValue, NativeHandle, Primitive, Value,
};
use std::str::FromStr;
use tracing::trace;

mod array;
mod collection;
mod delegate;
mod enum_;
mod handle;
mod member;
pub mod primitive;
mod string;
mod struct_;
mod type_;

/// Payload codec of one node category.
pub trait Serializer: Sized {
    /// Writes everything after the tag line.
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error>;

    /// Reads everything after the tag line. `key` is the index of that line.
    fn read_data(context: &mut ReadContext, key: usize) -> Result<Self, Error>;
}

/// A named node of the wire format.
///
/// The decoder hands one back from
/// [`Codec::deserialize_node`](crate::codec::Codec::deserialize_node) so the
/// caller can tell a legitimately absent object (`allow_null`) from a real
/// value.
#[derive(Clone, Debug)]
pub struct ObjectReference {
    name: String,
    value: Value,
    tag: SerializationType,
    allow_null: bool,
}

impl ObjectReference {
    /// A node for `value`, tagged by its category.
    pub fn new<S: Into<String>>(name: S, value: Value) -> ObjectReference {
        let tag = SerializationType::of(&value);
        ObjectReference {
            name: name.into(),
            value,
            tag,
            allow_null: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn tag(&self) -> SerializationType {
        self.tag
    }

    /// Set on decode when the object's type has no default constructor and
    /// the value was therefore replaced by null.
    pub fn allow_null(&self) -> bool {
        self.allow_null
    }
}

impl SerializationType {
    /// Category of a value. Rules are checked in this order and the first
    /// match wins: null, handle, callable, member, type, enum, array,
    /// collection, string, primitive, and finally object.
    pub fn of(value: &Value) -> SerializationType {
        match value {
            Value::Null => SerializationType::Null,
            Value::Handle(_) => SerializationType::IntPtr,
            Value::Delegate(_) => SerializationType::Delegate,
            Value::Member(_) => SerializationType::MemberInfo,
            Value::Type(_) => SerializationType::Type,
            Value::Enum(_) => SerializationType::Enum,
            Value::Array(_) => SerializationType::Enumerable,
            Value::Collection(_) => SerializationType::GenericEnumerable,
            Value::String(_) => SerializationType::String,
            Value::Primitive(_) => SerializationType::Any,
            Value::Object(_) => SerializationType::Object,
        }
    }
}

/// Writes one node: its name, then either a back-reference or its tag and
/// payload.
pub fn write_node(context: &mut WriteContext, node: &ObjectReference) -> Result<(), Error> {
    context.writer.write_line(node.name())?;
    if context.ref_writer.try_write_ref(&mut context.writer, node)? {
        trace!(name = node.name(), "wrote back-reference");
        return Ok(());
    }
    context.writer.write_line(&node.tag)?;
    context.inc_depth()?;
    let result = write_payload(context, &node.value);
    context.dec_depth();
    result
}

fn write_payload(context: &mut WriteContext, value: &Value) -> Result<(), Error> {
    match value {
        Value::Null => Ok(()),
        Value::Handle(handle) => handle.write_data(context),
        Value::Primitive(primitive) => primitive.write_data(context),
        Value::String(text) => text.write_data(context),
        Value::Enum(constant) => constant.write_data(context),
        Value::Array(array) => array.write_data(context),
        Value::Collection(collection) => collection.write_data(context),
        Value::Object(object) => struct_::write_object(context, object),
        Value::Type(ty) => ty.write_data(context),
        Value::Member(member) => member.write_data(context),
        Value::Delegate(callable) => callable.write_data(context),
    }
}

/// Reads one node, resolving back-references against the nodes read so far.
pub fn read_node(context: &mut ReadContext) -> Result<ObjectReference, Error> {
    let name = context.reader.read_line()?;
    let tag_text = context.reader.read_line()?;
    let key = context.reader.line() - 1;
    let tag = SerializationType::from_str(&tag_text).map_err(|_| {
        Error::format(format!("unrecognized tag {:?} at line {}", tag_text, key))
    })?;
    let mut node = ObjectReference {
        name,
        value: Value::Null,
        tag,
        allow_null: false,
    };
    // back-references add no nesting, as in write_node
    if tag == SerializationType::Reference {
        read_payload(context, &mut node, key)?;
    } else {
        context.inc_depth()?;
        let result = read_payload(context, &mut node, key);
        context.dec_depth();
        result?;
    }
    if node.value.is_null() && !node.allow_null && node.tag != SerializationType::Null {
        return Err(Error::format(format!(
            "failed to deserialize {} node {:?} at line {}",
            node.tag, node.name, key
        )));
    }
    Ok(node)
}

fn read_payload(
    context: &mut ReadContext,
    node: &mut ObjectReference,
    key: usize,
) -> Result<(), Error> {
    node.value = match node.tag {
        SerializationType::Null => Value::Null,
        SerializationType::Reference => {
            let target = context.reader.read_usize()?;
            trace!(name = node.name(), key = target, "resolving back-reference");
            context.ref_reader.resolve(target)?
        }
        SerializationType::IntPtr => Value::Handle(NativeHandle::read_data(context, key)?),
        SerializationType::Any => Value::Primitive(Primitive::read_data(context, key)?),
        SerializationType::String => Value::String(String::read_data(context, key)?),
        SerializationType::Enum => Value::Enum(EnumValue::read_data(context, key)?),
        SerializationType::Enumerable => Value::Array(ArrayRef::read_data(context, key)?),
        SerializationType::GenericEnumerable => {
            Value::Collection(CollectionRef::read_data(context, key)?)
        }
        SerializationType::Object => match struct_::read_object(context, key)? {
            Some(object) => Value::Object(object),
            None => {
                node.allow_null = true;
                Value::Null
            }
        },
        SerializationType::Type => Value::Type(TypeDesc::read_data(context, key)?),
        SerializationType::MemberInfo => Value::Member(MemberInfo::read_data(context, key)?),
        SerializationType::Delegate => Value::Delegate(CallableRef::read_data(context, key)?),
    };
    Ok(())
}
