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

use crate::buffer::LineWriter;
use crate::error::Error;
use crate::meta::{MemberInfo, TypeDesc};
use crate::serializer::ObjectReference;
use crate::types::SerializationType;
use crate::value::Value;
use std::collections::HashMap;

/// What makes two nodes "the same" for back-referencing.
///
/// Shared handles compare by allocation address. Type and member descriptors
/// are plain values in this model, so they compare by equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Identity {
    Address(usize),
    Type(TypeDesc),
    Member(MemberInfo),
}

impl Identity {
    fn of(value: &Value) -> Option<Identity> {
        match value {
            Value::Type(ty) => Some(Identity::Type(ty.clone())),
            Value::Member(member) => Some(Identity::Member(member.clone())),
            other => other.address().map(Identity::Address),
        }
    }
}

/// Reference writer for tracking shared nodes during serialization.
///
/// RefWriter maps the identity of every reference-eligible node already
/// written to its key, the zero-based index of the line holding the node's
/// tag. When the same identity is met again, a `Reference` tag and the key
/// are written in place of the node.
///
/// # Examples
///
/// ```rust
/// use graphline_core::buffer::LineWriter;
/// use graphline_core::meta::TypeDesc;
/// use graphline_core::resolver::ref_resolver::RefWriter;
/// use graphline_core::serializer::ObjectReference;
/// use graphline_core::value::Value;
///
/// let mut out = Vec::new();
/// let mut writer = LineWriter::new(&mut out);
/// let mut ref_writer = RefWriter::new();
/// let node = ObjectReference::new("root", Value::Type(TypeDesc::named("i32")));
///
/// // First encounter: the caller writes the node itself.
/// writer.write_line("root").unwrap();
/// assert!(!ref_writer.try_write_ref(&mut writer, &node).unwrap());
/// ```
#[derive(Default)]
pub struct RefWriter {
    /// Maps node identities to keys
    refs: HashMap<Identity, usize>,
    /// Every recorded value, so no address is reused while the call runs
    pinned: Vec<Value>,
}

impl RefWriter {
    /// Creates a new RefWriter instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to write a back-reference for `node`.
    ///
    /// Must be called after the node's name line and before its tag line.
    ///
    /// # Returns
    ///
    /// * `true` if a `Reference` tag and key were written
    /// * `false` if the node must be written in full. For an eligible node
    ///   its identity is now recorded under the upcoming tag line.
    pub fn try_write_ref(
        &mut self,
        writer: &mut LineWriter,
        node: &ObjectReference,
    ) -> Result<bool, Error> {
        if !node.tag().is_reference_eligible() {
            return Ok(false);
        }
        let Some(identity) = Identity::of(node.value()) else {
            return Ok(false);
        };
        if let Some(&key) = self.refs.get(&identity) {
            writer.write_line(&SerializationType::Reference)?;
            writer.write_usize(key)?;
            return Ok(true);
        }
        self.refs.insert(identity, writer.line());
        self.pinned.push(node.value().clone());
        Ok(false)
    }

    /// Number of identities recorded so far.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// Reference reader for resolving back-references during deserialization.
///
/// A reference-eligible node reserves its key before any child is read and
/// fills the slot once its value exists, so children may refer to an
/// enclosing object or collection. A reference to a key that was never
/// reserved, or whose slot is still empty, is dangling.
///
/// # Examples
///
/// ```rust
/// use graphline_core::resolver::ref_resolver::RefReader;
/// use graphline_core::value::Value;
///
/// let mut ref_reader = RefReader::new();
/// ref_reader.reserve(1);
/// assert!(ref_reader.resolve(1).is_err());
///
/// ref_reader.assign(1, Value::from("shared"));
/// assert_eq!(ref_reader.resolve(1).unwrap(), Value::from("shared"));
/// ```
#[derive(Default)]
pub struct RefReader {
    slots: HashMap<usize, Option<Value>>,
}

impl RefReader {
    /// Creates a new RefReader instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `key` with an empty slot.
    pub fn reserve(&mut self, key: usize) {
        self.slots.insert(key, None);
    }

    /// Fills the slot of `key`. A null value leaves the slot empty.
    pub fn assign(&mut self, key: usize, value: Value) {
        if !value.is_null() {
            self.slots.insert(key, Some(value));
        }
    }

    /// The value recorded under `key`.
    pub fn resolve(&self, key: usize) -> Result<Value, Error> {
        match self.slots.get(&key) {
            Some(Some(value)) => Ok(value.clone()),
            _ => Err(Error::dangling_reference(key)),
        }
    }
}
