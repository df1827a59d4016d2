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

use crate::bail;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{read_node, write_node, ObjectReference, Serializer};
use crate::types::CollectionKind;
use crate::value::{CollectionRef, Value};

/// Count, the collection's type, then its contents. List elements are named
/// by index. Map entries are a `key_<i>` node followed by a `value_<i>`
/// node.
impl Serializer for CollectionRef {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_usize(self.len())?;
        TypeResolver::write_type(context, &self.type_desc())?;
        match self.kind() {
            CollectionKind::List => {
                for (index, element) in self.elements().into_iter().enumerate() {
                    write_node(context, &ObjectReference::new(index.to_string(), element))?;
                }
            }
            CollectionKind::Map => {
                for (index, (key, value)) in self.entries().into_iter().enumerate() {
                    write_node(context, &ObjectReference::new(format!("key_{index}"), key))?;
                    write_node(context, &ObjectReference::new(format!("value_{index}"), value))?;
                }
            }
        }
        Ok(())
    }

    fn read_data(context: &mut ReadContext, key: usize) -> Result<Self, Error> {
        context.ref_reader.reserve(key);
        let len = context.reader.read_usize()?;
        let ty = context.type_resolver().read_type(context)?;
        let collection = match context.type_resolver().construct(&ty) {
            Ok(Value::Collection(collection)) => collection,
            Ok(_) => bail!("type {} of a GenericEnumerable node is not a collection", ty),
            Err(err) if err.is_constructor_missing() => {
                bail!("type {} of a GenericEnumerable node is not a collection", ty)
            }
            Err(err) => return Err(err),
        };
        context
            .ref_reader
            .assign(key, Value::Collection(collection.clone()));
        match collection.kind() {
            CollectionKind::List => {
                for _ in 0..len {
                    collection.push(read_node(context)?.into_value())?;
                }
            }
            CollectionKind::Map => {
                for _ in 0..len {
                    let entry_key = read_node(context)?;
                    let entry_value = read_node(context)?;
                    if entry_key.value().is_null() {
                        bail!("null key {:?} in map {} at line {}", entry_key.name(), ty, key);
                    }
                    let name = entry_key.name().to_owned();
                    if collection
                        .insert(entry_key.into_value(), entry_value.into_value())?
                        .is_some()
                    {
                        bail!("duplicate key {:?} in map {} at line {}", name, ty, key);
                    }
                }
            }
        }
        Ok(collection)
    }
}
