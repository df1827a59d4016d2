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

//! Field-bearing objects.
//!
//! The payload is the runtime type, then for each level of the hierarchy
//! from the most-derived type outward, the level's field count followed by
//! one node per field. Every level is written, including levels that
//! declare no fields.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{read_node, write_node, ObjectReference};
use crate::value::{ObjectRef, Value};
use tracing::warn;

pub(super) fn write_object(context: &mut WriteContext, object: &ObjectRef) -> Result<(), Error> {
    TypeResolver::write_type(context, &object.type_desc())?;
    for level in 0..object.level_count() {
        let fields = object.fields_at(level);
        context.writer.write_usize(fields.len())?;
        for (name, value) in fields {
            write_node(context, &ObjectReference::new(name, value))?;
        }
    }
    Ok(())
}

/// Reads an object payload.
///
/// Returns `None` when the type has no default constructor. The fields are
/// still consumed and checked against the type so the stream stays in step.
pub(super) fn read_object(context: &mut ReadContext, key: usize) -> Result<Option<ObjectRef>, Error> {
    context.ref_reader.reserve(key);
    let resolver = context.type_resolver();
    let ty = resolver.read_type(context)?;
    let levels = resolver.hierarchy(&ty)?;
    let object = match resolver.construct(&ty) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => return Err(Error::format(format!("type {} is not a class type", ty))),
        Err(err) if err.is_constructor_missing() => {
            warn!(type_name = %ty, line = key, "type has no default constructor, decoding as null");
            None
        }
        Err(err) => return Err(err),
    };
    if let Some(object) = &object {
        context.ref_reader.assign(key, Value::Object(object.clone()));
    }
    for (level, (declaring_type, class)) in levels.iter().enumerate() {
        let count = context.reader.read_usize()?;
        for _ in 0..count {
            let field = read_node(context)?;
            if class.field(field.name()).is_none() {
                return Err(Error::missing_field(
                    declaring_type.to_string(),
                    field.name().to_owned(),
                ));
            }
            if let Some(object) = &object {
                let name = field.name().to_owned();
                object.set_at(level, &name, field.into_value())?;
            }
        }
    }
    Ok(object)
}
