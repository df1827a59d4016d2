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

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{read_node, write_node, ObjectReference, Serializer};
use crate::value::{ArrayRef, Value};

const MAX_PREALLOCATED: usize = 1024;

/// Length, element type, then one node per element named by its index.
///
/// The array is registered before any element is read, so elements may
/// refer back to the array itself.
impl Serializer for ArrayRef {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        let items = self.items();
        context.writer.write_usize(items.len())?;
        TypeResolver::write_type(context, &self.element_type())?;
        for (index, item) in items.into_iter().enumerate() {
            write_node(context, &ObjectReference::new(index.to_string(), item))?;
        }
        Ok(())
    }

    fn read_data(context: &mut ReadContext, key: usize) -> Result<Self, Error> {
        context.ref_reader.reserve(key);
        let len = context.reader.read_usize()?;
        let element_type = context.type_resolver().read_type(context)?;
        // the count is untrusted, so the array grows as elements arrive
        let array = ArrayRef::new(element_type, Vec::with_capacity(len.min(MAX_PREALLOCATED)));
        context.ref_reader.assign(key, Value::Array(array.clone()));
        for _ in 0..len {
            array.push(read_node(context)?.into_value());
        }
        Ok(array)
    }
}
