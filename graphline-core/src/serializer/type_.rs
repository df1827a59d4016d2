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
use crate::meta::TypeDesc;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::Serializer;
use crate::value::Value;

impl Serializer for TypeDesc {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        TypeResolver::write_type(context, self)
    }

    fn read_data(context: &mut ReadContext, key: usize) -> Result<Self, Error> {
        context.ref_reader.reserve(key);
        let ty = context.type_resolver().read_type(context)?;
        context.ref_reader.assign(key, Value::Type(ty.clone()));
        Ok(ty)
    }
}
