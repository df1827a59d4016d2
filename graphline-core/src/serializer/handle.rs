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
use crate::serializer::Serializer;
use crate::value::NativeHandle;

/// A native handle is its signed 64-bit integer value on one line.
impl Serializer for NativeHandle {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        context.writer.write_i64(self.0)
    }

    fn read_data(context: &mut ReadContext, _key: usize) -> Result<Self, Error> {
        Ok(NativeHandle(context.reader.read_i64()?))
    }
}
