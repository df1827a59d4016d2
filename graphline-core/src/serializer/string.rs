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

use crate::buffer::{escape_line, unescape_line};
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::Serializer;
use tracing::warn;

impl Serializer for String {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        if context.config().is_escape_strings() {
            return context.writer.write_line(&escape_line(self));
        }
        if self.contains(['\n', '\r']) {
            warn!(
                line = context.writer.line(),
                "writing unescaped string with a line break, the stream will not decode"
            );
        }
        context.writer.write_line(self.as_str())
    }

    fn read_data(context: &mut ReadContext, _key: usize) -> Result<Self, Error> {
        let line = context.reader.read_line()?;
        if context.config().is_escape_strings() {
            unescape_line(&line)
        } else {
            Ok(line)
        }
    }
}
