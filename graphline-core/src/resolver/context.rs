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

use crate::buffer::{LineReader, LineWriter};
use crate::config::Config;
use crate::error::Error;
use crate::resolver::ref_resolver::{RefReader, RefWriter};
use crate::resolver::type_resolver::TypeResolver;

fn depth_exceeded(max_depth: u32, current_depth: u32) -> Error {
    Error::depth_exceed(format!(
        "Maximum object nesting depth ({}) exceeded. Current depth: {}. \
        Consider increasing max_depth if this is expected.",
        max_depth, current_depth
    ))
}

/// State of one `serialize` call.
pub struct WriteContext<'se> {
    pub writer: LineWriter<'se>,
    pub ref_writer: RefWriter,
    config: &'se Config,
    current_depth: u32,
}

impl<'se> WriteContext<'se> {
    pub fn new(config: &'se Config, writer: LineWriter<'se>) -> WriteContext<'se> {
        WriteContext {
            writer,
            ref_writer: RefWriter::new(),
            config,
            current_depth: 0,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &'se Config {
        self.config
    }

    #[inline(always)]
    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.config.max_depth() {
            return Err(depth_exceeded(self.config.max_depth(), self.current_depth));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}

/// State of one `deserialize` call.
pub struct ReadContext<'de> {
    pub reader: LineReader<'de>,
    pub ref_reader: RefReader,
    type_resolver: &'de TypeResolver,
    config: &'de Config,
    current_depth: u32,
}

impl<'de> ReadContext<'de> {
    pub fn new(
        type_resolver: &'de TypeResolver,
        config: &'de Config,
        reader: LineReader<'de>,
    ) -> ReadContext<'de> {
        ReadContext {
            reader,
            ref_reader: RefReader::new(),
            type_resolver,
            config,
            current_depth: 0,
        }
    }

    /// The registry outlives the context, so the returned reference does not
    /// keep `self` borrowed while children are read.
    #[inline(always)]
    pub fn type_resolver(&self) -> &'de TypeResolver {
        self.type_resolver
    }

    #[inline(always)]
    pub fn config(&self) -> &'de Config {
        self.config
    }

    #[inline(always)]
    pub fn inc_depth(&mut self) -> Result<(), Error> {
        self.current_depth += 1;
        if self.current_depth > self.config.max_depth() {
            return Err(depth_exceeded(self.config.max_depth(), self.current_depth));
        }
        Ok(())
    }

    #[inline(always)]
    pub fn dec_depth(&mut self) {
        self.current_depth = self.current_depth.saturating_sub(1);
    }
}
