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
use crate::ensure;
use crate::error::Error;
use crate::meta::TypeModule;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{read_node, write_node, ObjectReference};
use crate::types::ROOT_NAME;
use crate::value::Value;
use std::io::{BufRead, BufWriter, Cursor, Seek, SeekFrom, Write};
use tracing::debug;

/// The main entry point of graphline.
///
/// A `Codec` owns a [`Config`] and a [`TypeResolver`]. Every call builds a
/// fresh context, so identity sharing never spans two calls.
///
/// # Examples
///
/// ```rust
/// use graphline_core::meta::{TypeDef, TypeDesc, TypeModule};
/// use graphline_core::value::Value;
/// use graphline_core::Codec;
///
/// let mut codec = Codec::default();
/// let node_type = TypeDef::class("demo.Node").field("next", Value::Null);
/// codec
///     .register_module(TypeModule::new("demo").with(node_type))
///     .unwrap();
///
/// let node = codec.type_resolver().construct(&TypeDesc::named("demo.Node")).unwrap();
/// node.as_object().unwrap().set("next", node.clone()).unwrap();
///
/// let text = codec.to_text(&node).unwrap();
/// let back = codec.from_text(&text).unwrap();
/// let object = back.as_object().unwrap();
/// assert_eq!(object.get("next").unwrap(), back);
/// ```
///
/// Custom configuration:
///
/// ```rust
/// use graphline_core::Codec;
///
/// let codec = Codec::default().escape_strings(false).max_depth(64);
/// ```
#[derive(Default)]
pub struct Codec {
    config: Config,
    type_resolver: TypeResolver,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Codec {
            config,
            type_resolver: TypeResolver::default(),
        }
    }

    /// Enables or disables escaping of line breaks and backslashes in
    /// string values.
    ///
    /// # Default
    ///
    /// The default value is `true`. With escaping disabled a string holding
    /// a line break produces a stream that cannot be decoded.
    pub fn escape_strings(mut self, escape_strings: bool) -> Self {
        self.config.escape_strings = escape_strings;
        self
    }

    /// Sets the maximum nesting depth of nodes.
    ///
    /// # Behavior
    ///
    /// Exceeding the limit on either side fails the call with
    /// [`Error::DepthExceed`] instead of overflowing the stack.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn type_resolver(&self) -> &TypeResolver {
        &self.type_resolver
    }

    /// Registers a module of type definitions. Modules are searched in
    /// registration order, after the built-in `core` module.
    pub fn register_module(&mut self, module: TypeModule) -> Result<(), Error> {
        self.type_resolver.register_module(module)
    }

    /// Writes the graph reachable from `root` at the stream's current
    /// position, then rewinds the stream to its start.
    ///
    /// The root node is named `root`. A null root is rejected.
    pub fn serialize<S: Write + Seek>(&self, stream: &mut S, root: &Value) -> Result<(), Error> {
        ensure!(
            !root.is_null(),
            Error::argument("cannot serialize a null root")
        );
        let (lines, shared) = {
            let mut buffered = BufWriter::new(&mut *stream);
            let mut context = WriteContext::new(&self.config, LineWriter::new(&mut buffered));
            write_node(&mut context, &ObjectReference::new(ROOT_NAME, root.clone()))?;
            context.writer.flush()?;
            (context.writer.line(), context.ref_writer.len())
        };
        stream.seek(SeekFrom::Start(0))?;
        debug!(lines, shared, "serialized object graph");
        Ok(())
    }

    /// Reads one graph and returns its root value.
    pub fn deserialize<S: BufRead>(&self, stream: &mut S) -> Result<Value, Error> {
        Ok(self.deserialize_node(stream)?.into_value())
    }

    /// Reads one graph and returns its root node, including its name and the
    /// `allow_null` flag.
    ///
    /// Only the lines of the graph are consumed.
    pub fn deserialize_node<S: BufRead>(&self, stream: &mut S) -> Result<ObjectReference, Error> {
        let mut context = ReadContext::new(&self.type_resolver, &self.config, LineReader::new(stream));
        ensure!(
            !context.reader.is_at_end()?,
            Error::format("cannot deserialize an empty stream")
        );
        let node = read_node(&mut context)?;
        debug!(
            lines = context.reader.line(),
            tag = %node.tag(),
            "deserialized object graph"
        );
        Ok(node)
    }

    /// Serializes into a string.
    pub fn to_text(&self, root: &Value) -> Result<String, Error> {
        let mut cursor = Cursor::new(Vec::new());
        self.serialize(&mut cursor, root)?;
        String::from_utf8(cursor.into_inner())
            .map_err(|e| Error::format(format!("serialized graph is not UTF-8: {}", e)))
    }

    /// Deserializes from a string.
    pub fn from_text(&self, text: &str) -> Result<Value, Error> {
        self.deserialize(&mut text.as_bytes())
    }
}
