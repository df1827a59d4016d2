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

//! # Graphline Core
//!
//! Core implementation of graphline, a line-oriented text format for
//! arbitrary object graphs. Shared objects are written once and referred to
//! afterwards, so identity and cycles survive a round trip.
//!
//! ## Architecture
//!
//! - **`codec`**: the public entry point, [`Codec`]
//! - **`buffer`**: line-framed reader and writer, string escaping
//! - **`value`**: the dynamic object model the codec walks
//! - **`meta`**: type descriptors and registration-time type definitions
//! - **`resolver`**: type registry, reference tables and per-call contexts
//! - **`serializer`**: node framing and the codec of each node category
//! - **`types`**: tags, member kinds and wire constants
//! - **`error`**: error type and helper macros
//! - **`util`**: structural comparison of graphs
//!
//! ## Wire format
//!
//! Every node is a name line, a tag line and a tag-specific payload. The
//! zero-based index of a node's tag line is its key: a later node with the
//! same identity is written as a `Reference` tag followed by that key.
//!
//! ```text
//! root
//! Object
//! false
//! demo.Person
//! 2
//! name
//! String
//! Ada
//! friend
//! Reference
//! 1
//! ```
//!
//! ## Type system
//!
//! There is no runtime reflection. Types are described by [`meta::TypeDef`]s
//! grouped into [`meta::TypeModule`]s and registered on the codec. The
//! built-in `core` module provides the primitives, `string`, `handle`,
//! `Array<T>`, `List<T>` and `Map<K, V>`.

pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod meta;
pub mod resolver;
pub mod serializer;
pub mod types;
pub mod util;
pub mod value;

pub use codec::Codec;
pub use config::Config;
pub use error::Error;
pub use serializer::ObjectReference;
pub use types::SerializationType;
pub use value::Value;
