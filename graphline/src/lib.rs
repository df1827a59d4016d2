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

//! # Graphline
//!
//! Graphline writes arbitrary object graphs as line-oriented text and reads
//! them back with object identity, cycles and runtime types intact.
//!
//! ## Key Features
//!
//! - **Identity Preservation**: an object reachable along several paths is
//!   written once and decoded as one shared object
//! - **Cycles**: an object may refer back to itself or to any enclosing node
//! - **Runtime Types**: every node carries its type, resolved against
//!   registered type modules on decode
//! - **Callables**: bound and unbound references to registered methods
//!   survive a round trip
//!
//! ## Usage
//!
//! ```rust
//! use graphline::{Codec, Error, TypeDef, TypeDesc, TypeModule, Value};
//!
//! # fn main() -> Result<(), Error> {
//! let mut codec = Codec::default();
//! codec.register_module(
//!     TypeModule::new("demo").with(
//!         TypeDef::class("demo.Person")
//!             .field("name", Value::Null)
//!             .field("age", 0i32)
//!             .field("friend", Value::Null),
//!     ),
//! )?;
//!
//! let person_type = TypeDesc::named("demo.Person");
//! let ada = codec.type_resolver().allocate(&person_type)?;
//! let bob = codec.type_resolver().allocate(&person_type)?;
//! ada.set("name", "Ada")?;
//! ada.set("age", 36i32)?;
//! ada.set("friend", bob.clone())?;
//! bob.set("name", "Bob")?;
//! bob.set("friend", ada.clone())?;
//!
//! let text = codec.to_text(&Value::Object(ada))?;
//! let back = codec.from_text(&text)?;
//!
//! let ada = back.as_object().unwrap();
//! let bob = ada.get("friend").unwrap();
//! assert_eq!(ada.get("age"), Some(Value::from(36i32)));
//! assert_eq!(bob.as_object().unwrap().get("friend"), Some(back.clone()));
//! # Ok(())
//! # }
//! ```
//!
//! Registration of types, the value model and lower-level pieces live in
//! [`graphline_core`].

pub use graphline_core::{
    error::Error,
    meta::{MemberInfo, TypeDef, TypeDesc, TypeModule},
    resolver::type_resolver::TypeResolver,
    types::{MemberKind, SerializationType},
    util::graph_eq,
    value::{ArrayRef, CallableRef, CollectionRef, EnumValue, NativeHandle, ObjectRef, Value},
    Codec, Config, ObjectReference,
};
