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

use strum_macros::{Display, EnumString, IntoStaticStr};

/// Category tag written on every node's tag line.
///
/// The variant name is the wire text, e.g. `GenericEnumerable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum SerializationType {
    Null,
    IntPtr,
    /// Converter-representable primitive (booleans, numbers, characters, dates).
    Any,
    String,
    /// Fixed-shape sequence with a uniform element type.
    Enumerable,
    /// Parameterized collection, list-like or map-like.
    GenericEnumerable,
    Enum,
    Type,
    Delegate,
    MemberInfo,
    Object,
    /// Back-reference to a previously written node.
    Reference,
}

impl SerializationType {
    /// Whether nodes of this category take part in identity sharing.
    /// Primitive, string, enum and null nodes are copied at every occurrence.
    #[inline(always)]
    pub fn is_reference_eligible(self) -> bool {
        matches!(
            self,
            SerializationType::Enumerable
                | SerializationType::GenericEnumerable
                | SerializationType::Object
                | SerializationType::MemberInfo
                | SerializationType::Delegate
                | SerializationType::Type
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum MemberKind {
    Method,
    Field,
    Property,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Map,
}

/// Marker lines of the delegate protocol.
pub const BOUND_TARGET: &str = "target";
pub const NULL_TARGET: &str = "null_target";
pub const DELEGATE_TARGET_NAME: &str = "delegateTarget";
pub const ROOT_NAME: &str = "root";

/// Separator between an enclosing type and a nested type, as in `Outer+Inner`.
pub const NESTED_SEPARATOR: char = '+';

/// Names of the definitions in the built-in `core` module.
pub mod names {
    pub const CORE_MODULE: &str = "core";
    pub const BOOL: &str = "bool";
    pub const CHAR: &str = "char";
    pub const I8: &str = "i8";
    pub const I16: &str = "i16";
    pub const I32: &str = "i32";
    pub const I64: &str = "i64";
    pub const U8: &str = "u8";
    pub const U16: &str = "u16";
    pub const U32: &str = "u32";
    pub const U64: &str = "u64";
    pub const F32: &str = "f32";
    pub const F64: &str = "f64";
    pub const DATE: &str = "date";
    pub const DATETIME: &str = "datetime";
    pub const STRING: &str = "string";
    pub const HANDLE: &str = "handle";
    pub const ARRAY: &str = "Array";
    pub const LIST: &str = "List";
    pub const MAP: &str = "Map";
}
