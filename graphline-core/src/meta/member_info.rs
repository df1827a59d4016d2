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

use crate::meta::TypeDesc;
use crate::types::MemberKind;
use std::fmt;

/// Serializable reference to a method, field or property of a registered type.
///
/// Descriptors compare by value; two descriptors naming the same member are
/// shared on the wire like any other reference-eligible node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    name: String,
    declaring_type: TypeDesc,
    kind: MemberKind,
}

impl MemberInfo {
    pub fn new<S: Into<String>>(name: S, declaring_type: TypeDesc, kind: MemberKind) -> Self {
        MemberInfo {
            name: name.into(),
            declaring_type,
            kind,
        }
    }

    pub fn method<S: Into<String>>(name: S, declaring_type: TypeDesc) -> Self {
        Self::new(name, declaring_type, MemberKind::Method)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &TypeDesc {
        &self.declaring_type
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }
}

impl fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{} ({})", self.declaring_type, self.name, self.kind)
    }
}
