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

use crate::types::names;
use std::fmt;

/// Portable description of a concrete runtime type.
///
/// `name` is the qualified name of a registered definition; `args` are the
/// bound generic arguments. A descriptor is generic exactly when it carries
/// arguments. Arrays are the built-in generic definition `Array`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    name: String,
    args: Vec<TypeDesc>,
}

impl TypeDesc {
    pub fn named<S: Into<String>>(name: S) -> TypeDesc {
        TypeDesc {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic<S: Into<String>>(name: S, args: Vec<TypeDesc>) -> TypeDesc {
        TypeDesc {
            name: name.into(),
            args,
        }
    }

    pub fn array_of(element: TypeDesc) -> TypeDesc {
        TypeDesc::generic(names::ARRAY, vec![element])
    }

    pub fn list_of(element: TypeDesc) -> TypeDesc {
        TypeDesc::generic(names::LIST, vec![element])
    }

    pub fn map_of(key: TypeDesc, value: TypeDesc) -> TypeDesc {
        TypeDesc::generic(names::MAP, vec![key, value])
    }

    /// Qualified name of the (generic) definition.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn args(&self) -> &[TypeDesc] {
        &self.args
    }

    #[inline(always)]
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    pub fn is_array(&self) -> bool {
        self.name == names::ARRAY && self.args.len() == 1
    }

    /// Element type of an array descriptor.
    pub fn element(&self) -> Option<&TypeDesc> {
        if self.is_array() {
            self.args.first()
        } else {
            None
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(element) = self.element() {
            return write!(f, "{}[]", element);
        }
        f.write_str(&self.name)?;
        if self.is_generic() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl From<&str> for TypeDesc {
    fn from(name: &str) -> Self {
        TypeDesc::named(name)
    }
}
