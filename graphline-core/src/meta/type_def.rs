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

//! Registration-time descriptions of types.
//!
//! There is no runtime reflection to enumerate fields or members, so every
//! type the codec can rebuild is described up front: its kind, its generic
//! arity, and for classes the ordered field table of each hierarchy level and
//! the closed set of callable members.

use crate::error::Error;
use crate::meta::TypeDesc;
use crate::types::CollectionKind;
use crate::value::{MethodFn, PrimitiveKind, Value};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub type PropertyGetter = fn(target: &Value) -> anyhow::Result<Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constructor {
    /// A no-argument constructor exists; fields start at their defaults.
    Default,
    /// Only parameterized construction exists. The decoder cannot rebuild
    /// such an object and yields an `allow_null` node instead.
    Parameterized,
}

#[derive(Clone, Debug)]
pub struct FieldDef {
    pub name: String,
    pub default: Value,
}

#[derive(Clone, Debug)]
pub struct MethodDef {
    pub name: String,
    pub is_static: bool,
    pub func: MethodFn,
}

#[derive(Clone, Debug)]
pub struct PropertyDef {
    pub name: String,
    pub is_static: bool,
    pub getter: PropertyGetter,
}

#[derive(Clone, Debug)]
pub struct ClassDef {
    pub base: Option<TypeDesc>,
    /// Fields declared by this level only, in wire order.
    pub fields: Vec<FieldDef>,
    pub constructor: Constructor,
    pub methods: Vec<MethodDef>,
    pub properties: Vec<PropertyDef>,
}

impl ClassDef {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug)]
pub enum TypeKind {
    Primitive(PrimitiveKind),
    String,
    Handle,
    Enum { constants: Vec<String> },
    Class(ClassDef),
    Collection(CollectionKind),
    Array,
    Delegate,
}

#[derive(Clone, Debug)]
pub struct TypeDef {
    name: String,
    arity: usize,
    kind: TypeKind,
}

impl TypeDef {
    pub fn new<S: Into<String>>(name: S, arity: usize, kind: TypeKind) -> TypeDef {
        TypeDef {
            name: name.into(),
            arity,
            kind,
        }
    }

    pub fn class<S: Into<String>>(name: S) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            arity: 0,
            class: ClassDef {
                base: None,
                fields: Vec::new(),
                constructor: Constructor::Default,
                methods: Vec::new(),
                properties: Vec::new(),
            },
        }
    }

    pub fn enumeration<S, I, C>(name: S, constants: I) -> TypeDef
    where
        S: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let constants = constants.into_iter().map(Into::into).collect();
        TypeDef::new(name, 0, TypeKind::Enum { constants })
    }

    pub fn collection<S: Into<String>>(name: S, kind: CollectionKind, arity: usize) -> TypeDef {
        TypeDef::new(name, arity, TypeKind::Collection(kind))
    }

    pub fn delegate<S: Into<String>>(name: S, arity: usize) -> TypeDef {
        TypeDef::new(name, arity, TypeKind::Delegate)
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline(always)]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn as_class(&self) -> Option<&ClassDef> {
        match &self.kind {
            TypeKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn collection_kind(&self) -> Option<CollectionKind> {
        match self.kind {
            TypeKind::Collection(kind) => Some(kind),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() || self.name.contains(['\n', '\r']) {
            return Err(Error::argument(format!("invalid type name {:?}", self.name)));
        }
        match &self.kind {
            TypeKind::Enum { constants } => {
                ensure_unique(&self.name, "enum constant", constants.iter().map(String::as_str))
            }
            TypeKind::Class(class) => {
                ensure_unique(&self.name, "field", class.fields.iter().map(|f| f.name.as_str()))?;
                ensure_unique(
                    &self.name,
                    "member",
                    class
                        .methods
                        .iter()
                        .map(|m| m.name.as_str())
                        .chain(class.properties.iter().map(|p| p.name.as_str())),
                )?;
                if let Some(field) = class.fields.iter().find(|f| !f.default.is_scalar()) {
                    return Err(Error::argument(format!(
                        "default of field {}.{} must be a scalar value",
                        self.name, field.name
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn ensure_unique<'a>(
    type_name: &str,
    what: &str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() || name.contains(['\n', '\r']) {
            return Err(Error::argument(format!(
                "invalid {} name {:?} in type {}",
                what, name, type_name
            )));
        }
        if !seen.insert(name) {
            return Err(Error::argument(format!(
                "duplicate {} {} in type {}",
                what, name, type_name
            )));
        }
    }
    Ok(())
}

/// Builder for class definitions.
///
/// ```rust
/// use graphline_core::meta::type_def::TypeDef;
/// use graphline_core::meta::TypeDesc;
/// use graphline_core::value::Value;
///
/// let person = TypeDef::class("demo.Person")
///     .base(TypeDesc::named("demo.Entity"))
///     .field("name", Value::Null)
///     .field("age", 0i32)
///     .build();
/// assert_eq!(person.as_class().unwrap().fields.len(), 2);
/// ```
pub struct ClassBuilder {
    name: String,
    arity: usize,
    class: ClassDef,
}

impl ClassBuilder {
    pub fn generic(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    pub fn base(mut self, base: TypeDesc) -> Self {
        self.class.base = Some(base);
        self
    }

    pub fn field<S: Into<String>, V: Into<Value>>(mut self, name: S, default: V) -> Self {
        self.class.fields.push(FieldDef {
            name: name.into(),
            default: default.into(),
        });
        self
    }

    pub fn method<S: Into<String>>(mut self, name: S, func: MethodFn) -> Self {
        self.class.methods.push(MethodDef {
            name: name.into(),
            is_static: false,
            func,
        });
        self
    }

    pub fn static_method<S: Into<String>>(mut self, name: S, func: MethodFn) -> Self {
        self.class.methods.push(MethodDef {
            name: name.into(),
            is_static: true,
            func,
        });
        self
    }

    pub fn property<S: Into<String>>(mut self, name: S, getter: PropertyGetter) -> Self {
        self.class.properties.push(PropertyDef {
            name: name.into(),
            is_static: false,
            getter,
        });
        self
    }

    pub fn without_default_constructor(mut self) -> Self {
        self.class.constructor = Constructor::Parameterized;
        self
    }

    pub fn build(self) -> TypeDef {
        TypeDef::new(self.name, self.arity, TypeKind::Class(self.class))
    }
}

impl From<ClassBuilder> for TypeDef {
    fn from(builder: ClassBuilder) -> Self {
        builder.build()
    }
}

/// A named group of type definitions, searched as a unit during resolution.
pub struct TypeModule {
    name: String,
    pending: Vec<TypeDef>,
    types: HashMap<String, Rc<TypeDef>>,
}

impl TypeModule {
    pub fn new<S: Into<String>>(name: S) -> TypeModule {
        TypeModule {
            name: name.into(),
            pending: Vec::new(),
            types: HashMap::new(),
        }
    }

    pub fn with<D: Into<TypeDef>>(mut self, def: D) -> Self {
        self.pending.push(def.into());
        self
    }

    pub fn add<D: Into<TypeDef>>(&mut self, def: D) -> &mut Self {
        self.pending.push(def.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&Rc<TypeDef>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Validates the pending definitions and indexes them by name.
    pub(crate) fn seal(&mut self) -> Result<(), Error> {
        for def in std::mem::take(&mut self.pending) {
            def.validate()?;
            if self.types.contains_key(def.name()) {
                return Err(Error::argument(format!(
                    "type {} registered twice in module {}",
                    def.name(),
                    self.name
                )));
            }
            self.types.insert(def.name().to_owned(), Rc::new(def));
        }
        Ok(())
    }
}
