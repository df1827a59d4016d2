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

//! Registry of type modules: name resolution, type descriptor I/O,
//! construction and member lookup.

use crate::ensure;
use crate::error::Error;
use crate::meta::type_def::{FieldDef, MethodDef, PropertyDef};
use crate::meta::{ClassDef, Constructor, MemberInfo, TypeDef, TypeDesc, TypeKind, TypeModule};
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{names, CollectionKind, MemberKind, NESTED_SEPARATOR};
use crate::value::{
    CallableRef, CollectionRef, EnumValue, Level, NativeHandle, ObjectRef, PrimitiveKind, Value,
};
use tracing::debug;

/// A member found by [`TypeResolver::find_member`].
#[derive(Clone, Copy, Debug)]
pub enum MemberRef<'a> {
    Field(&'a FieldDef),
    Method(&'a MethodDef),
    Property(&'a PropertyDef),
}

/// Catalog of type modules, searched in registration order.
///
/// The built-in `core` module is always registered first. It holds the
/// primitive types, `string`, `handle`, the array definition `Array<T>` and
/// the generic collections `List<T>` and `Map<K, V>`.
///
/// ```rust
/// use graphline_core::meta::{TypeDef, TypeDesc, TypeModule};
/// use graphline_core::resolver::type_resolver::TypeResolver;
/// use graphline_core::value::Value;
///
/// let mut resolver = TypeResolver::default();
/// resolver
///     .register_module(
///         TypeModule::new("demo").with(TypeDef::class("demo.Point").field("x", 0i32).field("y", 0i32)),
///     )
///     .unwrap();
/// let point = resolver.construct(&TypeDesc::named("demo.Point")).unwrap();
/// assert_eq!(point.as_object().unwrap().get("x"), Some(Value::from(0i32)));
/// ```
pub struct TypeResolver {
    modules: Vec<TypeModule>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        let mut core = core_module();
        core.seal().expect("built-in definitions are unique");
        TypeResolver {
            modules: vec![core],
        }
    }
}

fn core_module() -> TypeModule {
    let mut module = TypeModule::new(names::CORE_MODULE);
    for kind in PrimitiveKind::ALL {
        module.add(TypeDef::new(kind.type_name(), 0, TypeKind::Primitive(kind)));
    }
    module
        .add(TypeDef::new(names::STRING, 0, TypeKind::String))
        .add(TypeDef::new(names::HANDLE, 0, TypeKind::Handle))
        .add(TypeDef::new(names::ARRAY, 1, TypeKind::Array))
        .add(TypeDef::collection(names::LIST, CollectionKind::List, 1))
        .add(TypeDef::collection(names::MAP, CollectionKind::Map, 2));
    module
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module to the catalog. Its definitions are validated here.
    pub fn register_module(&mut self, mut module: TypeModule) -> Result<(), Error> {
        ensure!(
            self.modules.iter().all(|m| m.name() != module.name()),
            Error::argument(format!("module {} is already registered", module.name()))
        );
        module.seal()?;
        debug!(
            module = module.name(),
            types = module.len(),
            "registered type module"
        );
        self.modules.push(module);
        Ok(())
    }

    pub fn modules(&self) -> &[TypeModule] {
        &self.modules
    }

    fn owner_of(&self, name: &str) -> Option<&TypeModule> {
        self.modules.iter().find(|m| m.contains(name))
    }

    /// Resolves a qualified definition name.
    ///
    /// A nested name such as `game.Player+Stats` is looked up in the module
    /// that owns the enclosing type `game.Player`.
    pub fn resolve(&self, name: &str) -> Result<&TypeDef, Error> {
        ensure!(
            !name.is_empty(),
            Error::type_resolution("<empty type name>")
        );
        let module = match name.split_once(NESTED_SEPARATOR) {
            Some((outer, _)) => self
                .owner_of(outer)
                .ok_or_else(|| Error::type_resolution(outer.to_owned()))?,
            None => self
                .owner_of(name)
                .ok_or_else(|| Error::type_resolution(name.to_owned()))?,
        };
        module
            .get(name)
            .map(|def| def.as_ref())
            .ok_or_else(|| Error::type_resolution(name.to_owned()))
    }

    /// Resolves a descriptor and every generic argument it carries.
    pub fn resolve_desc(&self, ty: &TypeDesc) -> Result<&TypeDef, Error> {
        let def = self.resolve(ty.name())?;
        ensure!(
            def.arity() == ty.args().len(),
            Error::type_resolution(format!(
                "{} ({} expects {} generic arguments, found {})",
                ty,
                def.name(),
                def.arity(),
                ty.args().len()
            ))
        );
        for arg in ty.args() {
            self.resolve_desc(arg)?;
        }
        Ok(def)
    }

    /// Binds generic arguments to a generic definition.
    pub fn make_generic(&self, def: &TypeDef, args: Vec<TypeDesc>) -> Result<TypeDesc, Error> {
        ensure!(
            def.arity() > 0 && def.arity() == args.len(),
            Error::type_resolution(format!(
                "{} cannot be bound to {} generic arguments",
                def.name(),
                args.len()
            ))
        );
        Ok(TypeDesc::generic(def.name(), args))
    }

    /// Writes a type descriptor. Every level of generic arguments counts
    /// against the nesting limit.
    pub fn write_type(context: &mut WriteContext, ty: &TypeDesc) -> Result<(), Error> {
        context.writer.write_bool(ty.is_generic())?;
        context.writer.write_line(ty.name())?;
        if !ty.is_generic() {
            return Ok(());
        }
        context.writer.write_usize(ty.args().len())?;
        context.inc_depth()?;
        let result = ty
            .args()
            .iter()
            .try_for_each(|arg| Self::write_type(context, arg));
        context.dec_depth();
        result
    }

    pub fn read_type(&self, context: &mut ReadContext) -> Result<TypeDesc, Error> {
        let is_generic = context.reader.read_bool()?;
        let name = context.reader.read_line()?;
        let def = self.resolve(&name)?;
        if !is_generic {
            ensure!(
                def.arity() == 0,
                Error::type_resolution(format!("{} used without generic arguments", name))
            );
            return Ok(TypeDesc::named(name));
        }
        let count = context.reader.read_usize()?;
        context.inc_depth()?;
        let args = self.read_type_args(context, count);
        context.dec_depth();
        self.make_generic(def, args?)
    }

    fn read_type_args(&self, context: &mut ReadContext, count: usize) -> Result<Vec<TypeDesc>, Error> {
        let mut args = Vec::with_capacity(count.min(8));
        for _ in 0..count {
            args.push(self.read_type(context)?);
        }
        Ok(args)
    }

    /// No-argument construction.
    ///
    /// Fails with [`Error::ConstructorMissing`] for classes without a default
    /// constructor, strings, arrays and delegates.
    pub fn construct(&self, ty: &TypeDesc) -> Result<Value, Error> {
        let def = self.resolve_desc(ty)?;
        match def.kind() {
            TypeKind::Primitive(kind) => Ok(Value::Primitive(kind.zero())),
            TypeKind::Handle => Ok(Value::Handle(NativeHandle::default())),
            TypeKind::Enum { constants } => constants
                .first()
                .map(|name| Value::Enum(EnumValue::new(ty.clone(), name.clone())))
                .ok_or_else(|| Error::constructor_missing(ty.to_string())),
            TypeKind::Collection(kind) => Ok(Value::Collection(CollectionRef::new(ty.clone(), *kind))),
            TypeKind::Class(class) if class.constructor == Constructor::Default => {
                Ok(Value::Object(self.allocate(ty)?))
            }
            TypeKind::Class(_) | TypeKind::String | TypeKind::Array | TypeKind::Delegate => {
                Err(Error::constructor_missing(ty.to_string()))
            }
        }
    }

    /// Builds a class instance with default field values, whether or not the
    /// class has a default constructor. Stands in for parameterized
    /// construction in user code.
    pub fn allocate(&self, ty: &TypeDesc) -> Result<ObjectRef, Error> {
        let levels = self
            .hierarchy(ty)?
            .into_iter()
            .map(|(declaring_type, class)| {
                let fields = class
                    .fields
                    .iter()
                    .map(|f| (f.name.clone(), f.default.clone()))
                    .collect();
                Level::new(declaring_type, fields)
            })
            .collect();
        Ok(ObjectRef::new(ty.clone(), levels))
    }

    /// The class and its ancestors, most-derived first.
    pub fn hierarchy(&self, ty: &TypeDesc) -> Result<Vec<(TypeDesc, &ClassDef)>, Error> {
        let mut levels: Vec<(TypeDesc, &ClassDef)> = Vec::new();
        let mut current = Some(ty.clone());
        while let Some(desc) = current {
            ensure!(
                levels.iter().all(|(seen, _)| *seen != desc),
                Error::argument(format!("cyclic base chain through {}", desc))
            );
            let class = self
                .resolve_desc(&desc)?
                .as_class()
                .ok_or_else(|| Error::format(format!("{} is not a class type", desc)))?;
            current = class.base.clone();
            levels.push((desc, class));
        }
        Ok(levels)
    }

    /// Finds a member on the declaring type or one of its ancestors,
    /// regardless of whether it is static.
    pub fn find_member(&self, member: &MemberInfo) -> Result<MemberRef<'_>, Error> {
        let missing = || {
            Error::missing_member(
                member.declaring_type().to_string(),
                member.name().to_owned(),
                member.kind().to_string(),
            )
        };
        if self.resolve_desc(member.declaring_type())?.as_class().is_none() {
            return Err(missing());
        }
        for (_, class) in self.hierarchy(member.declaring_type())? {
            let found = match member.kind() {
                MemberKind::Method => class.method(member.name()).map(MemberRef::Method),
                MemberKind::Field => class.field(member.name()).map(MemberRef::Field),
                MemberKind::Property => class.property(member.name()).map(MemberRef::Property),
            };
            if let Some(found) = found {
                return Ok(found);
            }
        }
        Err(missing())
    }

    /// Builds a callable of `delegate_type` over a registered method.
    ///
    /// `target` binds an instance method; static methods must be unbound.
    pub fn bind(
        &self,
        delegate_type: &TypeDesc,
        method: &MemberInfo,
        target: Option<Value>,
    ) -> Result<CallableRef, Error> {
        ensure!(
            matches!(self.resolve_desc(delegate_type)?.kind(), TypeKind::Delegate),
            Error::argument(format!("{} is not a delegate type", delegate_type))
        );
        ensure!(
            method.kind() == MemberKind::Method,
            Error::argument(format!("{} is not a method", method))
        );
        let def = match self.find_member(method)? {
            MemberRef::Method(def) => def,
            _ => return Err(Error::argument(format!("{} is not a method", method))),
        };
        if let Some(target) = &target {
            ensure!(
                !target.is_null(),
                Error::argument(format!("bound target of {} is null", method))
            );
            ensure!(
                !def.is_static,
                Error::argument(format!("static method {} cannot be bound to a target", method))
            );
        }
        Ok(CallableRef::new(
            delegate_type.clone(),
            method.clone(),
            target,
            def.func,
        ))
    }

    /// Convenience over [`bind`](Self::bind) naming the method directly.
    pub fn bind_method(
        &self,
        delegate_type: &TypeDesc,
        declaring_type: &TypeDesc,
        method: &str,
        target: Option<Value>,
    ) -> Result<CallableRef, Error> {
        self.bind(
            delegate_type,
            &MemberInfo::method(method, declaring_type.clone()),
            target,
        )
    }

    /// A checked enum constant.
    pub fn enum_value(&self, ty: &TypeDesc, name: &str) -> Result<EnumValue, Error> {
        match self.resolve_desc(ty)?.kind() {
            TypeKind::Enum { constants } if constants.iter().any(|c| c == name) => {
                Ok(EnumValue::new(ty.clone(), name))
            }
            TypeKind::Enum { .. } => Err(Error::format(format!(
                "enum {} has no constant {:?}",
                ty, name
            ))),
            _ => Err(Error::format(format!("{} is not an enum type", ty))),
        }
    }
}
