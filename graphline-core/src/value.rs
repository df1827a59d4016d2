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

//! Dynamic value model walked by the encoder and rebuilt by the decoder.
//!
//! Scalars (`Null`, handles, primitives, strings, enum constants) are plain
//! values and are copied at every occurrence. Arrays, collections, objects and
//! callables are shared handles: cloning a [`Value`] clones the handle, and
//! two handles to the same allocation are the same node of the graph.
//! Type and member descriptors compare by value.

use crate::error::Error;
use crate::meta::{MemberInfo, TypeDesc};
use crate::types::{names, CollectionKind};
use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Signature of a registered method. Instance methods receive their target
/// as the first argument; static methods receive `Value::Null`.
pub type MethodFn = fn(target: &Value, args: &[Value]) -> anyhow::Result<Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Date,
    DateTime,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 14] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::I8,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::U8,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
        PrimitiveKind::Date,
        PrimitiveKind::DateTime,
    ];

    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => names::BOOL,
            PrimitiveKind::Char => names::CHAR,
            PrimitiveKind::I8 => names::I8,
            PrimitiveKind::I16 => names::I16,
            PrimitiveKind::I32 => names::I32,
            PrimitiveKind::I64 => names::I64,
            PrimitiveKind::U8 => names::U8,
            PrimitiveKind::U16 => names::U16,
            PrimitiveKind::U32 => names::U32,
            PrimitiveKind::U64 => names::U64,
            PrimitiveKind::F32 => names::F32,
            PrimitiveKind::F64 => names::F64,
            PrimitiveKind::Date => names::DATE,
            PrimitiveKind::DateTime => names::DATETIME,
        }
    }

    pub fn type_desc(self) -> TypeDesc {
        TypeDesc::named(self.type_name())
    }

    /// The value a no-argument construction of this kind produces.
    pub fn zero(self) -> Primitive {
        match self {
            PrimitiveKind::Bool => Primitive::Bool(false),
            PrimitiveKind::Char => Primitive::Char('\0'),
            PrimitiveKind::I8 => Primitive::I8(0),
            PrimitiveKind::I16 => Primitive::I16(0),
            PrimitiveKind::I32 => Primitive::I32(0),
            PrimitiveKind::I64 => Primitive::I64(0),
            PrimitiveKind::U8 => Primitive::U8(0),
            PrimitiveKind::U16 => Primitive::U16(0),
            PrimitiveKind::U32 => Primitive::U32(0),
            PrimitiveKind::U64 => Primitive::U64(0),
            PrimitiveKind::F32 => Primitive::F32(0.0),
            PrimitiveKind::F64 => Primitive::F64(0.0),
            PrimitiveKind::Date => Primitive::Date(NaiveDate::default()),
            PrimitiveKind::DateTime => Primitive::DateTime(NaiveDateTime::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Bool(_) => PrimitiveKind::Bool,
            Primitive::Char(_) => PrimitiveKind::Char,
            Primitive::I8(_) => PrimitiveKind::I8,
            Primitive::I16(_) => PrimitiveKind::I16,
            Primitive::I32(_) => PrimitiveKind::I32,
            Primitive::I64(_) => PrimitiveKind::I64,
            Primitive::U8(_) => PrimitiveKind::U8,
            Primitive::U16(_) => PrimitiveKind::U16,
            Primitive::U32(_) => PrimitiveKind::U32,
            Primitive::U64(_) => PrimitiveKind::U64,
            Primitive::F32(_) => PrimitiveKind::F32,
            Primitive::F64(_) => PrimitiveKind::F64,
            Primitive::Date(_) => PrimitiveKind::Date,
            Primitive::DateTime(_) => PrimitiveKind::DateTime,
        }
    }
}

/// Pointer-sized native handle, carried as its 64-bit integer value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct NativeHandle(pub i64);

/// A named constant of a registered enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    ty: TypeDesc,
    name: String,
}

impl EnumValue {
    /// Builds the constant without checking it against the registry; use
    /// [`TypeResolver::enum_value`](crate::resolver::type_resolver::TypeResolver::enum_value)
    /// for a checked constant.
    pub fn new<S: Into<String>>(ty: TypeDesc, name: S) -> Self {
        EnumValue {
            ty,
            name: name.into(),
        }
    }

    pub fn type_desc(&self) -> &TypeDesc {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

pub struct Array {
    element_type: TypeDesc,
    items: Vec<Value>,
}

/// Shared handle to a fixed-length array with a uniform element type.
#[derive(Clone)]
pub struct ArrayRef(Rc<RefCell<Array>>);

impl ArrayRef {
    pub fn new(element_type: TypeDesc, items: Vec<Value>) -> Self {
        ArrayRef(Rc::new(RefCell::new(Array {
            element_type,
            items,
        })))
    }

    /// An array of `len` null slots.
    pub fn with_len(element_type: TypeDesc, len: usize) -> Self {
        Self::new(element_type, vec![Value::Null; len])
    }

    pub fn element_type(&self) -> TypeDesc {
        self.0.borrow().element_type.clone()
    }

    pub fn type_desc(&self) -> TypeDesc {
        TypeDesc::array_of(self.element_type())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().items.get(index).cloned()
    }

    pub fn set(&self, index: usize, value: Value) -> Result<(), Error> {
        let mut array = self.0.borrow_mut();
        let len = array.items.len();
        let slot = array.items.get_mut(index).ok_or_else(|| {
            Error::argument(format!("index {} out of bounds for array of length {}", index, len))
        })?;
        *slot = value;
        Ok(())
    }

    pub(crate) fn push(&self, value: Value) {
        self.0.borrow_mut().items.push(value);
    }

    /// Snapshot of the elements.
    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().items.clone()
    }

    pub fn ptr_eq(a: &ArrayRef, b: &ArrayRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayRef({}[{}]@{:#x})", self.element_type(), self.len(), self.address())
    }
}

pub enum CollectionData {
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

pub struct Collection {
    ty: TypeDesc,
    data: CollectionData,
}

/// Shared handle to a list-like or map-like generic collection.
///
/// Maps keep insertion order; keys compare with [`Value::key_eq`].
#[derive(Clone)]
pub struct CollectionRef(Rc<RefCell<Collection>>);

impl CollectionRef {
    pub fn new(ty: TypeDesc, kind: CollectionKind) -> Self {
        let data = match kind {
            CollectionKind::List => CollectionData::List(Vec::new()),
            CollectionKind::Map => CollectionData::Map(Vec::new()),
        };
        CollectionRef(Rc::new(RefCell::new(Collection { ty, data })))
    }

    pub fn list_of(element_type: TypeDesc) -> Self {
        Self::new(TypeDesc::list_of(element_type), CollectionKind::List)
    }

    pub fn map_of(key_type: TypeDesc, value_type: TypeDesc) -> Self {
        Self::new(TypeDesc::map_of(key_type, value_type), CollectionKind::Map)
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.0.borrow().ty.clone()
    }

    pub fn kind(&self) -> CollectionKind {
        match self.0.borrow().data {
            CollectionData::List(_) => CollectionKind::List,
            CollectionData::Map(_) => CollectionKind::Map,
        }
    }

    pub fn is_map(&self) -> bool {
        self.kind() == CollectionKind::Map
    }

    pub fn len(&self) -> usize {
        match &self.0.borrow().data {
            CollectionData::List(items) => items.len(),
            CollectionData::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&self, value: Value) -> Result<(), Error> {
        match &mut self.0.borrow_mut().data {
            CollectionData::List(items) => {
                items.push(value);
                Ok(())
            }
            CollectionData::Map(_) => Err(Error::argument("cannot push onto a map-like collection")),
        }
    }

    /// Inserts or replaces an entry, returning the replaced value.
    pub fn insert(&self, key: Value, value: Value) -> Result<Option<Value>, Error> {
        match &mut self.0.borrow_mut().data {
            CollectionData::Map(entries) => {
                if let Some(entry) = entries.iter_mut().find(|(k, _)| k.key_eq(&key)) {
                    return Ok(Some(std::mem::replace(&mut entry.1, value)));
                }
                entries.push((key, value));
                Ok(None)
            }
            CollectionData::List(_) => Err(Error::argument("cannot insert an entry into a list")),
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        match &self.0.borrow().data {
            CollectionData::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.key_eq(key))
                .map(|(_, v)| v.clone()),
            CollectionData::List(_) => None,
        }
    }

    /// Snapshot of the elements of a list; empty for maps.
    pub fn elements(&self) -> Vec<Value> {
        match &self.0.borrow().data {
            CollectionData::List(items) => items.clone(),
            CollectionData::Map(_) => Vec::new(),
        }
    }

    /// Snapshot of the entries of a map; empty for lists.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        match &self.0.borrow().data {
            CollectionData::Map(entries) => entries.clone(),
            CollectionData::List(_) => Vec::new(),
        }
    }

    pub fn ptr_eq(a: &CollectionRef, b: &CollectionRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl fmt::Debug for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionRef({}#{}@{:#x})", self.type_desc(), self.len(), self.address())
    }
}

pub struct Field {
    name: String,
    value: Value,
}

/// Fields declared by one type of an object's hierarchy.
pub struct Level {
    declaring_type: TypeDesc,
    fields: Vec<Field>,
}

impl Level {
    pub(crate) fn new(declaring_type: TypeDesc, fields: Vec<(String, Value)>) -> Self {
        Level {
            declaring_type,
            fields: fields
                .into_iter()
                .map(|(name, value)| Field { name, value })
                .collect(),
        }
    }
}

pub struct Instance {
    ty: TypeDesc,
    /// Most-derived level first.
    levels: Vec<Level>,
}

/// Shared handle to a field-bearing object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Instance>>);

impl ObjectRef {
    pub(crate) fn new(ty: TypeDesc, levels: Vec<Level>) -> Self {
        ObjectRef(Rc::new(RefCell::new(Instance { ty, levels })))
    }

    pub fn type_desc(&self) -> TypeDesc {
        self.0.borrow().ty.clone()
    }

    pub fn level_count(&self) -> usize {
        self.0.borrow().levels.len()
    }

    pub fn declaring_type(&self, level: usize) -> Option<TypeDesc> {
        self.0
            .borrow()
            .levels
            .get(level)
            .map(|l| l.declaring_type.clone())
    }

    /// Looks a field up from the most-derived level outward.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.0
            .borrow()
            .levels
            .iter()
            .flat_map(|level| level.fields.iter())
            .find(|field| field.name == name)
            .map(|field| field.value.clone())
    }

    pub fn get_at(&self, level: usize, name: &str) -> Option<Value> {
        self.0
            .borrow()
            .levels
            .get(level)?
            .fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.clone())
    }

    /// Sets the first field called `name`, searching from the most-derived
    /// level outward.
    pub fn set<V: Into<Value>>(&self, name: &str, value: V) -> Result<(), Error> {
        let mut instance = self.0.borrow_mut();
        let type_name = instance.ty.to_string();
        let field = instance
            .levels
            .iter_mut()
            .flat_map(|level| level.fields.iter_mut())
            .find(|field| field.name == name)
            .ok_or_else(|| Error::missing_field(type_name, name.to_owned()))?;
        field.value = value.into();
        Ok(())
    }

    /// Sets a field declared at one specific level of the hierarchy.
    pub fn set_at<V: Into<Value>>(&self, level: usize, name: &str, value: V) -> Result<(), Error> {
        let mut instance = self.0.borrow_mut();
        let type_name = instance.ty.to_string();
        let field = instance
            .levels
            .get_mut(level)
            .and_then(|l| l.fields.iter_mut().find(|field| field.name == name))
            .ok_or_else(|| Error::missing_field(type_name, name.to_owned()))?;
        field.value = value.into();
        Ok(())
    }

    /// Snapshot of the `(name, value)` pairs declared at `level`.
    pub fn fields_at(&self, level: usize) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .levels
            .get(level)
            .map(|l| {
                l.fields
                    .iter()
                    .map(|f| (f.name.clone(), f.value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn ptr_eq(a: &ObjectRef, b: &ObjectRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({}@{:#x})", self.type_desc(), self.address())
    }
}

pub struct Callable {
    delegate_type: TypeDesc,
    method: MemberInfo,
    target: Option<Value>,
    func: MethodFn,
}

/// Shared handle to a bound or unbound reference to a registered method.
///
/// Callables are only built from methods registered on a class, through
/// [`TypeResolver::bind`](crate::resolver::type_resolver::TypeResolver::bind).
#[derive(Clone)]
pub struct CallableRef(Rc<Callable>);

impl CallableRef {
    pub(crate) fn new(
        delegate_type: TypeDesc,
        method: MemberInfo,
        target: Option<Value>,
        func: MethodFn,
    ) -> Self {
        CallableRef(Rc::new(Callable {
            delegate_type,
            method,
            target,
            func,
        }))
    }

    pub fn delegate_type(&self) -> &TypeDesc {
        &self.0.delegate_type
    }

    pub fn method(&self) -> &MemberInfo {
        &self.0.method
    }

    pub fn target(&self) -> Option<&Value> {
        self.0.target.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.0.target.is_some()
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, Error> {
        let target = self.0.target.as_ref().unwrap_or(&Value::Null);
        Ok((self.0.func)(target, args)?)
    }

    pub fn ptr_eq(a: &CallableRef, b: &CallableRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl fmt::Debug for CallableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CallableRef({} -> {}, bound: {})",
            self.0.delegate_type,
            self.0.method,
            self.is_bound()
        )
    }
}

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Handle(NativeHandle),
    Primitive(Primitive),
    String(String),
    Enum(EnumValue),
    Array(ArrayRef),
    Collection(CollectionRef),
    Object(ObjectRef),
    Type(TypeDesc),
    Member(MemberInfo),
    Delegate(CallableRef),
}

impl Value {
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the value is a plain scalar allowed as a field default.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Handle(_) | Value::Primitive(_) | Value::String(_) | Value::Enum(_)
        )
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&CollectionRef> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_delegate(&self) -> Option<&CallableRef> {
        match self {
            Value::Delegate(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<&TypeDesc> {
        match self {
            Value::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&MemberInfo> {
        match self {
            Value::Member(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Value::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Any signed or unsigned integer primitive that fits an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self.as_primitive()? {
            Primitive::I8(v) => Some(*v as i64),
            Primitive::I16(v) => Some(*v as i64),
            Primitive::I32(v) => Some(*v as i64),
            Primitive::I64(v) => Some(*v),
            Primitive::U8(v) => Some(*v as i64),
            Primitive::U16(v) => Some(*v as i64),
            Primitive::U32(v) => Some(*v as i64),
            Primitive::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Address of the shared allocation for handle-like variants.
    pub(crate) fn address(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.address()),
            Value::Collection(c) => Some(c.address()),
            Value::Object(o) => Some(o.address()),
            Value::Delegate(d) => Some(d.address()),
            _ => None,
        }
    }

    /// Identity for shared handles, equality for everything else.
    pub fn key_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Handle(a), Value::Handle(b)) => a == b,
            (Value::Primitive(a), Value::Primitive(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Member(a), Value::Member(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => ArrayRef::ptr_eq(a, b),
            (Value::Collection(a), Value::Collection(b)) => CollectionRef::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => ObjectRef::ptr_eq(a, b),
            (Value::Delegate(a), Value::Delegate(b)) => CallableRef::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.key_eq(other)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                #[inline(always)]
                fn from(v: $ty) -> Self {
                    Primitive::$variant(v)
                }
            }

            impl From<$ty> for Value {
                #[inline(always)]
                fn from(v: $ty) -> Self {
                    Value::Primitive(Primitive::$variant(v))
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
);

macro_rules! impl_from_variant {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline(always)]
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_variant!(
    NativeHandle => Handle,
    Primitive => Primitive,
    String => String,
    EnumValue => Enum,
    ArrayRef => Array,
    CollectionRef => Collection,
    ObjectRef => Object,
    TypeDesc => Type,
    MemberInfo => Member,
    CallableRef => Delegate,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
