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

//! Converter for the `Any` category: a type descriptor followed by the
//! value's invariant text form.

use crate::buffer::{escape_line, unescape_line};
use crate::error::Error;
use crate::meta::TypeKind;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::Serializer;
use crate::value::{Primitive, PrimitiveKind};
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Invariant text of a primitive. Floats use the shortest form that parses
/// back to the same bits.
pub fn to_text(value: &Primitive) -> String {
    match value {
        Primitive::Bool(v) => v.to_string(),
        Primitive::Char(v) => escape_line(v.encode_utf8(&mut [0; 4])).into_owned(),
        Primitive::I8(v) => v.to_string(),
        Primitive::I16(v) => v.to_string(),
        Primitive::I32(v) => v.to_string(),
        Primitive::I64(v) => v.to_string(),
        Primitive::U8(v) => v.to_string(),
        Primitive::U16(v) => v.to_string(),
        Primitive::U32(v) => v.to_string(),
        Primitive::U64(v) => v.to_string(),
        Primitive::F32(v) => v.to_string(),
        Primitive::F64(v) => v.to_string(),
        Primitive::Date(v) => v.format(DATE_FORMAT).to_string(),
        Primitive::DateTime(v) => v.format(DATETIME_FORMAT).to_string(),
    }
}

fn invalid(kind: PrimitiveKind, text: &str) -> Error {
    Error::format(format!("invalid {} literal {:?}", kind.type_name(), text))
}

fn parse<T: FromStr>(kind: PrimitiveKind, text: &str) -> Result<T, Error> {
    text.parse().map_err(|_| invalid(kind, text))
}

/// Inverse of [`to_text`].
pub fn from_text(kind: PrimitiveKind, text: &str) -> Result<Primitive, Error> {
    Ok(match kind {
        PrimitiveKind::Bool => Primitive::Bool(parse(kind, text)?),
        PrimitiveKind::Char => {
            let decoded = unescape_line(text)?;
            let mut chars = decoded.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Primitive::Char(c),
                _ => return Err(invalid(kind, text)),
            }
        }
        PrimitiveKind::I8 => Primitive::I8(parse(kind, text)?),
        PrimitiveKind::I16 => Primitive::I16(parse(kind, text)?),
        PrimitiveKind::I32 => Primitive::I32(parse(kind, text)?),
        PrimitiveKind::I64 => Primitive::I64(parse(kind, text)?),
        PrimitiveKind::U8 => Primitive::U8(parse(kind, text)?),
        PrimitiveKind::U16 => Primitive::U16(parse(kind, text)?),
        PrimitiveKind::U32 => Primitive::U32(parse(kind, text)?),
        PrimitiveKind::U64 => Primitive::U64(parse(kind, text)?),
        PrimitiveKind::F32 => Primitive::F32(parse(kind, text)?),
        PrimitiveKind::F64 => Primitive::F64(parse(kind, text)?),
        PrimitiveKind::Date => Primitive::Date(
            NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid(kind, text))?,
        ),
        PrimitiveKind::DateTime => Primitive::DateTime(
            NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .map_err(|_| invalid(kind, text))?,
        ),
    })
}

impl Serializer for Primitive {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        TypeResolver::write_type(context, &self.kind().type_desc())?;
        context.writer.write_line(&to_text(self))
    }

    fn read_data(context: &mut ReadContext, _key: usize) -> Result<Self, Error> {
        let resolver = context.type_resolver();
        let ty = resolver.read_type(context)?;
        let text = context.reader.read_line()?;
        match resolver.resolve_desc(&ty)?.kind() {
            TypeKind::Primitive(kind) => from_text(*kind, &text),
            _ => Err(Error::format(format!(
                "type {} of an Any node is not convertible from text",
                ty
            ))),
        }
    }
}
