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

use crate::error::Error;
use crate::meta::MemberInfo;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::Serializer;
use crate::types::MemberKind;
use crate::value::Value;
use std::str::FromStr;

/// Member name, declaring type, then member kind. Shared with the delegate
/// payload, which embeds a member descriptor without node framing.
pub(super) fn write_member_info(
    context: &mut WriteContext,
    member: &MemberInfo,
) -> Result<(), Error> {
    context.writer.write_line(member.name())?;
    TypeResolver::write_type(context, member.declaring_type())?;
    context.writer.write_line(&member.kind())
}

/// Reads a member descriptor and checks that the member still exists.
pub(super) fn read_member_info(context: &mut ReadContext) -> Result<MemberInfo, Error> {
    let resolver = context.type_resolver();
    let name = context.reader.read_line()?;
    let declaring_type = resolver.read_type(context)?;
    let kind_text = context.reader.read_line()?;
    let kind = MemberKind::from_str(&kind_text).map_err(|_| {
        Error::format(format!(
            "unknown member kind {:?} at line {}",
            kind_text,
            context.reader.line() - 1
        ))
    })?;
    let member = MemberInfo::new(name, declaring_type, kind);
    resolver.find_member(&member)?;
    Ok(member)
}

impl Serializer for MemberInfo {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        write_member_info(context, self)
    }

    fn read_data(context: &mut ReadContext, key: usize) -> Result<Self, Error> {
        context.ref_reader.reserve(key);
        let member = read_member_info(context)?;
        context.ref_reader.assign(key, Value::Member(member.clone()));
        Ok(member)
    }
}
