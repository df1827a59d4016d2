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

use crate::bail;
use crate::error::Error;
use crate::meta::TypeKind;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::member::{read_member_info, write_member_info};
use crate::serializer::{read_node, write_node, ObjectReference, Serializer};
use crate::types::{MemberKind, BOUND_TARGET, DELEGATE_TARGET_NAME, NULL_TARGET};
use crate::value::{CallableRef, Value};

/// Delegate type, the target method's descriptor, then either
/// `target` and a `delegateTarget` node, or `null_target`.
///
/// The slot is filled only after the target is read: a target that refers
/// back to the delegate itself does not resolve.
impl Serializer for CallableRef {
    fn write_data(&self, context: &mut WriteContext) -> Result<(), Error> {
        TypeResolver::write_type(context, self.delegate_type())?;
        write_member_info(context, self.method())?;
        match self.target() {
            Some(target) => {
                context.writer.write_line(BOUND_TARGET)?;
                write_node(
                    context,
                    &ObjectReference::new(DELEGATE_TARGET_NAME, target.clone()),
                )
            }
            None => context.writer.write_line(NULL_TARGET),
        }
    }

    fn read_data(context: &mut ReadContext, key: usize) -> Result<Self, Error> {
        context.ref_reader.reserve(key);
        let resolver = context.type_resolver();
        let delegate_type = resolver.read_type(context)?;
        if !matches!(resolver.resolve_desc(&delegate_type)?.kind(), TypeKind::Delegate) {
            bail!("type {} of a Delegate node is not a delegate type", delegate_type);
        }
        let method = read_member_info(context)?;
        if method.kind() != MemberKind::Method {
            bail!("delegate at line {} targets {}, which is not a method", key, method);
        }
        let marker = context.reader.read_line()?;
        let target = match marker.as_str() {
            BOUND_TARGET => {
                let target = read_node(context)?.into_value();
                if target.is_null() {
                    bail!("target of delegate at line {} decoded as null", key);
                }
                Some(target)
            }
            NULL_TARGET => None,
            other => bail!(
                "expected {:?} or {:?} after delegate at line {}, found {:?}",
                BOUND_TARGET,
                NULL_TARGET,
                key,
                other
            ),
        };
        let callable = resolver.bind(&delegate_type, &method, target)?;
        context
            .ref_reader
            .assign(key, Value::Delegate(callable.clone()));
        Ok(callable)
    }
}
