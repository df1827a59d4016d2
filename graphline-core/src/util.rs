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

use crate::value::Value;
use std::collections::HashMap;

/// Structural equality of two object graphs.
///
/// Scalars compare by value. Shared handles compare by content, and the
/// sharing pattern must match too: each handle of `a` pairs with exactly one
/// handle of `b`. Two graphs where `a` reuses an object and `b` holds two
/// equal copies are therefore not equal. Cycles are handled.
///
/// ```rust
/// use graphline_core::meta::TypeDesc;
/// use graphline_core::util::graph_eq;
/// use graphline_core::value::{CollectionRef, Value};
///
/// let a = CollectionRef::list_of(TypeDesc::named("i32"));
/// a.push(Value::from(1)).unwrap();
/// let b = CollectionRef::list_of(TypeDesc::named("i32"));
/// b.push(Value::from(1)).unwrap();
/// assert!(graph_eq(&Value::Collection(a), &Value::Collection(b)));
/// ```
pub fn graph_eq(a: &Value, b: &Value) -> bool {
    GraphComparator::default().eq(a, b)
}

#[derive(Default)]
struct GraphComparator {
    forward: HashMap<usize, usize>,
    backward: HashMap<usize, usize>,
}

impl GraphComparator {
    fn eq(&mut self, a: &Value, b: &Value) -> bool {
        match (a.address(), b.address()) {
            (Some(x), Some(y)) => {
                if let Some(&paired) = self.forward.get(&x) {
                    return paired == y;
                }
                if self.backward.contains_key(&y) {
                    return false;
                }
                self.forward.insert(x, y);
                self.backward.insert(y, x);
            }
            (None, None) => {}
            _ => return false,
        }
        match (a, b) {
            (Value::Array(x), Value::Array(y)) => {
                x.element_type() == y.element_type() && self.all_eq(&x.items(), &y.items())
            }
            (Value::Collection(x), Value::Collection(y)) => {
                if x.type_desc() != y.type_desc() || x.kind() != y.kind() {
                    return false;
                }
                if x.is_map() {
                    let (xs, ys) = (x.entries(), y.entries());
                    xs.len() == ys.len()
                        && xs
                            .iter()
                            .zip(ys.iter())
                            .all(|((xk, xv), (yk, yv))| self.eq(xk, yk) && self.eq(xv, yv))
                } else {
                    self.all_eq(&x.elements(), &y.elements())
                }
            }
            (Value::Object(x), Value::Object(y)) => {
                x.type_desc() == y.type_desc()
                    && x.level_count() == y.level_count()
                    && (0..x.level_count()).all(|level| {
                        let (xs, ys) = (x.fields_at(level), y.fields_at(level));
                        xs.len() == ys.len()
                            && xs
                                .iter()
                                .zip(ys.iter())
                                .all(|((xn, xv), (yn, yv))| xn == yn && self.eq(xv, yv))
                    })
            }
            (Value::Delegate(x), Value::Delegate(y)) => {
                x.delegate_type() == y.delegate_type()
                    && x.method() == y.method()
                    && match (x.target(), y.target()) {
                        (Some(xt), Some(yt)) => self.eq(xt, yt),
                        (None, None) => true,
                        _ => false,
                    }
            }
            _ => a.key_eq(b),
        }
    }

    fn all_eq(&mut self, xs: &[Value], ys: &[Value]) -> bool {
        xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| self.eq(x, y))
    }
}
