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

/// Configuration for a [`Codec`](crate::codec::Codec).
///
/// Shared by the codec and the per-call `WriteContext`/`ReadContext` so both
/// directions agree on the wire details.
#[derive(Clone, Debug)]
pub struct Config {
    /// Escape `\`, `\n` and `\r` inside string values so a string always
    /// occupies exactly one line. Disabling this writes strings verbatim,
    /// which breaks the framing for values containing line breaks.
    pub escape_strings: bool,
    /// Maximum nesting depth of nodes, checked on both encode and decode.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            escape_strings: true,
            max_depth: 512,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn is_escape_strings(&self) -> bool {
        self.escape_strings
    }

    #[inline(always)]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
