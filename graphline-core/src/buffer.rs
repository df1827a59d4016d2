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

//! Line-framed text buffers.
//!
//! Every value of the protocol occupies one `\n` terminated line. Both sides
//! count lines from zero; the count is the identity key space of the
//! reference table.

use crate::error::Error;
use std::borrow::Cow;
use std::fmt::Display;
use std::io::{BufRead, ErrorKind, Write};
use std::str::FromStr;

pub struct LineWriter<'a> {
    inner: &'a mut dyn Write,
    line: usize,
}

impl<'a> LineWriter<'a> {
    pub fn new(inner: &'a mut dyn Write) -> LineWriter<'a> {
        LineWriter { inner, line: 0 }
    }

    /// Index of the next line to be written.
    #[inline(always)]
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn write_line<T: Display + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        writeln!(self.inner, "{}", value)?;
        self.line += 1;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), Error> {
        self.write_line(if value { "true" } else { "false" })
    }

    pub fn write_usize(&mut self, value: usize) -> Result<(), Error> {
        self.write_line(&value)
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), Error> {
        self.write_line(&value)
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.inner.flush()?;
        Ok(())
    }
}

pub struct LineReader<'a> {
    inner: &'a mut dyn BufRead,
    line: usize,
    buf: String,
}

impl<'a> LineReader<'a> {
    pub fn new(inner: &'a mut dyn BufRead) -> LineReader<'a> {
        LineReader {
            inner,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    #[inline(always)]
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_at_end(&mut self) -> Result<bool, Error> {
        Ok(self.inner.fill_buf()?.is_empty())
    }

    /// Reads one line without its terminator. Running out of input is a
    /// format error: every caller expects a value to be present.
    pub fn read_line(&mut self) -> Result<String, Error> {
        self.buf.clear();
        let n = self.inner.read_line(&mut self.buf).map_err(|err| {
            if err.kind() == ErrorKind::InvalidData {
                Error::format(format!("line {} is not valid UTF-8", self.line))
            } else {
                Error::from(err)
            }
        })?;
        if n == 0 {
            return Err(Error::format(format!(
                "unexpected end of stream at line {}",
                self.line
            )));
        }
        self.line += 1;
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(std::mem::take(&mut self.buf))
    }

    pub fn read_parsed<T: FromStr>(&mut self, what: &str) -> Result<T, Error> {
        let text = self.read_line()?;
        text.parse::<T>().map_err(|_| {
            Error::format(format!(
                "expected {} at line {}, found {:?}",
                what,
                self.line - 1,
                text
            ))
        })
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        self.read_parsed("a boolean")
    }

    pub fn read_usize(&mut self) -> Result<usize, Error> {
        self.read_parsed("a count")
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        self.read_parsed("a 64-bit integer")
    }
}

/// Escapes backslashes and line breaks so `text` fits on one line.
pub fn escape_line(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape_line`].
pub fn unescape_line(text: &str) -> Result<String, Error> {
    if !text.contains('\\') {
        return Ok(text.to_owned());
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            other => {
                return Err(Error::format(format!(
                    "invalid escape sequence \\{} in string value",
                    other.map(String::from).unwrap_or_default()
                )))
            }
        }
    }
    Ok(out)
}
