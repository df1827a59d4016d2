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

//! Error type shared by the encoder, the decoder and the type registry.
//!
//! Every variant except [`Error::ConstructorMissing`] aborts the whole
//! `serialize`/`deserialize` call. `ConstructorMissing` is only raised by
//! [`TypeResolver::construct`](crate::resolver::type_resolver::TypeResolver::construct)
//! and the object decoder downgrades it to an `allow_null` node.

use std::borrow::Cow;

use thiserror::Error;

/// Set `GRAPHLINE_PANIC_ON_ERROR=1` at compile time to panic where an error
/// is created. Combine with `RUST_BACKTRACE=1` to locate the failing read.
pub const PANIC_ON_ERROR: bool = option_env!("GRAPHLINE_PANIC_ON_ERROR").is_some();

#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for graphline serialization and deserialization.
///
/// Do not construct variants directly; use the static constructor functions
/// (`Error::format`, `Error::missing_field`, ...) so that the
/// `GRAPHLINE_PANIC_ON_ERROR` debugging switch applies everywhere.
///
/// ```rust
/// use graphline_core::error::Error;
///
/// let err = Error::format("unexpected end of stream");
/// let err = Error::dangling_reference(42);
/// let err = Error::missing_field("Person", "age");
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// An entry argument was absent, or a registration was malformed.
    #[error("invalid argument: {0}")]
    Argument(Cow<'static, str>),

    /// The stream is empty, carries an unrecognized tag, or contradicts itself.
    #[error("format error: {0}")]
    Format(Cow<'static, str>),

    /// No registered module exposes a type with this name, or generic
    /// arguments do not fit the definition.
    #[error("could not resolve type {0}")]
    TypeResolution(Cow<'static, str>),

    /// A decoded field name does not exist on the type level being populated.
    #[error("failed to find field {field} in type {type_name}")]
    MissingField {
        type_name: Cow<'static, str>,
        field: Cow<'static, str>,
    },

    /// A member descriptor names a member its declaring type does not have.
    #[error("failed to find {kind} {member} in type {type_name}")]
    MissingMember {
        type_name: Cow<'static, str>,
        member: Cow<'static, str>,
        kind: Cow<'static, str>,
    },

    /// A back-reference points at a key that was never registered, or whose
    /// slot has no value yet.
    #[error("failed to obtain reference at line {0}")]
    DanglingReference(usize),

    /// The type has no no-argument constructor.
    #[error("type {0} has no default constructor")]
    ConstructorMissing(Cow<'static, str>),

    /// Recursion went deeper than `Config::max_depth`.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure raised by a user callable.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn argument<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Self::checked(Error::Argument(s.into()))
    }

    /// Creates a new [`Error::Format`].
    ///
    /// ```
    /// use graphline_core::error::Error;
    ///
    /// let err = Error::format(format!("unknown tag {:?} at line {}", "Blob", 3));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn format<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Self::checked(Error::Format(s.into()))
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn type_resolution<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self::checked(Error::TypeResolution(name.into()))
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn missing_field<T, F>(type_name: T, field: F) -> Self
    where
        T: Into<Cow<'static, str>>,
        F: Into<Cow<'static, str>>,
    {
        Self::checked(Error::MissingField {
            type_name: type_name.into(),
            field: field.into(),
        })
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn missing_member<T, M, K>(type_name: T, member: M, kind: K) -> Self
    where
        T: Into<Cow<'static, str>>,
        M: Into<Cow<'static, str>>,
        K: Into<Cow<'static, str>>,
    {
        Self::checked(Error::MissingMember {
            type_name: type_name.into(),
            member: member.into(),
            kind: kind.into(),
        })
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn dangling_reference(key: usize) -> Self {
        Self::checked(Error::DanglingReference(key))
    }

    /// Not routed through the panic switch: the object decoder expects and
    /// absorbs this error.
    #[inline(always)]
    #[cold]
    pub fn constructor_missing<S: Into<Cow<'static, str>>>(type_name: S) -> Self {
        Error::ConstructorMissing(type_name.into())
    }

    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        Self::checked(Error::DepthExceed(s.into()))
    }

    #[inline(always)]
    #[track_caller]
    fn checked(err: Error) -> Self {
        if PANIC_ON_ERROR {
            panic!("GRAPHLINE_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    pub fn is_constructor_missing(&self) -> bool {
        matches!(self, Error::ConstructorMissing(_))
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// ```
/// use graphline_core::ensure;
/// use graphline_core::error::Error;
///
/// fn check_count(n: i64) -> Result<(), Error> {
///     ensure!(n >= 0, "negative element count {}", n);
///     ensure!(n < 10, Error::argument("too many elements"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::format($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::format(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with a [`Error::Format`].
///
/// ```
/// use graphline_core::bail;
/// use graphline_core::error::Error;
///
/// fn reject(tag: &str) -> Result<(), Error> {
///     bail!("unexpected tag {}", tag);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::format($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::format(format!($fmt, $($arg)*)))
    };
}
