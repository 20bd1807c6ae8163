/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Field level validation failures.

use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Type of field level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldErrorKind {
    /// A required value was empty or missing.
    Required,
    /// The value is malformed.
    Invalid,
    /// The value occurs more than once where it must be unique.
    Duplicate,
    /// Too many values.
    TooMany,
    /// The value is longer than allowed.
    TooLong,
    /// The field may not be changed or set.
    Forbidden,
}

/// A single field/reason pair of a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    kind: FieldErrorKind,
    field: String,
    value: String,
    detail: Option<String>,
}

impl FieldError {
    /// Return a new instance.
    pub fn new(kind: FieldErrorKind, field: &str, value: &str) -> Self {
        Self {
            kind,
            field: field.to_owned(),
            value: value.to_owned(),
            detail: None,
        }
    }

    /// Attach a human readable explanation.
    pub fn with_detail(mut self, detail: &str) -> Self {
        self.detail = Some(detail.to_owned());
        self
    }

    /// Return the type of failure.
    pub fn kind(&self) -> FieldErrorKind {
        self.kind
    }

    /// Return the path of the offending field. E.g. `scopes[1]`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Return the offending value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Return the explanation, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {:?} '{}'", self.field, self.kind, self.value)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}
