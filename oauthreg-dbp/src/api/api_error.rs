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

//! Errors reported by the gateway and the registry backends.

use super::FieldError;
use std::error::Error;
use std::fmt;

/// Cause of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Malformed input shape. E.g. wrong object kind or missing identity.
    InvalidRequest,
    /// Field level validation failed. See [ApiError::field_errors].
    Invalid,
    /// The referenced object does not exist.
    NotFound,
    /// An object with the same (derived) name already exists.
    AlreadyExists,
    /// The write was based on a stale resource version.
    Conflict,
    /// Opaque storage level failure.
    StorageFault,
}

impl ApiErrorKind {
    /// Create a new instance with an error message.
    pub fn error_with_msg<S: AsRef<str>>(self, msg: S) -> ApiError {
        ApiError {
            kind: self,
            msg: Some(msg.as_ref().to_string()),
            name: None,
            field_errors: Vec::new(),
        }
    }

    /// Create a new instance without an error message.
    pub fn error(self) -> ApiError {
        ApiError {
            kind: self,
            msg: None,
            name: None,
            field_errors: Vec::new(),
        }
    }

    /// HTTP status code an API layer should respond with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::NotFound => 404,
            Self::AlreadyExists | Self::Conflict => 409,
            Self::Invalid => 422,
            Self::StorageFault => 500,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/** API error.

Create a new instance via [ApiErrorKind] or, for validation failures, via
[ApiError::invalid].
*/
#[derive(Debug, Clone)]
pub struct ApiError {
    kind: ApiErrorKind,
    msg: Option<String>,
    name: Option<String>,
    field_errors: Vec<FieldError>,
}

impl ApiError {
    /// Return a new [ApiErrorKind::Invalid] error for the named `resource`.
    pub fn invalid(resource: &str, name: &str, field_errors: Vec<FieldError>) -> Self {
        let details = field_errors
            .iter()
            .map(FieldError::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ApiErrorKind::Invalid
            .error_with_msg(format!("{resource} '{name}' is invalid: {details}"))
            .with_name(name)
            .with_field_errors(field_errors)
    }

    /// Attach the name of the offending object.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Attach a list of field level failures.
    pub fn with_field_errors(mut self, field_errors: Vec<FieldError>) -> Self {
        self.field_errors = field_errors;
        self
    }

    /// Return the type of error.
    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// Return the name of the offending object, when known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return field level failures. Only populated for
    /// [ApiErrorKind::Invalid].
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// See [ApiErrorKind::status_code].
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{} {}", self.kind, msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl AsRef<ApiError> for ApiError {
    fn as_ref(&self) -> &ApiError {
        self
    }
}

impl Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FieldErrorKind;

    #[test]
    fn invalid_carries_name_and_fields() {
        let err = ApiError::invalid(
            "clientAuthorization",
            "alice:cli-1",
            vec![FieldError::new(FieldErrorKind::Required, "userName", "")],
        );
        assert_eq!(err.kind(), &ApiErrorKind::Invalid);
        assert_eq!(err.name(), Some("alice:cli-1"));
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.status_code(), 422);
        assert!(err.to_string().contains("userName"));
    }

    #[test]
    fn display_without_message() {
        assert_eq!(ApiErrorKind::NotFound.error().to_string(), "NotFound");
        assert_eq!(
            ApiErrorKind::NotFound.error_with_msg("gone").to_string(),
            "NotFound gone"
        );
    }
}
