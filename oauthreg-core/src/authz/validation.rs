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

//! Field level validation of client authorizations.

use super::derive_name;
use super::split_name;
use crate::conf::ValidationConfig;
use oauthreg_dbp::api::ClientAuthorization;
use oauthreg_dbp::api::FieldError;
use oauthreg_dbp::api::FieldErrorKind;
use std::collections::HashSet;

/// Rule set applied before a client authorization is handed to the registry.
///
/// An empty result means the object is valid.
pub trait ClientAuthorizationValidator: Send + Sync {
    /// Validate the structure of a single object.
    fn validate_new(&self, authorization: &ClientAuthorization) -> Vec<FieldError>;

    /// Validate a proposed new version against the `previous` persisted one.
    fn validate_update(
        &self,
        authorization: &ClientAuthorization,
        previous: &ClientAuthorization,
    ) -> Vec<FieldError>;
}

/** Default rules for client authorizations.

* name, user name and client name are required.
* the name must be the one derived from user and client.
* scopes must be unique, non-empty and free of whitespace. Both the number of
  scopes and their length is limited.
* name, user name, client name and uid are immutable. The storage carries the
  uid over from the persisted version before validating an update, so only
  callers validating directly can observe a changed uid.
*/
pub struct DefaultClientAuthorizationValidator {
    max_scopes: usize,
    max_scope_length: usize,
}

impl Default for DefaultClientAuthorizationValidator {
    fn default() -> Self {
        Self::new(64, 256)
    }
}

impl DefaultClientAuthorizationValidator {
    /// Return a new instance.
    pub fn new(max_scopes: usize, max_scope_length: usize) -> Self {
        Self {
            max_scopes,
            max_scope_length,
        }
    }

    /// Return a new instance configured by [ValidationConfig].
    pub fn from_config(validation_config: &ValidationConfig) -> Self {
        Self::new(
            validation_config.max_scopes(),
            validation_config.max_scope_length(),
        )
    }

    fn validate_scopes(&self, scopes: &[String], errors: &mut Vec<FieldError>) {
        if scopes.len() > self.max_scopes {
            errors.push(
                FieldError::new(FieldErrorKind::TooMany, "scopes", &scopes.len().to_string())
                    .with_detail(&format!("at most {} scopes are allowed", self.max_scopes)),
            );
        }
        let mut seen = HashSet::new();
        for (i, scope) in scopes.iter().enumerate() {
            let field = format!("scopes[{i}]");
            if scope.is_empty() {
                errors.push(FieldError::new(FieldErrorKind::Required, &field, scope));
            } else if scope.contains(char::is_whitespace) {
                errors.push(
                    FieldError::new(FieldErrorKind::Invalid, &field, scope)
                        .with_detail("scopes may not contain whitespace"),
                );
            } else if scope.chars().count() > self.max_scope_length {
                errors.push(
                    FieldError::new(FieldErrorKind::TooLong, &field, scope).with_detail(&format!(
                        "at most {} characters are allowed",
                        self.max_scope_length
                    )),
                );
            }
            if !seen.insert(scope.as_str()) {
                errors.push(FieldError::new(FieldErrorKind::Duplicate, &field, scope));
            }
        }
    }

    fn validate_immutable(field: &str, value: &str, previous: &str, errors: &mut Vec<FieldError>) {
        if value != previous {
            errors.push(
                FieldError::new(FieldErrorKind::Forbidden, field, value)
                    .with_detail(&format!("field is immutable, was '{previous}'")),
            );
        }
    }
}

impl ClientAuthorizationValidator for DefaultClientAuthorizationValidator {
    fn validate_new(&self, authorization: &ClientAuthorization) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let name = authorization.name();
        if name.is_empty() {
            errors.push(FieldError::new(
                FieldErrorKind::Required,
                "metadata.name",
                name,
            ));
        }
        if authorization.user_name.is_empty() {
            errors.push(FieldError::new(FieldErrorKind::Required, "userName", ""));
        }
        if authorization.client_name.is_empty() {
            errors.push(FieldError::new(FieldErrorKind::Required, "clientName", ""));
        }
        if errors.is_empty() {
            let expected = derive_name(&authorization.user_name, &authorization.client_name);
            if name != expected {
                let detail = match split_name(name) {
                    Some((user_name, client_name)) => format!(
                        "must be '{expected}', but names user '{user_name}' and client '{client_name}'"
                    ),
                    None => format!("must be '{expected}', but is not a derived name"),
                };
                errors.push(
                    FieldError::new(FieldErrorKind::Invalid, "metadata.name", name)
                        .with_detail(&detail),
                );
            }
        }
        self.validate_scopes(&authorization.scopes, &mut errors);
        errors
    }

    fn validate_update(
        &self,
        authorization: &ClientAuthorization,
        previous: &ClientAuthorization,
    ) -> Vec<FieldError> {
        let mut errors = self.validate_new(authorization);
        Self::validate_immutable(
            "metadata.name",
            authorization.name(),
            previous.name(),
            &mut errors,
        );
        Self::validate_immutable(
            "metadata.uid",
            &authorization.metadata.uid,
            &previous.metadata.uid,
            &mut errors,
        );
        Self::validate_immutable(
            "userName",
            &authorization.user_name,
            &previous.user_name,
            &mut errors,
        );
        Self::validate_immutable(
            "clientName",
            &authorization.client_name,
            &previous.client_name,
            &mut errors,
        );
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(user: &str, client: &str, scopes: &[&str]) -> ClientAuthorization {
        let mut authorization = ClientAuthorization::new(user, client, scopes);
        authorization.metadata.name = derive_name(user, client);
        authorization
    }

    fn kinds_by_field(errors: &[FieldError]) -> Vec<(String, FieldErrorKind)> {
        errors
            .iter()
            .map(|e| (e.field().to_owned(), e.kind()))
            .collect()
    }

    #[test]
    fn valid_authorization() {
        let validator = DefaultClientAuthorizationValidator::default();
        assert!(
            validator
                .validate_new(&named("alice", "cli-1", &["read", "write"]))
                .is_empty()
        );
        // No scopes at all is fine
        assert!(validator.validate_new(&named("alice", "cli-1", &[])).is_empty());
    }

    #[test]
    fn required_fields() {
        let validator = DefaultClientAuthorizationValidator::default();
        let errors = validator.validate_new(&ClientAuthorization::default());
        assert_eq!(
            kinds_by_field(&errors),
            vec![
                ("metadata.name".to_owned(), FieldErrorKind::Required),
                ("userName".to_owned(), FieldErrorKind::Required),
                ("clientName".to_owned(), FieldErrorKind::Required),
            ]
        );
    }

    #[test]
    fn name_must_be_derived() {
        let validator = DefaultClientAuthorizationValidator::default();
        let mut authorization = named("alice", "cli-1", &["read"]);
        authorization.metadata.name = "bob:cli-1".to_owned();
        let errors = validator.validate_new(&authorization);
        assert_eq!(
            kinds_by_field(&errors),
            vec![("metadata.name".to_owned(), FieldErrorKind::Invalid)]
        );
        assert!(errors[0].detail().unwrap().contains("user 'bob'"));
        // Not something derive_name could produce
        authorization.metadata.name = "alice%cli-1".to_owned();
        let errors = validator.validate_new(&authorization);
        assert_eq!(
            kinds_by_field(&errors),
            vec![("metadata.name".to_owned(), FieldErrorKind::Invalid)]
        );
        assert!(errors[0].detail().unwrap().contains("not a derived name"));
    }

    #[test]
    fn scope_rules() {
        let validator = DefaultClientAuthorizationValidator::new(4, 8);
        let errors = validator.validate_new(&named(
            "alice",
            "cli-1",
            &["read", "", "a b", "read", "verylongscope"],
        ));
        assert_eq!(
            kinds_by_field(&errors),
            vec![
                ("scopes".to_owned(), FieldErrorKind::TooMany),
                ("scopes[1]".to_owned(), FieldErrorKind::Required),
                ("scopes[2]".to_owned(), FieldErrorKind::Invalid),
                ("scopes[3]".to_owned(), FieldErrorKind::Duplicate),
                ("scopes[4]".to_owned(), FieldErrorKind::TooLong),
            ]
        );
    }

    #[test]
    fn identity_is_immutable() {
        let validator = DefaultClientAuthorizationValidator::default();
        let previous = named("alice", "cli-1", &["read"]);
        let mut changed_scopes = previous.clone();
        changed_scopes.scopes.push("write".to_owned());
        assert!(validator.validate_update(&changed_scopes, &previous).is_empty());
        // Changed user keeping the old name
        let mut changed_user = previous.clone();
        changed_user.user_name = "mallory".to_owned();
        let errors = validator.validate_update(&changed_user, &previous);
        assert!(
            errors
                .iter()
                .any(|e| e.field() == "userName" && e.kind() == FieldErrorKind::Forbidden)
        );
        // Changed client with a consistently derived name
        let mut changed_uid = previous.clone();
        changed_uid.metadata.uid = "other-uid".to_owned();
        assert_eq!(
            kinds_by_field(&validator.validate_update(&changed_uid, &previous)),
            vec![("metadata.uid".to_owned(), FieldErrorKind::Forbidden)]
        );
        let changed_client = named("alice", "cli-2", &["read"]);
        let errors = validator.validate_update(&changed_client, &previous);
        assert_eq!(
            kinds_by_field(&errors),
            vec![
                ("metadata.name".to_owned(), FieldErrorKind::Forbidden),
                ("clientName".to_owned(), FieldErrorKind::Forbidden),
            ]
        );
    }
}
