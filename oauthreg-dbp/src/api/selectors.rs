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

//! Label and field selectors used when listing objects.

use super::ApiError;
use super::ApiErrorKind;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Requirement {
    Equals(String, String),
    NotEquals(String, String),
    Exists(String),
    NotExists(String),
}

impl Requirement {
    fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        match self {
            Self::Equals(key, value) => labels.get(key).is_some_and(|v| v == value),
            // Absent labels are not equal to anything.
            Self::NotEquals(key, value) => labels.get(key).is_none_or(|v| v != value),
            Self::Exists(key) => labels.contains_key(key),
            Self::NotExists(key) => !labels.contains_key(key),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Equals(key, value) => write!(f, "{key}={value}"),
            Self::NotEquals(key, value) => write!(f, "{key}!={value}"),
            Self::Exists(key) => write!(f, "{key}"),
            Self::NotExists(key) => write!(f, "!{key}"),
        }
    }
}

/** Selects objects by their labels.

All requirements must match. Supported requirement forms, separated by `,`:

* `key=value` or `key==value`
* `key!=value`
* `key` (label is present)
* `!key` (label is absent)

The empty selector matches everything.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    requirements: Vec<Requirement>,
}

impl LabelSelector {
    /// Return a selector that matches everything.
    pub fn everything() -> Self {
        Self::default()
    }

    /// Parse a selector.
    pub fn parse(selector: &str) -> Result<Self, ApiError> {
        let mut requirements = Vec::new();
        for part in selector.split(',').map(str::trim) {
            if part.is_empty() {
                continue;
            }
            let requirement = if let Some((key, value)) = part.split_once("!=") {
                Requirement::NotEquals(Self::key(key)?, Self::value(value)?)
            } else if let Some((key, value)) = part.split_once("==") {
                Requirement::Equals(Self::key(key)?, Self::value(value)?)
            } else if let Some((key, value)) = part.split_once('=') {
                Requirement::Equals(Self::key(key)?, Self::value(value)?)
            } else if let Some(key) = part.strip_prefix('!') {
                Requirement::NotExists(Self::key(key)?)
            } else {
                Requirement::Exists(Self::key(part)?)
            };
            requirements.push(requirement);
        }
        Ok(Self { requirements })
    }

    fn key(key: &str) -> Result<String, ApiError> {
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) || key.contains(['!', '=']) {
            return Err(ApiErrorKind::InvalidRequest
                .error_with_msg(format!("Invalid label selector key '{key}'.")));
        }
        Ok(key.to_owned())
    }

    fn value(value: &str) -> Result<String, ApiError> {
        let value = value.trim();
        if value.contains(char::is_whitespace) || value.contains(['!', '=']) {
            return Err(ApiErrorKind::InvalidRequest
                .error_with_msg(format!("Invalid label selector value '{value}'.")));
        }
        Ok(value.to_owned())
    }

    /// Add an equality requirement.
    pub fn and_equals(mut self, key: &str, value: &str) -> Self {
        self.requirements
            .push(Requirement::Equals(key.to_owned(), value.to_owned()));
        self
    }

    /// Return `true` if the selector matches everything.
    pub fn is_everything(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Return `true` if all requirements match the `labels`.
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.requirements
            .iter()
            .all(|requirement| requirement.matches(labels))
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts = self
            .requirements
            .iter()
            .map(Requirement::to_string)
            .collect::<Vec<_>>();
        write!(f, "{}", parts.join(","))
    }
}

/// Selects objects by field values.
///
/// Field selection is not evaluated by the client authorization storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelector {
    selector: String,
}

impl FieldSelector {
    /// Return a selector that matches everything.
    pub fn everything() -> Self {
        Self::default()
    }

    /// Return a new instance.
    pub fn new(selector: &str) -> Self {
        Self {
            selector: selector.trim().to_owned(),
        }
    }

    /// Return `true` if the selector matches everything.
    pub fn is_everything(&self) -> bool {
        self.selector.is_empty()
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_matches_everything() {
        let selector = LabelSelector::parse(" ").unwrap();
        assert!(selector.is_everything());
        assert!(selector.matches(&labels(&[])));
        assert!(selector.matches(&labels(&[("env", "prod")])));
    }

    #[test]
    fn requirement_forms() {
        let selector = LabelSelector::parse("env=prod, tier==web,team!=ops,owner,!legacy").unwrap();
        assert_eq!(selector.to_string(), "env=prod,tier=web,team!=ops,owner,!legacy");
        let mut candidate = labels(&[("env", "prod"), ("tier", "web"), ("owner", "alice")]);
        assert!(selector.matches(&candidate));
        candidate.insert("team".to_string(), "ops".to_string());
        assert!(!selector.matches(&candidate));
        candidate.insert("team".to_string(), "dev".to_string());
        assert!(selector.matches(&candidate));
        candidate.insert("legacy".to_string(), String::new());
        assert!(!selector.matches(&candidate));
    }

    #[test]
    fn built_selector() {
        let selector = LabelSelector::everything()
            .and_equals("env", "prod")
            .and_equals("tier", "web");
        assert!(!selector.is_everything());
        assert_eq!(selector.to_string(), "env=prod,tier=web");
        assert!(selector.matches(&labels(&[("env", "prod"), ("tier", "web")])));
        assert!(!selector.matches(&labels(&[("env", "prod")])));
    }

    #[test]
    fn malformed_selector() {
        for selector in ["=prod", "env=pr od", "a==b==c", "!"] {
            let err = LabelSelector::parse(selector).unwrap_err();
            assert_eq!(err.kind(), &ApiErrorKind::InvalidRequest, "{selector}");
        }
    }

    #[test]
    fn field_selector_everything() {
        assert!(FieldSelector::everything().is_everything());
        assert!(FieldSelector::new("  ").is_everything());
        assert!(!FieldSelector::new("userName=alice").is_everything());
    }
}
