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

//! Object envelope exchanged with the serving layer.

use super::ClientAuthorization;
use serde::Deserialize;
use serde::Serialize;

/// Objects that storage implementations accept and return.
///
/// Serialized with a `kind` tag so that a generic serving layer can decode
/// requests without knowing the concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ApiObject {
    /// See [ClientAuthorization].
    ClientAuthorization(ClientAuthorization),
    /// See [ClientAuthorizationList].
    ClientAuthorizationList(ClientAuthorizationList),
    /// See [Status].
    Status(Status),
}

impl ApiObject {
    /// Return the kind name of the object.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ClientAuthorization(_) => "ClientAuthorization",
            Self::ClientAuthorizationList(_) => "ClientAuthorizationList",
            Self::Status(_) => "Status",
        }
    }
}

impl From<ClientAuthorization> for ApiObject {
    fn from(value: ClientAuthorization) -> Self {
        Self::ClientAuthorization(value)
    }
}

impl From<Status> for ApiObject {
    fn from(value: Status) -> Self {
        Self::Status(value)
    }
}

/// A list of client authorizations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAuthorizationList {
    /// List entries in the order the registry returned them.
    pub items: Vec<ClientAuthorization>,
}

/// Outcome of an operation that does not return an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Failure,
}

/// Generic operation status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Outcome.
    pub status: StatusKind,
    /// Optional human readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Status {
    /// Return a success status.
    pub fn success() -> Self {
        Self {
            status: StatusKind::Success,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_by_kind_tag() {
        let json = r#"{"kind":"ClientAuthorization","userName":"alice","clientName":"cli-1","scopes":["read"]}"#;
        let object: ApiObject = serde_json::from_str(json).unwrap();
        let ApiObject::ClientAuthorization(authorization) = object else {
            panic!("Unexpected kind");
        };
        assert_eq!(authorization.user_name, "alice");
        assert_eq!(authorization.client_name, "cli-1");
        assert_eq!(authorization.scopes, vec!["read".to_string()]);
        assert!(authorization.metadata.name.is_empty());
    }

    #[test]
    fn status_kind_tag() {
        let json = serde_json::to_string(&ApiObject::from(Status::success())).unwrap();
        assert_eq!(json, r#"{"kind":"Status","status":"Success"}"#);
    }

    #[test]
    fn decode_failure_status() {
        let json = r#"{"kind":"Status","status":"Failure","message":"gone"}"#;
        let decoded: ApiObject = serde_json::from_str(json).unwrap();
        assert_eq!(
            decoded,
            ApiObject::Status(Status {
                status: StatusKind::Failure,
                message: Some("gone".to_owned()),
            })
        );
    }
}
