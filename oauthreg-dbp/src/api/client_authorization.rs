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

//! Client authorization model.

use super::ObjectMeta;
use serde::Deserialize;
use serde::Serialize;

/// An authorization granted by a user to a client application, scoped by a
/// set of permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientAuthorization {
    /// Object meta-data. The name is derived from user and client.
    pub metadata: ObjectMeta,
    /// Identity of the granting user.
    pub user_name: String,
    /// Identity of the authorized client application.
    pub client_name: String,
    /// Granted permissions.
    pub scopes: Vec<String>,
}

impl ClientAuthorization {
    /// Return a new instance without any meta-data.
    pub fn new(user_name: &str, client_name: &str, scopes: &[&str]) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            user_name: user_name.to_owned(),
            client_name: client_name.to_owned(),
            scopes: scopes.iter().map(ToString::to_string).collect(),
        }
    }

    /// Return the object name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}
