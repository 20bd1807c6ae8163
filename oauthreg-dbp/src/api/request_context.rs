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

//! Per request scoping.

use crate::time::get_timestamp_micros;
use uuid::Uuid;

/// Caller and namespace scoping of a single request.
///
/// System assigned meta-data of created objects is derived from the context,
/// so one context yields the same meta-data no matter how often it is applied.
#[derive(Debug, Clone)]
pub struct RequestContext {
    namespace: String,
    user: Option<String>,
    request_uid: String,
    request_ts_micros: u64,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new("")
    }
}

impl RequestContext {
    /// Return a new instance for the `namespace`. Use an empty string for
    /// cluster scoped requests.
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            user: None,
            request_uid: Uuid::new_v4().to_string(),
            request_ts_micros: get_timestamp_micros(),
        }
    }

    /// Attach the authenticated caller.
    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_owned());
        self
    }

    /// Override the time the request was received.
    pub fn with_request_ts_micros(mut self, request_ts_micros: u64) -> Self {
        self.request_ts_micros = request_ts_micros;
        self
    }

    /// Namespace scope of the request.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The authenticated caller, if known.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Unique identifier of this request.
    pub fn request_uid(&self) -> &str {
        &self.request_uid
    }

    /// Time the request was received in epoch microseconds.
    pub fn request_ts_micros(&self) -> u64 {
        self.request_ts_micros
    }
}
