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

//! Object meta-data common to all persisted objects.

use super::RequestContext;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Object meta-data.
///
/// Apart from `name` and `labels`, fields are system assigned and any value
/// supplied by a caller on create is overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    /// Unique name of the object within the namespace.
    pub name: String,
    /// Namespace scope. Empty for cluster scoped objects.
    pub namespace: String,
    /// System assigned unique identifier of this incarnation of the object.
    pub uid: String,
    /// Time of creation in epoch microseconds.
    pub creation_timestamp_micros: u64,
    /// Opaque revision marker assigned by the registry on every write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
    /// Free form labels used for selection.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Populate system assigned fields from the request context.
    ///
    /// The resource version is cleared, so the object is unversioned until the
    /// registry has accepted it.
    pub fn fill_system_fields(&mut self, ctx: &RequestContext) {
        self.namespace = ctx.namespace().to_owned();
        self.uid = ctx.request_uid().to_owned();
        self.creation_timestamp_micros = ctx.request_ts_micros();
        self.resource_version = None;
    }

    /// Copy system assigned fields from a previously persisted version.
    pub fn retain_system_fields(&mut self, persisted: &ObjectMeta) {
        self.namespace = persisted.namespace.to_owned();
        self.uid = persisted.uid.to_owned();
        self.creation_timestamp_micros = persisted.creation_timestamp_micros;
    }
}
