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

//! Uniform storage contract driven by a generic API serving layer.

mod client_authorization_storage;
mod completion_handle;

pub use self::client_authorization_storage::ClientAuthorizationStorage;
pub use self::completion_handle::CompletionHandle;
use oauthreg_dbp::api::ApiError;
use oauthreg_dbp::api::ApiObject;
use oauthreg_dbp::api::FieldSelector;
use oauthreg_dbp::api::LabelSelector;
use oauthreg_dbp::api::RequestContext;

/** Storage of a single resource type.

The serving layer depends on this trait and never on a concrete storage.

Reads are answered directly. Writes return once the request has been
validated and handed off, with a [CompletionHandle] that delivers the
eventual outcome. Validation failures are therefore reported without waiting
for the registry.
*/
#[async_trait::async_trait]
pub trait RestStorage: Send + Sync {
    /// Return an empty object of the stored kind for requests to be decoded
    /// into.
    fn new_object(&self) -> ApiObject;

    /// Return the object named `id`.
    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<ApiObject, ApiError>;

    /// Return a list of all objects matching the selectors.
    async fn list(
        &self,
        ctx: &RequestContext,
        label_selector: &LabelSelector,
        field_selector: &FieldSelector,
    ) -> Result<ApiObject, ApiError>;

    /// Validate and start persisting a new object.
    async fn create(
        &self,
        ctx: &RequestContext,
        object: ApiObject,
    ) -> Result<CompletionHandle<ApiObject>, ApiError>;

    /// Validate and start replacing an existing object.
    async fn update(
        &self,
        ctx: &RequestContext,
        object: ApiObject,
    ) -> Result<CompletionHandle<ApiObject>, ApiError>;

    /// Start removing the object named `id`.
    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<CompletionHandle<ApiObject>, ApiError>;
}
