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

//! Database facade for client authorizations.

use crate::api::ApiError;
use crate::api::ClientAuthorization;
use crate::api::LabelSelector;
use crate::api::RequestContext;

/** Database facade for client authorizations.

This is the registry: the sole source of truth for which authorizations exist.
Objects are addressed by name within the namespace of the [RequestContext].
*/
#[async_trait::async_trait]
pub trait ClientAuthorizationFacade: Send + Sync {
    /// Return the authorization by `name`.
    ///
    /// Fails with [NotFound](crate::api::ApiErrorKind::NotFound) when absent.
    async fn get(&self, ctx: &RequestContext, name: &str)
    -> Result<ClientAuthorization, ApiError>;

    /// Return all authorizations matching the `label_selector`.
    async fn list(
        &self,
        ctx: &RequestContext,
        label_selector: &LabelSelector,
    ) -> Result<Vec<ClientAuthorization>, ApiError>;

    /// Persist a new authorization.
    ///
    /// Fails with [AlreadyExists](crate::api::ApiErrorKind::AlreadyExists)
    /// when the name is taken.
    async fn create(
        &self,
        ctx: &RequestContext,
        authorization: &ClientAuthorization,
    ) -> Result<(), ApiError>;

    /// Replace an existing authorization.
    ///
    /// Fails with [NotFound](crate::api::ApiErrorKind::NotFound) if it no
    /// longer exists. Implementations that support optimistic concurrency
    /// fail with [Conflict](crate::api::ApiErrorKind::Conflict) when the
    /// resource version is set and stale.
    async fn update(
        &self,
        ctx: &RequestContext,
        authorization: &ClientAuthorization,
    ) -> Result<(), ApiError>;

    /// Remove the authorization by `name`.
    ///
    /// Fails with [NotFound](crate::api::ApiErrorKind::NotFound) when absent.
    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), ApiError>;
}
