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

//! [RestStorage] of client authorizations.

use super::CompletionHandle;
use super::RestStorage;
use crate::authz::ClientAuthorizationValidator;
use crate::authz::DefaultClientAuthorizationValidator;
use crate::authz::derive_name;
use crate::conf::AppConfig;
use oauthreg_dbp::api::ApiError;
use oauthreg_dbp::api::ApiErrorKind;
use oauthreg_dbp::api::ApiObject;
use oauthreg_dbp::api::ClientAuthorization;
use oauthreg_dbp::api::ClientAuthorizationList;
use oauthreg_dbp::api::FieldError;
use oauthreg_dbp::api::FieldSelector;
use oauthreg_dbp::api::LabelSelector;
use oauthreg_dbp::api::RequestContext;
use oauthreg_dbp::api::Status;
use oauthreg_dbp::dbp::DatabaseProvider;
use oauthreg_dbp::dbp::facades::DatabaseProviderFacades;
use oauthreg_dbp_mem::InMemoryDatabaseProvider;
use std::sync::Arc;

/** [RestStorage] of client authorizations.

The name of an authorization is always derived from its user and client
names, so a user can hold at most one authorization per client. A second
create for the same pair fails in the registry as a duplicate.

Updates are validated against the version fetched just before, but nothing
prevents a concurrent write in between. Callers that need to detect this
should send the `resourceVersion` they read, which registries supporting
optimistic concurrency verify on write.
*/
pub struct ClientAuthorizationStorage {
    /// The registry.
    dbp: Arc<DatabaseProvider>,
    /// Rule set for new and updated objects.
    validator: Arc<dyn ClientAuthorizationValidator>,
}

impl ClientAuthorizationStorage {
    /// Resource name used in error messages.
    const RESOURCE: &'static str = "clientAuthorization";

    /// Return a new instance.
    pub fn new(
        dbp: &Arc<DatabaseProvider>,
        validator: &Arc<dyn ClientAuthorizationValidator>,
    ) -> Arc<Self> {
        Arc::new(Self {
            dbp: Arc::clone(dbp),
            validator: Arc::clone(validator),
        })
    }

    /// Return a new instance with the registry and rules selected by the
    /// [AppConfig].
    pub async fn from_config(app_config: &AppConfig) -> Result<Arc<Self>, ApiError> {
        let dbp = match app_config.backend.implementation() {
            "mem" => {
                let inmem_provider = InMemoryDatabaseProvider::new().await;
                Arc::new(inmem_provider.as_database_provider())
            }
            unknown_provider => {
                return Err(ApiErrorKind::StorageFault.error_with_msg(format!(
                    "Unknown database provider type '{unknown_provider}'."
                )));
            }
        };
        let validator: Arc<dyn ClientAuthorizationValidator> = Arc::new(
            DefaultClientAuthorizationValidator::from_config(&app_config.validation),
        );
        log::info!(
            "Client authorization storage is using the '{}' database provider.",
            app_config.backend.implementation()
        );
        Ok(Self::new(&dbp, &validator))
    }

    /// Unwrap the [ClientAuthorization] or fail if the object is of another
    /// kind.
    fn as_client_authorization(object: ApiObject) -> Result<ClientAuthorization, ApiError> {
        match object {
            ApiObject::ClientAuthorization(authorization) => Ok(authorization),
            other => Err(ApiErrorKind::InvalidRequest.error_with_msg(format!(
                "Not a client authorization: '{}'.",
                other.kind()
            ))),
        }
    }

    /// Fail with [ApiErrorKind::Invalid] unless `errors` is empty.
    fn assert_valid(name: &str, errors: Vec<FieldError>) -> Result<(), ApiError> {
        if errors.is_empty() {
            Ok(())
        } else {
            if log::log_enabled!(log::Level::Debug) {
                log::debug!(
                    "Rejecting {} '{name}' with {} field error(s).",
                    Self::RESOURCE,
                    errors.len()
                );
            }
            Err(ApiError::invalid(Self::RESOURCE, name, errors))
        }
    }
}

#[async_trait::async_trait]
impl RestStorage for ClientAuthorizationStorage {
    fn new_object(&self) -> ApiObject {
        ApiObject::ClientAuthorization(ClientAuthorization::default())
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> Result<ApiObject, ApiError> {
        self.dbp
            .client_authorization_facade()
            .get(ctx, id)
            .await
            .map(ApiObject::from)
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        label_selector: &LabelSelector,
        field_selector: &FieldSelector,
    ) -> Result<ApiObject, ApiError> {
        if !field_selector.is_everything() {
            log::debug!(
                "Field selector '{field_selector}' is not supported for {} and will match everything.",
                Self::RESOURCE
            );
        }
        let items = self
            .dbp
            .client_authorization_facade()
            .list(ctx, label_selector)
            .await?;
        Ok(ApiObject::ClientAuthorizationList(
            ClientAuthorizationList { items },
        ))
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        object: ApiObject,
    ) -> Result<CompletionHandle<ApiObject>, ApiError> {
        let mut authorization = Self::as_client_authorization(object)?;
        if authorization.user_name.is_empty() || authorization.client_name.is_empty() {
            return Err(ApiErrorKind::InvalidRequest.error_with_msg(format!(
                "Invalid authorization: both user name ('{}') and client name ('{}') are required.",
                authorization.user_name, authorization.client_name
            )));
        }
        authorization.metadata.name =
            derive_name(&authorization.user_name, &authorization.client_name);
        authorization.metadata.fill_system_fields(ctx);
        Self::assert_valid(
            authorization.name(),
            self.validator.validate_new(&authorization),
        )?;
        let dbp = Arc::clone(&self.dbp);
        let ctx = ctx.clone();
        Ok(CompletionHandle::spawn(async move {
            let facade = dbp.client_authorization_facade();
            facade.create(&ctx, &authorization).await?;
            log::debug!("Created {} '{}'.", Self::RESOURCE, authorization.name());
            facade
                .get(&ctx, authorization.name())
                .await
                .map(ApiObject::from)
        }))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        object: ApiObject,
    ) -> Result<CompletionHandle<ApiObject>, ApiError> {
        let mut authorization = Self::as_client_authorization(object)?;
        Self::assert_valid(
            authorization.name(),
            self.validator.validate_new(&authorization),
        )?;
        let previous = self
            .dbp
            .client_authorization_facade()
            .get(ctx, authorization.name())
            .await?;
        authorization
            .metadata
            .retain_system_fields(&previous.metadata);
        Self::assert_valid(
            authorization.name(),
            self.validator.validate_update(&authorization, &previous),
        )?;
        let dbp = Arc::clone(&self.dbp);
        let ctx = ctx.clone();
        Ok(CompletionHandle::spawn(async move {
            let facade = dbp.client_authorization_facade();
            facade.update(&ctx, &authorization).await?;
            log::debug!("Updated {} '{}'.", Self::RESOURCE, authorization.name());
            facade
                .get(&ctx, authorization.name())
                .await
                .map(ApiObject::from)
        }))
    }

    async fn delete(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<CompletionHandle<ApiObject>, ApiError> {
        let dbp = Arc::clone(&self.dbp);
        let ctx = ctx.clone();
        let id = id.to_owned();
        Ok(CompletionHandle::spawn(async move {
            dbp.client_authorization_facade().delete(&ctx, &id).await?;
            log::debug!("Deleted {} '{id}'.", Self::RESOURCE);
            Ok(ApiObject::from(Status::success()))
        }))
    }
}
