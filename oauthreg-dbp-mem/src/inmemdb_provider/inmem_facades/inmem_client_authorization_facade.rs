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

//! Ephemeral in-memory implementation of [ClientAuthorizationFacade].

use crate::InMemoryDatabaseProvider;
use crossbeam_skiplist::SkipMap;
use oauthreg_dbp::api::ApiError;
use oauthreg_dbp::api::ApiErrorKind;
use oauthreg_dbp::api::ClientAuthorization;
use oauthreg_dbp::api::LabelSelector;
use oauthreg_dbp::api::RequestContext;
use oauthreg_dbp::dbp::facades::ClientAuthorizationFacade;
use std::sync::Arc;

/// Ephemeral in-memory implementation of [ClientAuthorizationFacade].
pub struct InMemClientAuthorizationFacade {
    inmem_provider: Arc<InMemoryDatabaseProvider>,
}

impl InMemClientAuthorizationFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryDatabaseProvider>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }

    fn not_found(ctx: &RequestContext, name: &str) -> ApiError {
        ApiErrorKind::NotFound
            .error_with_msg(format!(
                "clientAuthorization '{name}' not found in namespace '{}'.",
                ctx.namespace()
            ))
            .with_name(name)
    }

    /// Return the stored authorization if present.
    fn lookup(&self, ctx: &RequestContext, name: &str) -> Option<ClientAuthorization> {
        self.inmem_provider
            .client_authorizations
            .get(ctx.namespace())
            .and_then(|namespace| {
                namespace
                    .value()
                    .get(name)
                    .map(|entry| entry.value().clone())
            })
    }
}

#[async_trait::async_trait]
impl ClientAuthorizationFacade for InMemClientAuthorizationFacade {
    async fn get(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<ClientAuthorization, ApiError> {
        self.lookup(ctx, name)
            .ok_or_else(|| Self::not_found(ctx, name))
    }

    async fn list(
        &self,
        ctx: &RequestContext,
        label_selector: &LabelSelector,
    ) -> Result<Vec<ClientAuthorization>, ApiError> {
        Ok(self
            .inmem_provider
            .client_authorizations
            .get(ctx.namespace())
            .map(|namespace| {
                namespace
                    .value()
                    .iter()
                    .filter(|entry| label_selector.matches(&entry.value().metadata.labels))
                    .map(|entry| entry.value().clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        authorization: &ClientAuthorization,
    ) -> Result<(), ApiError> {
        let name = authorization.name();
        let _write_guard = self.inmem_provider.write_lock.lock().await;
        let namespace = self
            .inmem_provider
            .client_authorizations
            .get_or_insert_with(ctx.namespace().to_owned(), SkipMap::default);
        if namespace.value().contains_key(name) {
            return Err(ApiErrorKind::AlreadyExists
                .error_with_msg(format!("clientAuthorization '{name}' already exists."))
                .with_name(name));
        }
        let mut stored = authorization.clone();
        stored.metadata.resource_version = Some(self.inmem_provider.next_resource_version());
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "Created '{name}' at resource version {:?}.",
                stored.metadata.resource_version
            );
        }
        namespace.value().insert(name.to_owned(), stored);
        Ok(())
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        authorization: &ClientAuthorization,
    ) -> Result<(), ApiError> {
        let name = authorization.name();
        let _write_guard = self.inmem_provider.write_lock.lock().await;
        let existing = self
            .lookup(ctx, name)
            .ok_or_else(|| Self::not_found(ctx, name))?;
        if let Some(expected) = &authorization.metadata.resource_version
            && existing.metadata.resource_version.as_ref() != Some(expected)
        {
            return Err(ApiErrorKind::Conflict
                .error_with_msg(format!(
                    "clientAuthorization '{name}' was modified. Expected resource version {expected} but found {:?}.",
                    existing.metadata.resource_version
                ))
                .with_name(name));
        }
        let mut stored = authorization.clone();
        stored.metadata.resource_version = Some(self.inmem_provider.next_resource_version());
        self.inmem_provider
            .client_authorizations
            .get_or_insert_with(ctx.namespace().to_owned(), SkipMap::default)
            .value()
            .insert(name.to_owned(), stored);
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, name: &str) -> Result<(), ApiError> {
        let _write_guard = self.inmem_provider.write_lock.lock().await;
        self.inmem_provider
            .client_authorizations
            .get(ctx.namespace())
            .and_then(|namespace| namespace.value().remove(name).map(|_| ()))
            .ok_or_else(|| Self::not_found(ctx, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oauthreg_dbp::dbp::facades::DatabaseProviderFacades;

    fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    fn authorization(name: &str, user: &str, client: &str) -> ClientAuthorization {
        let mut authorization = ClientAuthorization::new(user, client, &["read"]);
        authorization.metadata.name = name.to_owned();
        authorization
    }

    #[tokio::test]
    async fn create_get_delete() {
        init_logger();
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.client_authorization_facade();
        let ctx = RequestContext::default();
        facade
            .create(&ctx, &authorization("alice:cli-1", "alice", "cli-1"))
            .await
            .unwrap();
        let stored = facade.get(&ctx, "alice:cli-1").await.unwrap();
        assert_eq!(stored.user_name, "alice");
        assert_eq!(stored.metadata.resource_version.as_deref(), Some("1"));
        facade.delete(&ctx, "alice:cli-1").await.unwrap();
        let err = facade.get(&ctx, "alice:cli-1").await.unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::NotFound);
        let err = facade.delete(&ctx, "alice:cli-1").await.unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::NotFound);
        assert_eq!(err.name(), Some("alice:cli-1"));
    }

    #[tokio::test]
    async fn delete_is_scoped_to_namespace() {
        init_logger();
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.client_authorization_facade();
        let ctx = RequestContext::new("team-a");
        let other_ctx = RequestContext::new("team-b");
        let stored = authorization("alice:cli-1", "alice", "cli-1");
        facade.create(&ctx, &stored).await.unwrap();
        facade.create(&other_ctx, &stored).await.unwrap();
        facade.delete(&ctx, "alice:cli-1").await.unwrap();
        let err = facade.get(&ctx, "alice:cli-1").await.unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::NotFound);
        assert!(facade.get(&other_ctx, "alice:cli-1").await.is_ok());
        // Deleting in a namespace that was never written to
        let err = facade
            .delete(&RequestContext::new("team-c"), "alice:cli-1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::NotFound);
        // The name can be used again once deleted
        facade.create(&ctx, &stored).await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        init_logger();
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.client_authorization_facade();
        let ctx = RequestContext::default();
        let first = authorization("alice:cli-1", "alice", "cli-1");
        facade.create(&ctx, &first).await.unwrap();
        let err = facade.create(&ctx, &first).await.unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::AlreadyExists);
    }

    #[tokio::test]
    async fn update_honors_resource_version() {
        init_logger();
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.client_authorization_facade();
        let ctx = RequestContext::default();
        let missing = authorization("bob:cli-2", "bob", "cli-2");
        let err = facade.update(&ctx, &missing).await.unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::NotFound);
        facade.create(&ctx, &missing).await.unwrap();
        let mut current = facade.get(&ctx, "bob:cli-2").await.unwrap();
        current.scopes.push("write".to_owned());
        facade.update(&ctx, &current).await.unwrap();
        // Still carrying the version from before the first update
        let err = facade.update(&ctx, &current).await.unwrap_err();
        assert_eq!(err.kind(), &ApiErrorKind::Conflict);
        // Unversioned writes always win
        current.metadata.resource_version = None;
        facade.update(&ctx, &current).await.unwrap();
        let stored = facade.get(&ctx, "bob:cli-2").await.unwrap();
        assert_eq!(stored.scopes, vec!["read", "write"]);
        assert_eq!(stored.metadata.resource_version.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn list_by_namespace_and_labels() {
        init_logger();
        let dbp = InMemoryDatabaseProvider::new().await.as_database_provider();
        let facade = dbp.client_authorization_facade();
        let ctx = RequestContext::new("team-a");
        let other_ctx = RequestContext::new("team-b");
        let mut labeled = authorization("carol:cli-1", "carol", "cli-1");
        labeled
            .metadata
            .labels
            .insert("env".to_owned(), "prod".to_owned());
        facade.create(&ctx, &labeled).await.unwrap();
        facade
            .create(&ctx, &authorization("alice:cli-1", "alice", "cli-1"))
            .await
            .unwrap();
        facade
            .create(&other_ctx, &authorization("dave:cli-1", "dave", "cli-1"))
            .await
            .unwrap();
        let all = facade
            .list(&ctx, &LabelSelector::everything())
            .await
            .unwrap();
        let names = all.iter().map(ClientAuthorization::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["alice:cli-1", "carol:cli-1"]);
        let prod = facade
            .list(&ctx, &LabelSelector::parse("env=prod").unwrap())
            .await
            .unwrap();
        assert_eq!(prod.len(), 1);
        assert_eq!(prod[0].name(), "carol:cli-1");
        let none = facade
            .list(&RequestContext::new("team-c"), &LabelSelector::everything())
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
