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

//! Ephemeral in-memory implementation of [DatabaseProvider].

mod inmem_facades;

use self::inmem_facades::InMemProviderFacades;
use crossbeam_skiplist::SkipMap;
use oauthreg_dbp::api::ClientAuthorization;
use oauthreg_dbp::dbp::DatabaseProvider;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::Mutex;

/// Ephemeral in-memory implementation of [DatabaseProvider].
pub struct InMemoryDatabaseProvider {
    /// Client authorizations by name by namespace.
    client_authorizations: SkipMap<String, SkipMap<String, ClientAuthorization>>,
    /// Serializes writes. Reads are lock-less.
    write_lock: Mutex<()>,
    /// Source of resource versions.
    revision: AtomicU64,
}

impl InMemoryDatabaseProvider {
    /// Return a new instance.
    pub async fn new() -> Arc<Self> {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Using in-mem db provider.");
        }
        Arc::new(Self {
            client_authorizations: SkipMap::default(),
            write_lock: Mutex::default(),
            revision: AtomicU64::default(),
        })
    }

    /// Get [DatabaseProvider] instance.
    pub fn as_database_provider(self: &Arc<Self>) -> DatabaseProvider {
        DatabaseProvider::new(Arc::new(InMemProviderFacades::new(self)))
    }

    /// Return the next resource version.
    fn next_resource_version(&self) -> String {
        (self.revision.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}
