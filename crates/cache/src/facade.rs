//! Caller-facing cache facade.

use std::sync::Arc;

use aspen_bus::{Bus, BusEvent, Identity, Result, SignalFilter};
use tokio::sync::mpsc;
use tracing::debug;

use crate::agent::{ApplicationSyncAgent, DesktopSyncAgent, forward};
use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::store::{CacheStore, StoreReader};

/// A local, always-current mirror of remotely hosted accessible-object
/// trees.
///
/// Two scopes exist: [`AccessibleCache::desktop`] mirrors every
/// application on the desktop behind a synthetic root entry, while
/// [`AccessibleCache::application`] mirrors the single process owning a
/// well-known bus name. Consumers query through [`get`](Self::get) /
/// [`exists`](Self::exists); every mutation path stays inside the sync
/// agents.
pub struct AccessibleCache {
	store: Arc<CacheStore>,
	scope: Scope,
}

enum Scope {
	Desktop(DesktopSyncAgent),
	Application {
		agent: ApplicationSyncAgent,
		events: mpsc::UnboundedReceiver<BusEvent>,
	},
}

impl AccessibleCache {
	/// Build a desktop-scope cache: the root entry and every connected
	/// application are seeded before this returns, ready for
	/// [`run`](Self::run).
	///
	/// # Errors
	///
	/// Fails when the bus subscription is refused or the registry is
	/// unreachable; individual applications that fail their snapshot
	/// degrade to empty subtrees instead.
	pub async fn desktop(bus: &dyn Bus, config: &CacheConfig) -> Result<Self> {
		let store = Arc::new(CacheStore::new());
		let agent = DesktopSyncAgent::initialize(store.clone(), bus, config).await?;
		Ok(Self {
			store,
			scope: Scope::Desktop(agent),
		})
	}

	/// Build a cache mirroring only the process owning `well_known`.
	///
	/// # Errors
	///
	/// Fails when `well_known` has no owner or the subscription is
	/// refused. A failed snapshot degrades to an empty initial set, like
	/// any other application.
	pub async fn application(bus: &dyn Bus, well_known: &str) -> Result<Self> {
		let store = Arc::new(CacheStore::new());
		let process = bus.resolve_owner(well_known).await?;
		let events = bus.subscribe_events(SignalFilter::from_sender(process.clone()))?;
		let agent = ApplicationSyncAgent::start(store.clone(), process, bus).await;
		Ok(Self {
			store,
			scope: Scope::Application { agent, events },
		})
	}

	/// Drive synchronization until the transport closes the subscription.
	pub async fn run(&mut self, bus: &dyn Bus) {
		match &mut self.scope {
			Scope::Desktop(agent) => agent.run(bus).await,
			Scope::Application { agent, events } => {
				while let Some(event) = events.recv().await {
					// The transport-side filter already scoped the
					// stream; a sender outside the scope is out of
					// contract and dropped here.
					if event.sender == *agent.process() {
						forward(agent, &event);
					} else {
						debug!(sender = %event.sender, "dropping signal outside application scope");
					}
				}
			}
		}
	}

	/// Look up an entry by identity, cloning it out of the store.
	#[must_use]
	pub fn get(&self, identity: &Identity) -> Option<CacheEntry> {
		self.store.get(identity)
	}

	/// Whether an entry exists at `identity`.
	#[must_use]
	pub fn exists(&self, identity: &Identity) -> bool {
		self.store.exists(identity)
	}

	/// Read surface for a run of lookups without cloning.
	#[must_use]
	pub fn reader(&self) -> StoreReader<'_> {
		self.store.read()
	}

	/// Shared handle to the underlying store.
	#[must_use]
	pub fn store(&self) -> &Arc<CacheStore> {
		&self.store
	}
}
