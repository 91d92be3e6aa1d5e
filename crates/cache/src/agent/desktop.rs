//! Desktop-wide synchronization and signal fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use aspen_bus::{
	Bus, BusEvent, ChildrenOp, Identity, InterfaceSet, ObjectPath, ProcessId, Result, Role,
	SignalFilter, SignalKind, StateSet,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::application::ApplicationSyncAgent;
use super::{decode, forward};
use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::store::CacheStore;

/// Owns the synthetic desktop root entry and one [`ApplicationSyncAgent`]
/// per connected application process.
///
/// The desktop agent is the single dispatch path: it receives every
/// bus-wide object signal, reacts to applications connecting and
/// disconnecting, and fans everything else out to the agent owning the
/// signal's sender. One notification is fully applied before the next is
/// considered.
pub struct DesktopSyncAgent {
	store: Arc<CacheStore>,
	/// Unique id of the registry daemon, resolved at initialization.
	registry: ProcessId,
	/// Identity of the synthesized desktop root entry.
	root: Identity,
	agents: HashMap<ProcessId, ApplicationSyncAgent>,
	events: mpsc::UnboundedReceiver<BusEvent>,
}

impl DesktopSyncAgent {
	/// Initialization phase: subscribe, resolve the registry, seed the
	/// desktop root, and snapshot every already-connected application.
	///
	/// Subscribing before any fetch preserves the startup ordering
	/// guarantee: signals emitted while seeding buffer in the channel and
	/// are applied only after the snapshots they race are fully ingested.
	///
	/// # Errors
	///
	/// Fails only when the bus itself is unusable: the subscription was
	/// refused or the registry is unreachable. A failure snapshotting an
	/// individual application degrades that application to an empty
	/// subtree instead.
	pub async fn initialize(
		store: Arc<CacheStore>,
		bus: &dyn Bus,
		config: &CacheConfig,
	) -> Result<Self> {
		let events = bus.subscribe_events(SignalFilter::any())?;
		let registry = bus.resolve_owner(&config.registry_name).await?;
		let root = Identity::new(registry.clone(), ObjectPath::new(config.root_path.as_str()));
		let applications = bus.children_of(&root).await?;

		store
			.write()
			.insert(desktop_entry(&root, config, applications.clone()));

		let mut agents = HashMap::new();
		for application in &applications {
			let agent =
				ApplicationSyncAgent::start(store.clone(), application.process.clone(), bus).await;
			agents.insert(application.process.clone(), agent);
		}
		info!(registry = %registry, applications = agents.len(), "desktop cache initialized");

		Ok(Self {
			store,
			registry,
			root,
			agents,
			events,
		})
	}

	/// The store this agent mirrors into.
	#[must_use]
	pub fn store(&self) -> &Arc<CacheStore> {
		&self.store
	}

	/// Identity of the desktop root entry.
	#[must_use]
	pub fn root(&self) -> &Identity {
		&self.root
	}

	/// Number of live application agents.
	#[must_use]
	pub fn application_count(&self) -> usize {
		self.agents.len()
	}

	/// Steady-state phase: apply buffered and live events, one at a time,
	/// until the transport closes the subscription.
	pub async fn run(&mut self, bus: &dyn Bus) {
		while let Some(event) = self.events.recv().await {
			self.dispatch(bus, event).await;
		}
		debug!("event stream closed, desktop dispatch stopping");
	}

	/// Apply one signal.
	///
	/// Root-scoped children changes from the registry connect or
	/// disconnect applications; every signal is then forwarded to the
	/// live agent matching its sender. Signals from unknown senders are
	/// dropped: ordering races around connect and disconnect make them
	/// expected, not errors.
	pub async fn dispatch(&mut self, bus: &dyn Bus, event: BusEvent) {
		if event.kind == SignalKind::ChildrenChanged
			&& event.sender == self.registry
			&& event.path == self.root.path
		{
			self.on_root_children_changed(bus, &event).await;
		}

		match self.agents.get(&event.sender) {
			Some(agent) => forward(agent, &event),
			None => {
				debug!(sender = %event.sender, signal = ?event.kind, "dropping signal from unknown sender");
			}
		}
	}

	async fn on_root_children_changed(&mut self, bus: &dyn Bus, event: &BusEvent) {
		let Some(op) = ChildrenOp::from_minor(&event.minor) else {
			return;
		};
		let Some(application) = decode::<Identity>(event) else {
			return;
		};
		match op {
			ChildrenOp::Add => self.connect_application(bus, application).await,
			ChildrenOp::Remove => self.disconnect_application(&application),
		}
	}

	async fn connect_application(&mut self, bus: &dyn Bus, application: Identity) {
		info!(process = %application.process, "application connected");
		let agent =
			ApplicationSyncAgent::start(self.store.clone(), application.process.clone(), bus).await;
		// A re-announcement replaces the old agent after a fresh snapshot.
		self.agents.insert(application.process.clone(), agent);

		let mut store = self.store.write();
		if let Some(desktop) = store.entry_mut(&self.root)
			&& !desktop.children.contains(&application)
		{
			desktop.children.push(application);
		}
	}

	fn disconnect_application(&mut self, application: &Identity) {
		let Some(agent) = self.agents.remove(&application.process) else {
			debug!(process = %application.process, "disconnect for untracked application");
			return;
		};
		info!(process = %application.process, "application disconnected");
		agent.teardown();

		let mut store = self.store.write();
		if let Some(desktop) = store.entry_mut(&self.root)
			&& let Some(position) = desktop.children.iter().position(|child| child == application)
		{
			desktop.children.remove(position);
		}
	}
}

/// Synthesize the cache record for the desktop root.
fn desktop_entry(root: &Identity, config: &CacheConfig, applications: Vec<Identity>) -> CacheEntry {
	CacheEntry {
		reference: root.clone(),
		application: Identity::null(root.process.clone()),
		parent: Identity::null(root.process.clone()),
		children: applications,
		interfaces: InterfaceSet::ACCESSIBLE | InterfaceSet::COMPONENT,
		role: Role::DESKTOP_FRAME,
		name: config.desktop_name.clone(),
		description: String::new(),
		state: StateSet::EMPTY,
		extra: None,
	}
}
