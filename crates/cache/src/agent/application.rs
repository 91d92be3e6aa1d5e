//! Per-application synchronization.

use std::sync::Arc;

use aspen_bus::{Bus, BusEvent, ChildrenOp, Identity, ObjectData, ProcessId, Role, State};
use tracing::{debug, warn};

use super::decode;
use crate::entry::CacheEntry;
use crate::store::CacheStore;

/// Keeps the store current with the objects of one application process.
///
/// Seeded once from the process's bulk snapshot, then driven by the
/// change notifications the desktop agent forwards to it. Every handler
/// tolerates missing targets, dangling references, and malformed
/// payloads: one uncooperative process must not corrupt or halt the rest
/// of the cache.
pub struct ApplicationSyncAgent {
	store: Arc<CacheStore>,
	process: ProcessId,
}

impl ApplicationSyncAgent {
	/// Seed the store from `process`'s bulk snapshot and return the live
	/// agent.
	///
	/// A process that does not implement the snapshot interface, or fails
	/// the call, yields an agent over an empty initial set; the failure
	/// is logged and never propagated.
	pub async fn start(store: Arc<CacheStore>, process: ProcessId, bus: &dyn Bus) -> Self {
		let agent = Self { store, process };
		match bus.snapshot(&agent.process).await {
			Ok(objects) => {
				debug!(process = %agent.process, objects = objects.len(), "seeded from snapshot");
				agent.ingest(objects);
			}
			Err(error) => {
				warn!(process = %agent.process, error = %error, "snapshot fetch failed, starting empty");
			}
		}
		agent
	}

	/// The process this agent mirrors.
	#[must_use]
	pub fn process(&self) -> &ProcessId {
		&self.process
	}

	fn ingest(&self, objects: Vec<ObjectData>) {
		let mut store = self.store.write();
		for object in objects {
			store.insert(CacheEntry::from(object));
		}
	}

	/// Upsert one object record, replacing any stale entry at its key.
	pub(crate) fn add_object(&self, object: ObjectData) {
		self.store.write().insert(CacheEntry::from(object));
	}

	/// Remove the entry at `reference`. Absent keys are a no-op.
	pub(crate) fn remove_object(&self, reference: &Identity) {
		self.store.write().remove(reference);
	}

	/// Update exactly the field named by a property-change notification.
	///
	/// Missing targets, unrecognized property kinds, and payloads of the
	/// wrong shape are all ignored.
	pub(crate) fn on_property_change(&self, event: &BusEvent) {
		let target = event.target();
		match event.minor.as_str() {
			"accessible-name" => {
				if let Some(name) = decode::<String>(event) {
					self.update(&target, |entry| entry.name = name);
				}
			}
			"accessible-role" => {
				if let Some(role) = decode::<Role>(event) {
					self.update(&target, |entry| entry.role = role);
				}
			}
			"accessible-description" => {
				if let Some(description) = decode::<String>(event) {
					self.update(&target, |entry| entry.description = description);
				}
			}
			"accessible-parent" => {
				if let Some(parent) = decode::<Identity>(event) {
					self.update(&target, |entry| entry.parent = parent);
				}
			}
			other => debug!(kind = other, "ignoring unrecognized property kind"),
		}
	}

	fn update(&self, target: &Identity, apply: impl FnOnce(&mut CacheEntry)) {
		if let Some(entry) = self.store.write().entry_mut(target) {
			apply(entry);
		}
	}

	/// Mirror a children-changed notification into the target's child
	/// sequence.
	///
	/// Ignored when the target is missing or manages its own descendants.
	/// Removing a child also resets that child's cached `parent` to the
	/// null sentinel when it pointed at the target: a back-reference must
	/// never keep claiming a parent that no longer lists the child.
	pub(crate) fn on_children_changed(&self, event: &BusEvent) {
		let Some(op) = ChildrenOp::from_minor(&event.minor) else {
			debug!(minor = %event.minor, "ignoring children-changed with unrecognized minor");
			return;
		};
		let Some(child) = decode::<Identity>(event) else {
			return;
		};
		let target = event.target();

		let mut store = self.store.write();
		let Some(entry) = store.entry_mut(&target) else {
			return;
		};
		if entry.manages_descendants() {
			return;
		}
		match op {
			ChildrenOp::Add => {
				// A malformed index must not fault the dispatch path.
				let index = usize::try_from(event.detail1)
					.unwrap_or(0)
					.min(entry.children.len());
				entry.children.insert(index, child);
			}
			ChildrenOp::Remove => {
				if let Some(position) = entry.children.iter().position(|c| *c == child) {
					entry.children.remove(position);
				}
				if let Some(child_entry) = store.entry_mut(&child)
					&& child_entry.parent == target
				{
					child_entry.parent = Identity::null(child.process.clone());
				}
			}
		}
	}

	/// Set or clear the flag named by a state-changed notification,
	/// resolved against the fixed keyword table.
	pub(crate) fn on_state_changed(&self, event: &BusEvent) {
		let Some(state) = State::from_keyword(&event.minor) else {
			debug!(keyword = %event.minor, "ignoring unrecognized state keyword");
			return;
		};
		let target = event.target();
		self.update(&target, |entry| entry.state.set(state, event.detail1 == 1));
	}

	/// Drop every entry owned by this agent's process.
	///
	/// Called exactly once, when the process disconnects. Runs under a
	/// single write guard, so no reader or later event can observe a
	/// half-purged keyspace.
	pub(crate) fn teardown(&self) -> usize {
		let purged = self.store.write().purge_process(&self.process);
		debug!(process = %self.process, purged, "application torn down");
		purged
	}
}
