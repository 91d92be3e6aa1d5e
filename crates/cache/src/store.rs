//! Identity-keyed storage for cache entries.

use std::collections::HashMap;

use aspen_bus::{Identity, ProcessId};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::entry::CacheEntry;

/// The single source of truth: a keyed mapping from object identity to its
/// cached record.
///
/// The store has no behavior beyond storage and identity-keyed lookup.
/// All mutation flows through the crate-private [`write`](Self::write)
/// surface, which the sync agents take once per notification; consumers
/// read concurrently through [`read`](Self::read) or the cloning
/// [`get`](Self::get). Shared between agents and consumers via `Arc`.
#[derive(Debug, Default)]
pub struct CacheStore {
	entries: RwLock<HashMap<Identity, CacheEntry>>,
}

impl CacheStore {
	/// An empty store.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up an entry, cloning it out of the store.
	///
	/// Dangling weak references resolve here as `None`; that is a normal
	/// state, never an error.
	#[must_use]
	pub fn get(&self, identity: &Identity) -> Option<CacheEntry> {
		self.entries.read().get(identity).cloned()
	}

	/// Whether an entry exists at `identity`.
	#[must_use]
	pub fn exists(&self, identity: &Identity) -> bool {
		self.entries.read().contains_key(identity)
	}

	/// Number of live entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	/// Whether the store holds no entries.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// Take the read surface, for a run of lookups without cloning.
	#[must_use]
	pub fn read(&self) -> StoreReader<'_> {
		StoreReader(self.entries.read())
	}

	/// Take the write surface. One guard spans one whole mutation, so
	/// multi-entry updates stay atomic with respect to readers.
	pub(crate) fn write(&self) -> StoreWriter<'_> {
		StoreWriter(self.entries.write())
	}
}

/// Read-only view over the store.
pub struct StoreReader<'a>(RwLockReadGuard<'a, HashMap<Identity, CacheEntry>>);

impl StoreReader<'_> {
	/// Look up an entry by identity.
	#[must_use]
	pub fn get(&self, identity: &Identity) -> Option<&CacheEntry> {
		self.0.get(identity)
	}

	/// Whether an entry exists at `identity`.
	#[must_use]
	pub fn exists(&self, identity: &Identity) -> bool {
		self.0.contains_key(identity)
	}

	/// Number of live entries.
	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the store holds no entries.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Every identity keyed by `process`.
	#[must_use]
	pub fn keys_owned_by(&self, process: &ProcessId) -> Vec<Identity> {
		self.0
			.keys()
			.filter(|identity| identity.process == *process)
			.cloned()
			.collect()
	}
}

pub(crate) struct StoreWriter<'a>(RwLockWriteGuard<'a, HashMap<Identity, CacheEntry>>);

impl StoreWriter<'_> {
	/// Insert or replace, keyed by the entry's own reference.
	pub(crate) fn insert(&mut self, entry: CacheEntry) {
		self.0.insert(entry.reference.clone(), entry);
	}

	/// Remove the entry at `identity`. Absent keys are a no-op.
	pub(crate) fn remove(&mut self, identity: &Identity) {
		self.0.remove(identity);
	}

	pub(crate) fn entry_mut(&mut self, identity: &Identity) -> Option<&mut CacheEntry> {
		self.0.get_mut(identity)
	}

	/// Drop every entry keyed by `process`, returning how many went.
	pub(crate) fn purge_process(&mut self, process: &ProcessId) -> usize {
		let before = self.0.len();
		self.0.retain(|identity, _| identity.process != *process);
		before - self.0.len()
	}
}

#[cfg(test)]
mod tests {
	use aspen_bus::ObjectPath;

	use super::*;
	use crate::entry::CacheEntry;

	fn entry(process: &str, path: &str) -> CacheEntry {
		CacheEntry::placeholder(Identity::new(ProcessId::from(process), ObjectPath::from(path)))
	}

	#[test]
	fn insert_is_keyed_by_reference() {
		let store = CacheStore::new();
		let first = entry(":1.2", "/obj/1");
		let key = first.reference.clone();
		store.write().insert(first);
		assert!(store.exists(&key));

		let mut replacement = entry(":1.2", "/obj/1");
		replacement.name = "renamed".to_owned();
		store.write().insert(replacement);
		assert_eq!(store.len(), 1);
		assert_eq!(store.get(&key).unwrap().name, "renamed");
	}

	#[test]
	fn remove_of_absent_key_is_a_no_op() {
		let store = CacheStore::new();
		store.write().insert(entry(":1.2", "/obj/1"));
		let absent = Identity::new(ProcessId::from(":1.2"), ObjectPath::from("/obj/404"));
		store.write().remove(&absent);
		store.write().remove(&absent);
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn purge_takes_exactly_one_process() {
		let store = CacheStore::new();
		store.write().insert(entry(":1.2", "/obj/1"));
		store.write().insert(entry(":1.2", "/obj/2"));
		store.write().insert(entry(":1.3", "/obj/1"));

		let purged = store.write().purge_process(&ProcessId::from(":1.2"));
		assert_eq!(purged, 2);
		assert_eq!(store.len(), 1);
		assert!(store.read().keys_owned_by(&ProcessId::from(":1.2")).is_empty());
		assert_eq!(store.read().keys_owned_by(&ProcessId::from(":1.3")).len(), 1);
	}
}
