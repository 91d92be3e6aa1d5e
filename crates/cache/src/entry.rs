//! Cache records for accessible objects.

use aspen_bus::{Identity, InterfaceSet, ObjectData, Role, State, StateSet};
use serde_json::Value;

/// The locally mirrored record of one remote accessible object.
///
/// Entries are owned exclusively by the [`CacheStore`](crate::CacheStore)
/// and looked up by [`Identity`]. The `application`, `parent`, and
/// `children` fields are weak references: they name identities without
/// guaranteeing a corresponding entry exists, and lookups through them
/// resolve dangles as not-found.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
	/// This entry's own identity. Immutable after creation.
	pub reference: Identity,
	/// Root object of the owning process (weak).
	pub application: Identity,
	/// Current parent, or the null-path sentinel for "no parent" (weak).
	pub parent: Identity,
	/// Ordered child identities (weak). Order matches presentation order
	/// unless the object manages its own descendants.
	pub children: Vec<Identity>,
	/// Capability interfaces the remote object implements.
	pub interfaces: InterfaceSet,
	/// Role tag.
	pub role: Role,
	/// Human-readable name.
	pub name: String,
	/// Human-readable description.
	pub description: String,
	/// Packed boolean state flags.
	pub state: StateSet,
	/// Opaque attachment for consumers. Never interpreted, or touched by
	/// notifications, on this side of the bus.
	pub extra: Option<Value>,
}

impl CacheEntry {
	/// Whether the remote object asserts control over its own child list,
	/// freezing the cached `children` sequence.
	#[must_use]
	pub fn manages_descendants(&self) -> bool {
		self.state.contains(State::ManagesDescendants)
	}
}

impl From<ObjectData> for CacheEntry {
	fn from(data: ObjectData) -> Self {
		Self {
			reference: data.reference,
			application: data.application,
			parent: data.parent,
			children: data.children,
			interfaces: InterfaceSet::from_names(&data.interfaces),
			role: data.role,
			name: data.name,
			description: data.description,
			state: StateSet::from_words(data.state),
			extra: None,
		}
	}
}

#[cfg(test)]
impl CacheEntry {
	/// A minimal entry for store-level tests.
	pub(crate) fn placeholder(reference: Identity) -> Self {
		Self {
			application: Identity::null(reference.process.clone()),
			parent: Identity::null(reference.process.clone()),
			children: Vec::new(),
			interfaces: InterfaceSet::ACCESSIBLE,
			role: Role::INVALID,
			name: String::new(),
			description: String::new(),
			state: StateSet::EMPTY,
			extra: None,
			reference,
		}
	}
}
