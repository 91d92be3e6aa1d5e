//! Wire-level description of one accessible object.

use serde::{Deserialize, Serialize};

use crate::address::Identity;
use crate::role::Role;
use crate::state::STATE_WORDS;

/// One object's record, as returned by the bulk snapshot call and carried
/// by cache-maintenance signals.
///
/// Field order matches the wire tuple. The `application`, `parent`, and
/// `children` references are relations only: nothing guarantees the named
/// objects are (still, or yet) known to the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectData {
	/// The object's own identity.
	pub reference: Identity,
	/// Root object of the owning process.
	pub application: Identity,
	/// Current parent, or the null-path sentinel.
	pub parent: Identity,
	/// Ordered child identities.
	pub children: Vec<Identity>,
	/// Fully qualified names of the interfaces the object implements.
	pub interfaces: Vec<String>,
	/// Human-readable name.
	pub name: String,
	/// Role tag.
	pub role: Role,
	/// Human-readable description.
	pub description: String,
	/// Packed state flag words.
	pub state: [u32; STATE_WORDS],
}
