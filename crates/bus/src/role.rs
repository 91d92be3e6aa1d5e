//! Role tags of accessible objects.

use serde::{Deserialize, Serialize};

/// Numeric role tag reported by a remote object.
///
/// Roles are an opaque enumeration owned by the remote side; the engine
/// stores and compares them without interpreting most values. The handful
/// the engine or its tests refer to by name are exposed as constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub u32);

impl Role {
	/// No valid role reported.
	pub const INVALID: Role = Role(0);
	/// The synthetic root entry representing the whole desktop.
	pub const DESKTOP_FRAME: Role = Role(14);
	/// A top-level window frame.
	pub const FRAME: Role = Role(23);
	/// A text label.
	pub const LABEL: Role = Role(29);
	/// A push button.
	pub const PUSH_BUTTON: Role = Role(43);
}
