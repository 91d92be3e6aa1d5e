//! Names of remote processes and the objects they expose.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known bus name of the accessibility registry daemon.
pub const REGISTRY_NAME: &str = "org.a11y.atspi.Registry";
/// Object path of the desktop root exposed by the registry.
pub const ROOT_PATH: &str = "/org/a11y/atspi/accessible/root";
/// Sentinel path meaning "no object".
pub const NULL_PATH: &str = "/org/a11y/atspi/null";
/// Object path at which a process exposes its bulk snapshot interface.
pub const CACHE_PATH: &str = "/org/a11y/atspi/cache";
/// Signal interface carrying object change events.
pub const EVENT_OBJECT_INTERFACE: &str = "org.a11y.atspi.Event.Object";
/// RPC interface exposing the bulk snapshot of a process's objects.
pub const CACHE_INTERFACE: &str = "org.a11y.atspi.Cache";

/// Unique connection name of one process on the bus.
///
/// Assigned by the bus daemon for the lifetime of the connection and never
/// reused while the connection lives, so it doubles as the owning-process
/// half of every object identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
	/// Wrap a connection name.
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	/// The raw connection name.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for ProcessId {
	fn from(name: &str) -> Self {
		Self(name.to_owned())
	}
}

impl fmt::Display for ProcessId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Path of one object within its owning process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectPath(String);

impl ObjectPath {
	/// Wrap an object path.
	#[must_use]
	pub fn new(path: impl Into<String>) -> Self {
		Self(path.into())
	}

	/// The shared root path every process exposes its tree under.
	#[must_use]
	pub fn root() -> Self {
		Self(ROOT_PATH.to_owned())
	}

	/// The sentinel path meaning "no object".
	#[must_use]
	pub fn null() -> Self {
		Self(NULL_PATH.to_owned())
	}

	/// Whether this is the null sentinel.
	#[must_use]
	pub fn is_null(&self) -> bool {
		self.0 == NULL_PATH
	}

	/// The raw path.
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for ObjectPath {
	fn from(path: &str) -> Self {
		Self(path.to_owned())
	}
}

impl fmt::Display for ObjectPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Globally unique name of one live accessible object: the owning process
/// plus the object's path inside it.
///
/// Stable for the object's lifetime and never reused concurrently with a
/// live object sharing it. Serialized as a 2-tuple, matching the wire
/// layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(ProcessId, ObjectPath)", into = "(ProcessId, ObjectPath)")]
pub struct Identity {
	/// Owning process.
	pub process: ProcessId,
	/// Path within the owning process.
	pub path: ObjectPath,
}

impl Identity {
	/// Name the object at `path` inside `process`.
	#[must_use]
	pub fn new(process: ProcessId, path: ObjectPath) -> Self {
		Self { process, path }
	}

	/// The null-path sentinel scoped to `process`, meaning "no object".
	#[must_use]
	pub fn null(process: ProcessId) -> Self {
		Self {
			process,
			path: ObjectPath::null(),
		}
	}

	/// Whether this is a null sentinel rather than a real object name.
	#[must_use]
	pub fn is_null(&self) -> bool {
		self.path.is_null()
	}
}

impl From<(ProcessId, ObjectPath)> for Identity {
	fn from((process, path): (ProcessId, ObjectPath)) -> Self {
		Self { process, path }
	}
}

impl From<Identity> for (ProcessId, ObjectPath) {
	fn from(identity: Identity) -> Self {
		(identity.process, identity.path)
	}
}

impl fmt::Display for Identity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.process, self.path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_serializes_as_tuple() {
		let identity = Identity::new(ProcessId::from(":1.42"), ObjectPath::from("/obj/7"));
		let value = serde_json::to_value(&identity).unwrap();
		assert_eq!(value, serde_json::json!([":1.42", "/obj/7"]));

		let back: Identity = serde_json::from_value(value).unwrap();
		assert_eq!(back, identity);
	}

	#[test]
	fn null_sentinel_is_detected() {
		let null = Identity::null(ProcessId::from(":1.42"));
		assert!(null.is_null());
		assert!(!Identity::new(ProcessId::from(":1.42"), ObjectPath::root()).is_null());
	}
}
