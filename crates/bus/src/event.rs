//! Change signals delivered over the bus.

use serde_json::Value;

use crate::address::{Identity, ObjectPath, ProcessId};

/// Kinds of object signals the synchronization engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
	/// A child was inserted into or removed from an object's child list.
	ChildrenChanged,
	/// A named property of an object changed.
	PropertyChange,
	/// A boolean state flag of an object was set or cleared.
	StateChanged,
	/// Cache maintenance: a full object record was announced.
	AddAccessible,
	/// Cache maintenance: an object went away.
	RemoveAccessible,
}

/// One signal as delivered by the transport.
///
/// The payload stays an untyped [`Value`] until the handler that consumes
/// it decodes the shape its signal kind prescribes; a payload out of
/// contract is the consumer's problem to drop, not the transport's to
/// reject.
#[derive(Debug, Clone)]
pub struct BusEvent {
	/// Which signal this is.
	pub kind: SignalKind,
	/// Signal-specific discriminator: the children-changed direction, the
	/// property kind, or the state keyword.
	pub minor: String,
	/// First numeric detail (the insertion index for children-changed,
	/// the set/clear flag for state-changed).
	pub detail1: i32,
	/// Second numeric detail. Unused by the signals consumed here.
	pub detail2: i32,
	/// Signal-specific payload.
	pub body: Value,
	/// Process that emitted the signal.
	pub sender: ProcessId,
	/// Path of the object the signal concerns, within the sender.
	pub path: ObjectPath,
}

impl BusEvent {
	/// Identity of the object this signal targets.
	#[must_use]
	pub fn target(&self) -> Identity {
		Identity::new(self.sender.clone(), self.path.clone())
	}
}

/// Direction of a children-changed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildrenOp {
	/// A child was inserted.
	Add,
	/// A child was removed.
	Remove,
}

impl ChildrenOp {
	/// Prefix-match a children-changed minor.
	///
	/// Senders append qualifiers after the direction ("add/system"); only
	/// the prefix is significant. Anything else yields `None`.
	#[must_use]
	pub fn from_minor(minor: &str) -> Option<Self> {
		if minor.starts_with("add") {
			Some(Self::Add)
		} else if minor.starts_with("remove") {
			Some(Self::Remove)
		} else {
			None
		}
	}
}

/// Sender/path constraints on an event subscription.
#[derive(Debug, Clone, Default)]
pub struct SignalFilter {
	/// Only deliver signals from this process.
	pub sender: Option<ProcessId>,
	/// Only deliver signals concerning this path.
	pub path: Option<ObjectPath>,
}

impl SignalFilter {
	/// No constraints: the whole desktop's signal traffic.
	#[must_use]
	pub fn any() -> Self {
		Self::default()
	}

	/// Only signals emitted by `sender`.
	#[must_use]
	pub fn from_sender(sender: ProcessId) -> Self {
		Self {
			sender: Some(sender),
			path: None,
		}
	}

	/// Whether `event` passes this filter.
	#[must_use]
	pub fn matches(&self, event: &BusEvent) -> bool {
		self.sender.as_ref().is_none_or(|sender| *sender == event.sender)
			&& self.path.as_ref().is_none_or(|path| *path == event.path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn children_op_matches_on_prefix() {
		assert_eq!(ChildrenOp::from_minor("add"), Some(ChildrenOp::Add));
		assert_eq!(ChildrenOp::from_minor("add/system"), Some(ChildrenOp::Add));
		assert_eq!(ChildrenOp::from_minor("remove/system"), Some(ChildrenOp::Remove));
		assert_eq!(ChildrenOp::from_minor("reorder"), None);
	}

	#[test]
	fn filter_constrains_sender_and_path() {
		let event = BusEvent {
			kind: SignalKind::StateChanged,
			minor: "focused".to_owned(),
			detail1: 1,
			detail2: 0,
			body: Value::Null,
			sender: ProcessId::from(":1.7"),
			path: ObjectPath::from("/obj/3"),
		};
		assert!(SignalFilter::any().matches(&event));
		assert!(SignalFilter::from_sender(ProcessId::from(":1.7")).matches(&event));
		assert!(!SignalFilter::from_sender(ProcessId::from(":1.8")).matches(&event));
		let scoped = SignalFilter {
			sender: None,
			path: Some(ObjectPath::from("/obj/4")),
		};
		assert!(!scoped.matches(&event));
	}
}
