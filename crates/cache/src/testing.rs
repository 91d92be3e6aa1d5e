//! In-memory bus double and event builders shared by the crate's tests.

use std::collections::HashMap;
use std::sync::Arc;

use aspen_bus::{
	Bus, BusEvent, Error, Identity, ObjectData, ObjectPath, ProcessId, REGISTRY_NAME, Result,
	Role, SignalFilter, SignalKind,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

/// Scripted stand-in for a bus transport.
///
/// Applications are announced up front (or marked unavailable), events are
/// injected with [`emit`](Self::emit), and [`close`](Self::close) ends the
/// subscription so a `run` loop terminates. Subscription filters are not
/// applied here; the consumers under test are expected to tolerate
/// anything out of contract anyway.
pub(crate) struct MockBus {
	registry: ProcessId,
	names: Mutex<HashMap<String, ProcessId>>,
	root_children: Mutex<Vec<Identity>>,
	snapshots: Mutex<HashMap<ProcessId, Vec<ObjectData>>>,
	unavailable: Mutex<Vec<ProcessId>>,
	event_tx: Mutex<Option<mpsc::UnboundedSender<BusEvent>>>,
	event_rx: Mutex<Option<mpsc::UnboundedReceiver<BusEvent>>>,
}

impl MockBus {
	pub(crate) fn new() -> Arc<Self> {
		let (event_tx, event_rx) = mpsc::unbounded_channel();
		let registry = ProcessId::from(":0.1");
		let names = HashMap::from([(REGISTRY_NAME.to_owned(), registry.clone())]);
		Arc::new(Self {
			registry,
			names: Mutex::new(names),
			root_children: Mutex::new(Vec::new()),
			snapshots: Mutex::new(HashMap::new()),
			unavailable: Mutex::new(Vec::new()),
			event_tx: Mutex::new(Some(event_tx)),
			event_rx: Mutex::new(Some(event_rx)),
		})
	}

	/// Unique id of the scripted registry daemon.
	pub(crate) fn registry(&self) -> ProcessId {
		self.registry.clone()
	}

	/// Give a well-known name an owner.
	pub(crate) fn register_name(&self, name: &str, owner: &str) {
		self.names
			.lock()
			.insert(name.to_owned(), ProcessId::from(owner));
	}

	/// Script a connected application: its root joins the registry's
	/// child list and `objects` become its snapshot. Returns the
	/// application root identity.
	pub(crate) fn announce(&self, process: &str, objects: Vec<ObjectData>) -> Identity {
		let root = Identity::new(ProcessId::from(process), ObjectPath::root());
		self.root_children.lock().push(root.clone());
		self.snapshots
			.lock()
			.insert(ProcessId::from(process), objects);
		root
	}

	/// Script `objects` as the snapshot of `process` without announcing
	/// it on the registry (for connect-after-init tests).
	pub(crate) fn stage_snapshot(&self, process: &str, objects: Vec<ObjectData>) {
		self.snapshots
			.lock()
			.insert(ProcessId::from(process), objects);
	}

	/// Make `process` fail its snapshot call.
	pub(crate) fn fail_snapshot(&self, process: &str) {
		self.unavailable.lock().push(ProcessId::from(process));
	}

	/// Deliver one event to the subscription.
	pub(crate) fn emit(&self, event: BusEvent) {
		self.event_tx
			.lock()
			.as_ref()
			.expect("subscription closed")
			.send(event)
			.expect("no live subscriber");
	}

	/// End the event stream; a draining `run` loop will stop.
	pub(crate) fn close(&self) {
		self.event_tx.lock().take();
	}
}

#[async_trait]
impl Bus for MockBus {
	async fn resolve_owner(&self, well_known: &str) -> Result<ProcessId> {
		self.names
			.lock()
			.get(well_known)
			.cloned()
			.ok_or_else(|| Error::NoSuchName(well_known.to_owned()))
	}

	async fn children_of(&self, _target: &Identity) -> Result<Vec<Identity>> {
		Ok(self.root_children.lock().clone())
	}

	async fn snapshot(&self, process: &ProcessId) -> Result<Vec<ObjectData>> {
		if self.unavailable.lock().contains(process) {
			return Err(Error::RemoteUnavailable {
				process: process.clone(),
				reason: "does not implement the snapshot interface".to_owned(),
			});
		}
		Ok(self.snapshots.lock().get(process).cloned().unwrap_or_default())
	}

	fn subscribe_events(&self, _filter: SignalFilter) -> Result<mpsc::UnboundedReceiver<BusEvent>> {
		self.event_rx
			.lock()
			.take()
			.ok_or_else(|| Error::Subscription("already subscribed".to_owned()))
	}
}

/// Route engine log output through the test harness.
pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A leaf object record for `process`, parented to the application root.
pub(crate) fn object(process: &str, path: &str, name: &str, role: Role) -> ObjectData {
	let process = ProcessId::from(process);
	ObjectData {
		reference: Identity::new(process.clone(), ObjectPath::from(path)),
		application: Identity::new(process.clone(), ObjectPath::root()),
		parent: Identity::new(process, ObjectPath::root()),
		children: Vec::new(),
		interfaces: vec!["org.a11y.atspi.Accessible".to_owned()],
		name: name.to_owned(),
		role,
		description: String::new(),
		state: [0, 0],
	}
}

fn event(
	kind: SignalKind,
	target: &Identity,
	minor: &str,
	detail1: i32,
	body: Value,
) -> BusEvent {
	BusEvent {
		kind,
		minor: minor.to_owned(),
		detail1,
		detail2: 0,
		body,
		sender: target.process.clone(),
		path: target.path.clone(),
	}
}

pub(crate) fn add_accessible(object: &ObjectData) -> BusEvent {
	event(
		SignalKind::AddAccessible,
		&object.reference,
		"",
		0,
		serde_json::to_value(object).expect("object record serializes"),
	)
}

pub(crate) fn remove_accessible(reference: &Identity) -> BusEvent {
	event(
		SignalKind::RemoveAccessible,
		reference,
		"",
		0,
		serde_json::to_value(reference).expect("identity serializes"),
	)
}

pub(crate) fn children_changed(
	target: &Identity,
	minor: &str,
	index: i32,
	child: &Identity,
) -> BusEvent {
	event(
		SignalKind::ChildrenChanged,
		target,
		minor,
		index,
		serde_json::to_value(child).expect("identity serializes"),
	)
}

pub(crate) fn property_change(target: &Identity, minor: &str, body: Value) -> BusEvent {
	event(SignalKind::PropertyChange, target, minor, 0, body)
}

pub(crate) fn state_changed(target: &Identity, keyword: &str, set: bool) -> BusEvent {
	event(
		SignalKind::StateChanged,
		target,
		keyword,
		i32::from(set),
		Value::Null,
	)
}
