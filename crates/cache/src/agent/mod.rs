//! Synchronization agents: one desktop-wide, one per application process.
//!
//! All cache mutation flows through this module, one way: bus events in,
//! store mutations out. Nothing here ever pushes back into the bus as a
//! result of a cache mutation.

mod application;
mod desktop;

use aspen_bus::{BusEvent, Identity, ObjectData, SignalKind};
use serde::de::DeserializeOwned;
use tracing::warn;

pub use application::ApplicationSyncAgent;
pub use desktop::DesktopSyncAgent;

/// Decode a signal payload against the shape its signal kind prescribes.
///
/// A payload out of contract drops the event with a log line; one
/// malformed notification must never stop dispatch.
pub(crate) fn decode<T: DeserializeOwned>(event: &BusEvent) -> Option<T> {
	match serde_json::from_value(event.body.clone()) {
		Ok(value) => Some(value),
		Err(error) => {
			warn!(
				signal = ?event.kind,
				minor = %event.minor,
				sender = %event.sender,
				error = %error,
				"dropping signal with undecodable payload"
			);
			None
		}
	}
}

/// Route one signal to the matching handler of `agent`.
pub(crate) fn forward(agent: &ApplicationSyncAgent, event: &BusEvent) {
	match event.kind {
		SignalKind::ChildrenChanged => agent.on_children_changed(event),
		SignalKind::PropertyChange => agent.on_property_change(event),
		SignalKind::StateChanged => agent.on_state_changed(event),
		SignalKind::AddAccessible => {
			if let Some(object) = decode::<ObjectData>(event) {
				agent.add_object(object);
			}
		}
		SignalKind::RemoveAccessible => {
			if let Some(reference) = decode::<Identity>(event) {
				agent.remove_object(&reference);
			}
		}
	}
}
