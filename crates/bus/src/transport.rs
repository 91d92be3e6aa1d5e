//! Boundary trait for the message-bus transport.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::Result;
use crate::address::{Identity, ProcessId};
use crate::event::{BusEvent, SignalFilter};
use crate::object::ObjectData;

/// Connection to the message bus, as seen by the synchronization engine.
///
/// Implementations own connecting and marshaling; the engine only issues
/// the three initialization-phase calls below and consumes subscribed
/// event streams. A subscription must preserve per-sender emission order;
/// no ordering is required across senders.
#[async_trait]
pub trait Bus: Send + Sync {
	/// Resolve a well-known bus name to the unique id of the process
	/// currently owning it.
	///
	/// # Errors
	///
	/// [`Error::NoSuchName`](crate::Error::NoSuchName) when nothing on the
	/// bus owns `well_known`.
	async fn resolve_owner(&self, well_known: &str) -> Result<ProcessId>;

	/// Fetch the current child list of `target`. Used once per desktop
	/// initialization, against the registry's root object.
	async fn children_of(&self, target: &Identity) -> Result<Vec<Identity>>;

	/// Fetch the bulk snapshot of every object `process` currently
	/// exposes.
	///
	/// # Errors
	///
	/// [`Error::RemoteUnavailable`](crate::Error::RemoteUnavailable) when
	/// the process does not implement the snapshot interface, cannot be
	/// reached, or fails the call. Callers are expected to degrade, not
	/// propagate.
	async fn snapshot(&self, process: &ProcessId) -> Result<Vec<ObjectData>>;

	/// Subscribe to object change signals matching `filter`.
	///
	/// Events buffer in the returned channel until consumed, so a caller
	/// may subscribe before issuing its snapshot calls and apply the
	/// buffered backlog afterwards. The subscription ends when the
	/// receiver is dropped.
	fn subscribe_events(&self, filter: SignalFilter) -> Result<mpsc::UnboundedReceiver<BusEvent>>;
}
