//! Protocol vocabulary and transport boundary for the accessibility bus.
//!
//! Every running application process exposes a mutable tree of accessible
//! objects over an inter-process message bus. This crate defines the
//! vocabulary shared between that wire protocol and the local cache that
//! mirrors it:
//!
//! - [`Identity`], [`ProcessId`], [`ObjectPath`]: how live objects are
//!   named across process boundaries.
//! - [`ObjectData`]: the wire record describing one object, as returned by
//!   the bulk snapshot call and carried by cache-maintenance signals.
//! - [`Role`], [`StateSet`], [`InterfaceSet`]: the opaque enumerations
//!   remote objects report for their role, boolean state flags, and
//!   capability interfaces.
//! - [`BusEvent`] and [`SignalKind`]: change signals as delivered by a
//!   subscription.
//! - [`Bus`]: the trait a concrete transport implements. The engine only
//!   ever issues three initialization-phase calls and consumes the
//!   subscribed event stream; marshaling is entirely the transport's
//!   concern.
#![warn(missing_docs)]

mod address;
mod event;
mod interface;
mod object;
mod role;
mod state;
mod transport;

pub use address::{
	CACHE_INTERFACE, CACHE_PATH, EVENT_OBJECT_INTERFACE, Identity, NULL_PATH, ObjectPath,
	ProcessId, REGISTRY_NAME, ROOT_PATH,
};
pub use event::{BusEvent, ChildrenOp, SignalFilter, SignalKind};
pub use interface::InterfaceSet;
pub use object::ObjectData;
pub use role::Role;
pub use state::{STATE_WORDS, State, StateSet};
pub use transport::Bus;

/// A convenient type alias for `Result` with `E` = [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible errors at the transport boundary.
///
/// Nothing in the steady-state synchronization path surfaces these;
/// they are raised by initialization-phase calls and by transport
/// implementations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// A remote process cannot service a call: it is unreachable, gone, or
	/// does not implement the requested interface.
	#[error("remote process {process} unavailable: {reason}")]
	RemoteUnavailable {
		/// The process that failed to respond.
		process: ProcessId,
		/// Transport-reported reason.
		reason: String,
	},
	/// A well-known name has no current owner on the bus.
	#[error("no owner for well-known name {0:?}")]
	NoSuchName(String),
	/// A signal payload or call result did not decode.
	#[error("deserialization failed: {0}")]
	Deserialize(#[from] serde_json::Error),
	/// The transport refused an event subscription.
	#[error("event subscription failed: {0}")]
	Subscription(String),
	/// The peer violated the bus protocol.
	#[error("protocol error: {0}")]
	Protocol(String),
}
