//! Synchronized local cache of remote accessible-object trees.
//!
//! Every running application on a desktop exposes a mutable tree of
//! accessible objects over an inter-process message bus. This crate keeps
//! one local, always-current mirror of all of them: seeded from bulk
//! snapshots, then driven by asynchronous change signals, and tolerant of
//! processes that are uncooperative, slow to announce themselves, or gone
//! mid-delivery.
//!
//! The pieces, leaves first:
//!
//! - [`CacheStore`]: the single source of truth, an identity-keyed map
//!   with a concurrent read surface and a crate-private write surface.
//! - [`CacheEntry`]: the mutable record for one accessible object.
//! - [`ApplicationSyncAgent`]: seeds and maintains one process's objects.
//! - [`DesktopSyncAgent`]: owns the synthetic desktop root, tracks
//!   processes connecting and disconnecting, and fans bus-wide signals
//!   out to the right per-application agent by sender.
//! - [`AccessibleCache`]: the caller-facing facade over either the whole
//!   desktop or a single named application.
//!
//! All mutation flows one way, bus events in and store mutations out, on a
//! single dispatch task. Consumers read concurrently through the store's
//! read surface.
//!
//! ```ignore
//! use aspen_cache::{AccessibleCache, CacheConfig};
//!
//! let mut cache = AccessibleCache::desktop(&bus, &CacheConfig::default()).await?;
//! tokio::spawn(async move { cache.run(&bus).await });
//! ```

mod agent;
mod config;
mod entry;
mod facade;
mod store;

#[cfg(test)]
pub(crate) mod testing;

/// Re-export of the protocol vocabulary this cache is built over.
pub use aspen_bus as bus;
pub use aspen_bus::{Error, Result};

pub use agent::{ApplicationSyncAgent, DesktopSyncAgent};
pub use config::CacheConfig;
pub use entry::CacheEntry;
pub use facade::AccessibleCache;
pub use store::{CacheStore, StoreReader};
