//! Simulated device state.
//!
//! The state is a flat key/value space of JSON documents (`hostname`,
//! `interfaces`, `vlans`, ...). Action handlers never hold a private copy:
//! they read a record, change it and write it back through [`StateStore`],
//! one record per write.

mod file;
mod memory;
pub mod records;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use records::{
    DeviceState, DhcpPool, Interface, InterfaceStatus, InterfaceUpdate, Route,
    RoutingProcess, RoutingProtocol, Vlan,
};

use netsim_types::Result;
use serde_json::Value;

/// Key/value accessor for device state.
///
/// Implementations may block on I/O; callers treat every call as synchronous
/// and never retry on failure.
pub trait StateStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Make all previous writes durable. A no-op for volatile stores.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
