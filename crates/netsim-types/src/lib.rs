//! Foundation types for netsim.
//!
//! Shared by every netsim crate: the interaction mode hierarchy, device and
//! language selectors, simulator configuration, and the error families.

pub mod config;
pub mod device;
pub mod error;
pub mod mode;

pub use config::SimConfig;
pub use device::{DeviceType, Language};
pub use error::{ConfigError, Defect, NetsimError, Result, StateError, UserError};
pub use mode::Mode;
