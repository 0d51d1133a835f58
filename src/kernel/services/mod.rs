//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the core (kernel-facing).
//! - `adapters`: OS specific implementations (config files, platform paths).

pub mod adapters;
pub mod ports;
