//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used by the store (kernel-facing).
//! - `adapters`: OS/runtime specific implementations (IO/async).

pub mod adapters;
pub mod ports;
