//! Coordination-free, time-ordered 64-bit IDs in the Snowflake style.
//!
//! Every ID packs three fields, most significant first: milliseconds since a
//! custom epoch, the generator's node ID, and a per-millisecond sequence. IDs
//! from one [`IdGenerator`] are unique and increase with time. IDs from
//! different generators are unique as long as their node IDs differ.
//!
//! ```
//! use snowgen::{GeneratorConfig, IdGenerator, MonotonicClock};
//!
//! let generator = IdGenerator::new(786, GeneratorConfig::default(), MonotonicClock::new())?;
//!
//! let id = generator.next_id()?;
//! let parts = generator.decompose(id);
//! assert_eq!(parts.node_id, 786);
//! # Ok::<(), snowgen::Error>(())
//! ```
//!
//! ## Errors
//!
//! Construction fails with a [`ConfigError`]; generation fails with a
//! [`ClockError`], most importantly when the clock moves backward. Both
//! convert into [`Error`].
//!
//! ## Features
//!
//! - `tracing` (default): emit `tracing` spans and events.
//! - `serde`: serde support for [`GeneratorConfig`] plus the
//!   [`serde`](crate::serde) adapters for IDs.
//! - `cache-padded`: pad the generator lock to a cache line.
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod config;
mod error;
mod generator;
mod id;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
