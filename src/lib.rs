//! padslot: slot-based gamepad tracking for Rust.
//!
//! Tracks controller hot-plug across a fixed set of player slots and
//! normalizes vendor layouts (XBOX-360-like, PS4 wired, PS4 wireless) into
//! one logical button/axis vocabulary.
//!
//! The host supplies raw input through [`PhysicalInputSource`] and calls
//! [`ControllerRegistry::tick`] once per frame.
//!
//! ```no_run
//! use padslot::backends::virtual_input::VirtualInputSource;
//! use padslot::{ControllerRegistry, LogicalAxis};
//!
//! let source = VirtualInputSource::new();
//! let mut registry = ControllerRegistry::default();
//! loop {
//!     for event in registry.tick(&source) {
//!         println!("{:?} {}", event.kind, event.controller);
//!     }
//!     if let Some(p1) = registry.get_by_ordinal(1) {
//!         let x = p1.get_axis(&source, LogicalAxis::LSX);
//!         println!("P1 LSX={x:.2}");
//!     }
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod backends;
pub mod binding;
pub mod classifier;
pub mod config;
pub mod control;
pub mod controller;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod metadata;
pub mod probe;
pub mod profile;
pub mod registry;
pub mod snapshot;

pub use binding::*;
pub use classifier::{Classify, NameClassifier, RawProbe};
pub use config::RegistryConfig;
pub use control::*;
pub use controller::*;
pub use device::*;
pub use error::*;
pub use event::*;
pub use eventbus::*;
pub use metadata::ControllerInfo;
pub use profile::*;
pub use registry::*;
pub use snapshot::*;
