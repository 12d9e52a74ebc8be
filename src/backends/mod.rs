//! Input backends for `padslot`.
//!
//! Implementations of [`PhysicalInputSource`](crate::device::PhysicalInputSource).
//! Hosts normally implement the trait over their own engine input; the
//! backends here cover testing and demos.
//!
//! # Feature flags
//! - **`virtual`** (default): scriptable in-memory source.

#[cfg(feature = "virtual")]
#[cfg_attr(docsrs, doc(cfg(feature = "virtual")))]
pub mod virtual_input;
