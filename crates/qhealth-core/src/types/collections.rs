//! Hash collections used across the workspace.
//!
//! FxHash keys here are small integers and short strings, where the
//! non-cryptographic hasher is a clear win over SipHash.

pub use rustc_hash::{FxHashMap, FxHashSet};
