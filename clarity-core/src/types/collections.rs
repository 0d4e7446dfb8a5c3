//! Hash collections used throughout the engine.
//!
//! FxHash is not DoS-resistant; all keys here are trusted config/survey
//! identifiers, never attacker-controlled network input.

pub use rustc_hash::{FxHashMap, FxHashSet};
