//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, location) and pure
//! routing decisions from page and component logic.

pub mod guard;
pub mod navigation;
pub mod storage;
