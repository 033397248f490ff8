//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns authentication state and its persistence; `notice` holds
//! the one transient message the auth layer surfaces.

pub mod notice;
pub mod session;
