//! Reusable UI components.
//!
//! `guard` adapts route-access decisions to the router; `notice_banner`
//! renders the auth layer's single notice slot.

pub mod guard;
pub mod notice_banner;
