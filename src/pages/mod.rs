//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control lives in the
//! `components::guard` wrappers applied in `app`, not in the pages.

pub mod home;
pub mod login;
pub mod register;
