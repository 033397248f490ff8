//! Networking: REST client wrapper, transports, and wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the only place that attaches bearer tokens or reacts to 401s.
//! `api` wraps the auth endpoints, `types` defines the wire schema, and
//! `error` the tagged failure type every call returns.

pub mod api;
pub mod error;
pub mod http;
#[cfg(test)]
pub(crate) mod test_support;
pub mod transport;
pub mod types;
