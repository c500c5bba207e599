//! Domain types and request-level parsing

pub mod monitoring;
pub mod request_parameters;
