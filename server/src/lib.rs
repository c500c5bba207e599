//! Watchtower server library
//!
//! A fragment of a monitoring web application: domain entities (host groups,
//! timeperiods) listed through a generic request-parameter component that
//! parses pagination, sort specs, and a JSON search-filter DSL.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
