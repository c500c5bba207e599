//! In-memory data layer
//!
//! Stand-in for the repository layer: seeded entity catalogs queried through
//! the filter-tree interpreter in [`query`].

mod hostgroups;
pub mod query;
mod timeperiods;

pub use hostgroups::HostGroupCatalog;
pub use timeperiods::TimeperiodCatalog;
