//! Monitoring domain entities
//!
//! Plain data holders the listing endpoints page over. Entity validation and
//! persistence live elsewhere; these only carry state and serialize.

mod hostgroup;
mod timeperiod;

pub use hostgroup::{Host, HostGroup};
pub use timeperiod::Timeperiod;
