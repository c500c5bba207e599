//! Timeperiod entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named scheduling window (e.g. `24x7`, `workhours`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Timeperiod {
    pub id: u64,
    pub name: String,
    pub alias: String,
}

impl Timeperiod {
    pub fn new(id: u64, name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            alias: alias.into(),
        }
    }
}
