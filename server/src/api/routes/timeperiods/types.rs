//! Timeperiod DTOs for API responses

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::monitoring::Timeperiod;

/// JSON representation of a timeperiod: exactly `{id, name, alias}`
#[derive(Debug, Serialize, ToSchema)]
pub struct TimeperiodDto {
    pub id: u64,
    pub name: String,
    pub alias: String,
}

impl From<&Timeperiod> for TimeperiodDto {
    fn from(tp: &Timeperiod) -> Self {
        Self {
            id: tp.id,
            name: tp.name.clone(),
            alias: tp.alias.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_id_name_alias() {
        let dto = TimeperiodDto::from(&Timeperiod::new(2, "workhours", "Work hours"));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 2, "name": "workhours", "alias": "Work hours"})
        );
    }
}
