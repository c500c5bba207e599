//! In-memory timeperiod catalog

use serde_json::Value;

use crate::domain::monitoring::Timeperiod;
use crate::domain::request_parameters::RequestParameters;

use super::query;
use crate::data::DataError;

/// Seeded timeperiod catalog standing in for the repository layer
#[derive(Debug, Clone)]
pub struct TimeperiodCatalog {
    timeperiods: Vec<Timeperiod>,
}

impl TimeperiodCatalog {
    pub fn new(timeperiods: Vec<Timeperiod>) -> Self {
        Self { timeperiods }
    }

    pub fn with_sample_data() -> Self {
        Self::new(vec![
            Timeperiod::new(1, "24x7", "Always"),
            Timeperiod::new(2, "workhours", "Work hours"),
            Timeperiod::new(3, "nonworkhours", "Non-work hours"),
            Timeperiod::new(4, "none", "Never"),
        ])
    }

    /// Filter, sort, and paginate the catalog according to `params`; the
    /// unlimited match count is written back into `params`.
    pub fn list(&self, params: &mut RequestParameters) -> Result<Vec<Value>, DataError> {
        let items = self
            .timeperiods
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(query::apply(params, items))
    }

    pub fn get(&self, id: u64) -> Option<&Timeperiod> {
        self.timeperiods.iter().find(|tp| tp.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_filters_on_alias() {
        let catalog = TimeperiodCatalog::with_sample_data();
        let mut params =
            RequestParameters::from_query(None, None, None, Some(r#"{"alias": {"$lk": "%hours"}}"#))
                .unwrap();
        let rows = catalog.list(&mut params).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["workhours", "nonworkhours"]);
    }

    #[test]
    fn list_paginates_sorted_names() {
        let catalog = TimeperiodCatalog::with_sample_data();
        let mut params =
            RequestParameters::from_query(Some(2), Some(2), Some("name"), None).unwrap();
        let rows = catalog.list(&mut params).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        // Full ASC order: 24x7, none, nonworkhours, workhours
        assert_eq!(names, vec!["nonworkhours", "workhours"]);
        assert_eq!(params.total(), 4);
    }
}
