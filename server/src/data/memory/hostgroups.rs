//! In-memory host group catalog

use serde_json::Value;

use crate::domain::monitoring::{Host, HostGroup};
use crate::domain::request_parameters::RequestParameters;

use super::query;
use crate::data::DataError;

/// Seeded host group catalog standing in for the repository layer
#[derive(Debug, Clone)]
pub struct HostGroupCatalog {
    groups: Vec<HostGroup>,
}

impl HostGroupCatalog {
    pub fn new(groups: Vec<HostGroup>) -> Self {
        Self { groups }
    }

    pub fn with_sample_data() -> Self {
        Self::new(vec![
            HostGroup::new(53, "Linux-Servers")
                .with_host(Host {
                    id: 14,
                    name: "srv-web-01".to_string(),
                })
                .with_host(Host {
                    id: 15,
                    name: "srv-web-02".to_string(),
                }),
            HostGroup::new(54, "Databases").with_host(Host {
                id: 21,
                name: "srv-db-01".to_string(),
            }),
            HostGroup::new(55, "Printers"),
            HostGroup::new(56, "Windows-Servers").with_host(Host {
                id: 30,
                name: "srv-ad-01".to_string(),
            }),
        ])
    }

    /// Filter, sort, and paginate the catalog according to `params`; the
    /// unlimited match count is written back into `params`.
    pub fn list(&self, params: &mut RequestParameters) -> Result<Vec<Value>, DataError> {
        let items = self
            .groups
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(query::apply(params, items))
    }

    pub fn get(&self, id: u64) -> Option<&HostGroup> {
        self.groups.iter().find(|group| group.id == id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn list_with_default_parameters_returns_everything() {
        let catalog = HostGroupCatalog::with_sample_data();
        let mut params = RequestParameters::new();
        let rows = catalog.list(&mut params).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(params.total(), 4);
    }

    #[test]
    fn list_filters_by_name_pattern() {
        let catalog = HostGroupCatalog::with_sample_data();
        let mut params =
            RequestParameters::from_query(None, None, None, Some(r#"{"name": {"$lk": "%servers"}}"#))
                .unwrap();
        let rows = catalog.list(&mut params).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Linux-Servers", "Windows-Servers"]);
        assert_eq!(params.total(), 2);
    }

    #[test]
    fn list_sorts_descending_by_id() {
        let catalog = HostGroupCatalog::with_sample_data();
        let mut params =
            RequestParameters::from_query(None, None, Some(r#"{"id": "desc"}"#), None).unwrap();
        let rows = catalog.list(&mut params).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![56, 55, 54, 53]);
    }

    #[test]
    fn list_rows_keep_nested_hosts() {
        let catalog = HostGroupCatalog::with_sample_data();
        let mut params =
            RequestParameters::from_query(None, None, None, Some(r#"{"id": 54}"#)).unwrap();
        let rows = catalog.list(&mut params).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["hosts"], json!([{"id": 21, "name": "srv-db-01"}]));
    }

    #[test]
    fn get_by_id() {
        let catalog = HostGroupCatalog::with_sample_data();
        assert_eq!(catalog.get(55).map(|g| g.name.as_str()), Some("Printers"));
        assert!(catalog.get(999).is_none());
    }
}
