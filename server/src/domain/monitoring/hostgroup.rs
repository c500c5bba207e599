//! Host group entity

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A monitored host as referenced from a host group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Host {
    pub id: u64,
    pub name: String,
}

/// A named grouping of monitored hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HostGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub hosts: Vec<Host>,
}

impl HostGroup {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hosts: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: Host) -> Self {
        self.hosts.push(host);
        self
    }

    /// Whether a host with the given id belongs to this group
    pub fn has_host(&self, host_id: u64) -> bool {
        self.hosts.iter().any(|host| host.id == host_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_host_checks_membership_by_id() {
        let group = HostGroup::new(1, "web")
            .with_host(Host {
                id: 10,
                name: "srv1".to_string(),
            })
            .with_host(Host {
                id: 11,
                name: "srv2".to_string(),
            });
        assert!(group.has_host(10));
        assert!(group.has_host(11));
        assert!(!group.has_host(12));
    }

    #[test]
    fn empty_group_has_no_hosts() {
        let group = HostGroup::new(2, "empty");
        assert!(!group.has_host(0));
    }
}
