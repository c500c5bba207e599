//! Host group DTOs for API responses

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::monitoring::{Host, HostGroup};

#[derive(Debug, Serialize, ToSchema)]
pub struct HostDto {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HostGroupDto {
    pub id: u64,
    pub name: String,
    pub hosts: Vec<HostDto>,
}

impl From<&Host> for HostDto {
    fn from(host: &Host) -> Self {
        Self {
            id: host.id,
            name: host.name.clone(),
        }
    }
}

impl From<&HostGroup> for HostGroupDto {
    fn from(group: &HostGroup) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            hosts: group.hosts.iter().map(HostDto::from).collect(),
        }
    }
}
