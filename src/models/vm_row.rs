use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize)]
pub struct VmRow {
    pub name: String,
    pub protected: bool,
}

impl VmRow {
    /// Pair every running VM with its protected flag, keeping listing order.
    pub fn from_listing(vm_ids: &[String], protected_hosts: &HashSet<String>) -> Vec<VmRow> {
        vm_ids
            .iter()
            .map(|name| VmRow {
                name: name.clone(),
                protected: protected_hosts.contains(name),
            })
            .collect()
    }
}
