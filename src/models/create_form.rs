use std::collections::HashMap;

use crate::config::{DEFAULT_NODE_PREFIX, DEFAULT_NUM_OF_NODES};

/// Raw fields of the creation form, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub num_of_nodes: String,
    pub url: String,
    pub node_prefix: String,
}

impl CreateForm {
    /// Build from a decoded urlencoded body; repeated keys keep the first value.
    pub fn from_fields(fields: &HashMap<String, Vec<String>>) -> Self {
        let first = |key: &str| {
            fields
                .get(key)
                .and_then(|v| v.first())
                .cloned()
                .unwrap_or_default()
        };
        Self {
            num_of_nodes: first("numofnodes"),
            url: first("url"),
            node_prefix: first("node-prefix"),
        }
    }

    pub fn num_of_nodes_or_default(&self) -> String {
        let t = self.num_of_nodes.trim();
        if t.is_empty() {
            DEFAULT_NUM_OF_NODES.to_string()
        } else {
            t.to_string()
        }
    }

    pub fn node_prefix_trimmed(&self) -> String {
        self.node_prefix.trim().to_string()
    }

    /// Prefix handed to the creation script: no spaces, never empty.
    pub fn creation_prefix(&self) -> String {
        let compact: String = self.node_prefix.trim().replace(' ', "");
        if compact.is_empty() {
            DEFAULT_NODE_PREFIX.to_string()
        } else {
            compact
        }
    }
}
