use crate::config::DEFAULT_NUM_OF_NODES;
use crate::models::{JobPhase, MessageType};

/// Everything the creation page needs to render, minus the shared layout fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePage {
    pub message: Option<String>,
    pub message_type: MessageType,
    pub hide_form: bool,
    pub auto_refresh: bool,
    pub running_count: usize,
    pub num_of_nodes: String,
    pub node_prefix: String,
    pub url: String,
}

impl CreatePage {
    /// Plain form with defaults.
    pub fn blank(running_count: usize) -> Self {
        Self {
            message: None,
            message_type: MessageType::Info,
            hide_form: false,
            auto_refresh: false,
            running_count,
            num_of_nodes: DEFAULT_NUM_OF_NODES.to_string(),
            node_prefix: String::new(),
            url: String::new(),
        }
    }

    /// Hidden, auto-refreshing form while a job is running.
    pub fn in_progress(running_count: usize, prefix: &str, phase: JobPhase) -> Self {
        Self {
            message: Some(with_phase(prefix, phase)),
            message_type: MessageType::Info,
            hide_form: true,
            auto_refresh: true,
            ..Self::blank(running_count)
        }
    }

    pub fn warning(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self.message_type = MessageType::Warning;
        self
    }

    pub fn submitted(running_count: usize, phase: JobPhase) -> Self {
        Self {
            message: Some(with_phase(
                "Host creation has been submitted. Hosts should appear in the wizard in a few minutes. ",
                phase,
            )),
            message_type: MessageType::Success,
            hide_form: true,
            auto_refresh: true,
            ..Self::blank(running_count)
        }
    }
}

fn with_phase(prefix: &str, phase: JobPhase) -> String {
    format!("{}{}", prefix, phase.describe())
}
