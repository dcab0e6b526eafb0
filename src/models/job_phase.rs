use serde::Serialize;
use std::fmt;

/// What the host is doing right now, as far as the probe can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobPhase {
    Idle,
    Downloading,
    Creating,
}

impl JobPhase {
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Sentence shown to the operator; empty when idle.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Downloading => "An image is being downloaded.",
            Self::Creating => "The VM(s) are being created.",
        }
    }

    /// Parse the keyword written to a job status file.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "idle" | "done" => Some(Self::Idle),
            "downloading" => Some(Self::Downloading),
            "creating" => Some(Self::Creating),
            _ => None,
        }
    }
}

impl fmt::Display for JobPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Downloading => "downloading",
            Self::Creating => "creating",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_phases() {
        assert_eq!(JobPhase::from_keyword("downloading\n"), Some(JobPhase::Downloading));
        assert_eq!(JobPhase::from_keyword("CREATING"), Some(JobPhase::Creating));
        assert_eq!(JobPhase::from_keyword(""), Some(JobPhase::Idle));
        assert_eq!(JobPhase::from_keyword("exploding"), None);
    }

    #[test]
    fn idle_has_no_description() {
        assert!(JobPhase::Idle.describe().is_empty());
        assert!(!JobPhase::Idle.is_busy());
        assert!(JobPhase::Creating.is_busy());
    }
}
