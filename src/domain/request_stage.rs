use std::fmt;

/// Lifecycle of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStage {
    Idle,
    Fetching,
    Decoding,
    Invoking,
    CleaningUp,
    Done,
    Failed,
}

impl RequestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStage::Idle => "IDLE",
            RequestStage::Fetching => "FETCHING",
            RequestStage::Decoding => "DECODING",
            RequestStage::Invoking => "INVOKING",
            RequestStage::CleaningUp => "CLEANING_UP",
            RequestStage::Done => "DONE",
            RequestStage::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStage::Done | RequestStage::Failed)
    }
}

impl fmt::Display for RequestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
