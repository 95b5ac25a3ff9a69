use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid decision catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("Decision '{decision_id}' not found")]
    UnknownDecision { decision_id: String },

    #[error("Choice '{choice_id}' not found on decision '{decision_id}'")]
    UnknownChoice { decision_id: String, choice_id: String },

    #[error("Run already completed")]
    RunCompleted,

    #[error("Educator mode is not enabled")]
    EducatorModeRequired,

    #[error("Decision index {index} out of range (max {max})")]
    DecisionOutOfRange { index: usize, max: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
