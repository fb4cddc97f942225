use crate::types::ApprovalStatus;
use thiserror::Error;

pub type DtResult<T> = Result<T, DreamTrafficError>;

#[derive(Error, Debug)]
pub enum DreamTrafficError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input validation error: {0}")]
    Validation(String),

    #[error("Creative {0} not found")]
    CreativeNotFound(i64),

    #[error("Campaign {0} not found")]
    CampaignNotFound(i64),

    #[error("Unknown measurement vendor: {0}")]
    UnknownVendor(String),

    #[error("Unknown SSP: {0}")]
    UnknownSsp(String),

    #[error("Unknown DSP: {0}")]
    UnknownDsp(String),

    #[error("Invalid transition: {from:?} -> {to:?} (valid: {valid:?})")]
    InvalidTransition {
        from: ApprovalStatus,
        to: ApprovalStatus,
        valid: Vec<ApprovalStatus>,
    },

    #[error("Creative upload rejected by {dsp}: {reason}")]
    UploadRejected { dsp: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
