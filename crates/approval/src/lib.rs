//! Creative approval — transition-validated state machine with an audit
//! trail, plus spec compliance review.

pub mod compliance;
pub mod workflow;

pub use compliance::{review_creative, ComplianceReport};
pub use workflow::{valid_transitions, ApprovalWorkflow};
