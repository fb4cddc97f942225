//! Approval state machine with transition validation and audit trail.

use chrono::Utc;
use dreamtraffic_core::types::{ApprovalEvent, ApprovalStatus};
use dreamtraffic_core::{DreamTrafficError, DtResult};
use dreamtraffic_store::Repository;
use std::sync::Arc;
use tracing::info;

use ApprovalStatus::*;

/// Valid next states for each approval status. `Archived` is terminal.
pub fn valid_transitions(from: ApprovalStatus) -> &'static [ApprovalStatus] {
    match from {
        Draft => &[PendingReview],
        PendingReview => &[Approved, RevisionRequested],
        RevisionRequested => &[PendingReview],
        Approved => &[Trafficked],
        Trafficked => &[Active, Paused],
        Active => &[Paused, Archived],
        Paused => &[Active, Archived],
        Archived => &[],
    }
}

/// Drives creatives through the approval lifecycle, recording every
/// transition as an [`ApprovalEvent`].
pub struct ApprovalWorkflow {
    store: Arc<dyn Repository>,
}

impl ApprovalWorkflow {
    pub fn new(store: Arc<dyn Repository>) -> Self {
        Self { store }
    }

    pub fn status(&self, creative_id: i64) -> DtResult<ApprovalStatus> {
        Ok(self.store.creative(creative_id)?.approval_status)
    }

    /// Transition a creative to a new status, validating against the
    /// transition table and appending to the audit trail.
    pub fn transition(
        &self,
        creative_id: i64,
        to: ApprovalStatus,
        reviewer: &str,
        notes: &str,
    ) -> DtResult<ApprovalEvent> {
        let from = self.status(creative_id)?;
        let valid = valid_transitions(from);
        if !valid.contains(&to) {
            return Err(DreamTrafficError::InvalidTransition {
                from,
                to,
                valid: valid.to_vec(),
            });
        }

        self.store.set_approval_status(creative_id, to)?;
        let event = ApprovalEvent {
            creative_id,
            from_status: from,
            to_status: to,
            reviewer: reviewer.to_string(),
            notes: notes.to_string(),
            timestamp: Utc::now(),
        };
        self.store.append_approval_event(event.clone())?;

        info!(creative_id, from = %from, to = %to, reviewer, "approval transition");
        Ok(event)
    }

    pub fn submit_for_review(&self, creative_id: i64, reviewer: &str) -> DtResult<ApprovalEvent> {
        self.transition(
            creative_id,
            PendingReview,
            reviewer,
            "Submitted for compliance review",
        )
    }

    pub fn approve(&self, creative_id: i64, reviewer: &str, notes: &str) -> DtResult<ApprovalEvent> {
        let notes = if notes.is_empty() {
            "Creative approved — meets all DSP specifications"
        } else {
            notes
        };
        self.transition(creative_id, Approved, reviewer, notes)
    }

    pub fn request_revision(
        &self,
        creative_id: i64,
        reviewer: &str,
        notes: &str,
    ) -> DtResult<ApprovalEvent> {
        let notes = if notes.is_empty() { "Revision needed" } else { notes };
        self.transition(creative_id, RevisionRequested, reviewer, notes)
    }

    pub fn mark_trafficked(&self, creative_id: i64) -> DtResult<ApprovalEvent> {
        self.transition(
            creative_id,
            Trafficked,
            "trafficking_manager",
            "Creative uploaded to all target DSPs",
        )
    }

    pub fn activate(&self, creative_id: i64) -> DtResult<ApprovalEvent> {
        self.transition(
            creative_id,
            Active,
            "system",
            "DSP audits passed — creative now serving",
        )
    }

    /// Full audit trail for a creative, oldest event first.
    pub fn audit_trail(&self, creative_id: i64) -> Vec<ApprovalEvent> {
        self.store.approval_events(creative_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamtraffic_core::seed;
    use dreamtraffic_core::types::Creative;
    use dreamtraffic_store::MemoryStore;

    fn draft_workflow() -> (ApprovalWorkflow, i64) {
        let store = Arc::new(MemoryStore::new());
        let creative = Creative {
            id: 7,
            approval_status: Draft,
            ..seed::demo_creative()
        };
        store.insert_creative(creative).unwrap();
        (ApprovalWorkflow::new(store), 7)
    }

    #[test]
    fn test_initial_status_is_draft() {
        let (wf, id) = draft_workflow();
        assert_eq!(wf.status(id).unwrap(), Draft);
        assert_eq!(valid_transitions(Draft), &[PendingReview]);
    }

    #[test]
    fn test_submit_then_approve() {
        let (wf, id) = draft_workflow();
        let event = wf.submit_for_review(id, "creative_director").unwrap();
        assert_eq!(event.from_status, Draft);
        assert_eq!(event.to_status, PendingReview);

        let event = wf.approve(id, "compliance_reviewer", "Looks good").unwrap();
        assert_eq!(event.to_status, Approved);
        assert_eq!(event.notes, "Looks good");
        assert_eq!(wf.status(id).unwrap(), Approved);
    }

    #[test]
    fn test_revision_roundtrip() {
        let (wf, id) = draft_workflow();
        wf.submit_for_review(id, "creative_director").unwrap();
        let event = wf
            .request_revision(id, "compliance_reviewer", "Fix duration")
            .unwrap();
        assert_eq!(event.to_status, RevisionRequested);

        // Resubmission is allowed after revision.
        let event = wf.submit_for_review(id, "creative_director").unwrap();
        assert_eq!(event.to_status, PendingReview);
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let (wf, id) = draft_workflow();
        // Can't approve straight from draft.
        let err = wf.approve(id, "compliance_reviewer", "").unwrap_err();
        assert!(matches!(
            err,
            DreamTrafficError::InvalidTransition { from: Draft, to: Approved, .. }
        ));
    }

    #[test]
    fn test_archived_is_terminal() {
        assert!(valid_transitions(Archived).is_empty());
    }

    #[test]
    fn test_full_lifecycle_and_audit_trail() {
        let (wf, id) = draft_workflow();
        wf.submit_for_review(id, "creative_director").unwrap();
        wf.approve(id, "compliance_reviewer", "").unwrap();
        wf.mark_trafficked(id).unwrap();
        wf.activate(id).unwrap();
        assert_eq!(wf.status(id).unwrap(), Active);

        let trail = wf.audit_trail(id);
        assert_eq!(trail.len(), 4);
        let statuses: Vec<ApprovalStatus> = trail.iter().map(|e| e.to_status).collect();
        assert_eq!(statuses, vec![PendingReview, Approved, Trafficked, Active]);
    }

    #[test]
    fn test_missing_creative_errors() {
        let store = Arc::new(MemoryStore::new());
        let wf = ApprovalWorkflow::new(store);
        assert!(matches!(
            wf.status(42),
            Err(DreamTrafficError::CreativeNotFound(42))
        ));
    }
}
