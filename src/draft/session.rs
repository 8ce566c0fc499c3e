//! Server-held draft sessions.
//!
//! Each open form is one session: a draft value plus the id of the letter
//! being edited (absent for the creation form) and the signature-upload
//! in-flight flag. Sessions live in memory only; an abandoned session is
//! simply discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::draft::state::{
    ActivityPatch, DraftError, DraftInfoPatch, LetterDraft, SignatoryPatch,
};
use crate::letter::models::Letter;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftSession {
    pub id: Uuid,
    /// Letter being edited; `None` for the creation form. Submission does a
    /// full replace when set, a create when not.
    pub letter_id: Option<Uuid>,
    pub draft: LetterDraft,
    /// Set while a signature upload is in flight; further uploads and
    /// submission are rejected until it resolves.
    pub uploading: bool,
    pub created_at: DateTime<Utc>,
}

impl DraftSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            letter_id: None,
            draft: LetterDraft::new(),
            uploading: false,
            created_at: Utc::now(),
        }
    }

    pub fn for_letter(letter: Letter) -> Self {
        Self {
            id: Uuid::new_v4(),
            letter_id: Some(letter.id),
            draft: LetterDraft::from_letter(letter),
            uploading: false,
            created_at: Utc::now(),
        }
    }
}

/// One named edit operation against a draft session.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftOp {
    UpdateInfo { patch: DraftInfoPatch },
    AddSignatory,
    UpdateSignatory { index: usize, patch: SignatoryPatch },
    RemoveSignatory { index: usize },
    MoveSignatory { from: usize, to: usize },
    ClearSignature { index: usize },
    AddActivity,
    UpdateActivity { index: usize, patch: ActivityPatch },
    RemoveActivity { index: usize },
    MoveActivity { from: usize, to: usize },
}

impl DraftOp {
    /// Apply this operation, producing the next draft value.
    pub fn apply(self, draft: LetterDraft) -> Result<LetterDraft, DraftError> {
        match self {
            DraftOp::UpdateInfo { patch } => Ok(draft.apply_info(patch)),
            DraftOp::AddSignatory => Ok(draft.add_signatory()),
            DraftOp::UpdateSignatory { index, patch } => draft.update_signatory_at(index, patch),
            DraftOp::RemoveSignatory { index } => draft.remove_signatory_at(index),
            DraftOp::MoveSignatory { from, to } => draft.move_signatory(from, to),
            DraftOp::ClearSignature { index } => draft.clear_signature_at(index),
            DraftOp::AddActivity => Ok(draft.add_activity()),
            DraftOp::UpdateActivity { index, patch } => draft.update_activity_at(index, patch),
            DraftOp::RemoveActivity { index } => draft.remove_activity_at(index),
            DraftOp::MoveActivity { from, to } => draft.move_activity(from, to),
        }
    }
}
