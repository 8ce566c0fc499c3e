//! Editable letter draft.
//!
//! The draft is an immutable value: every named operation consumes the
//! current draft and returns the next one, so renumbering and row removal
//! are pure and directly testable. Field values are kept as raw form input
//! (`attachments_count` is a string until submission) and only coerced when
//! the payload is built.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::letter::models::{Activity, Letter, LetterPayload, LetterType, Signatory};
use crate::letter::validation::{
    validate_required, validate_signatories, ValidationError, ValidationErrors,
};

/// Errors from draft operations that reference rows by index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Penandatangan ke-{0} tidak ditemukan")]
    SignatoryOutOfRange(usize),
    #[error("Kegiatan ke-{0} tidak ditemukan")]
    ActivityOutOfRange(usize),
    #[error("Minimal satu baris penandatangan harus ada")]
    LastSignatory,
    #[error("Minimal satu baris kegiatan harus ada")]
    LastActivity,
    #[error("Perusahaan belum dipilih")]
    MissingCompany,
}

/// Partial update of the letter's scalar fields.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct DraftInfoPatch {
    pub letter_number: Option<String>,
    pub company_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub subject: Option<String>,
    #[schema(value_type = Option<String>, example = "general")]
    pub letter_type: Option<LetterType>,
    pub recipient_name: Option<String>,
    pub recipient_position: Option<String>,
    pub recipient_address: Option<String>,
    pub content: Option<String>,
    pub attachments_count: Option<String>,
    pub cc_list: Option<String>,
}

/// Partial update of one signatory row.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct SignatoryPatch {
    pub name: Option<String>,
    pub position: Option<String>,
}

/// Partial update of one activity row.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct ActivityPatch {
    pub kegiatan: Option<String>,
    pub jumlah: Option<String>,
    pub satuan: Option<String>,
    pub hasil: Option<String>,
    pub keterangan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LetterDraft {
    pub letter_number: String,
    pub company_id: Option<Uuid>,
    pub date: NaiveDate,
    pub subject: String,
    #[schema(value_type = String, example = "general")]
    pub letter_type: LetterType,
    pub recipient_name: String,
    pub recipient_position: String,
    pub recipient_address: String,
    pub content: String,
    /// Raw form input; coerced to a non-negative integer on submission.
    pub attachments_count: String,
    pub cc_list: String,
    pub signatories: Vec<Signatory>,
    pub activities: Vec<Activity>,
}

/// Renumber activities to the contiguous sequence 1..N, preserving order.
pub fn renumber_activities(mut activities: Vec<Activity>) -> Vec<Activity> {
    for (idx, activity) in activities.iter_mut().enumerate() {
        activity.no = (idx + 1) as u32;
    }
    activities
}

impl LetterDraft {
    /// Blank creation form: today's date, one empty signatory row and one
    /// empty activity row, like the form starts out.
    pub fn new() -> Self {
        Self {
            letter_number: String::new(),
            company_id: None,
            date: chrono::Local::now().date_naive(),
            subject: String::new(),
            letter_type: LetterType::General,
            recipient_name: String::new(),
            recipient_position: String::new(),
            recipient_address: String::new(),
            content: String::new(),
            attachments_count: "0".to_string(),
            cc_list: String::new(),
            signatories: vec![Signatory::blank()],
            activities: vec![Activity::blank(1)],
        }
    }

    /// Edit form seeded from a stored letter. Empty stored lists still get
    /// one blank row so the form always has something to edit.
    pub fn from_letter(letter: Letter) -> Self {
        let signatories = if letter.signatories.is_empty() {
            vec![Signatory::blank()]
        } else {
            letter.signatories
        };
        let activities = if letter.activities.is_empty() {
            vec![Activity::blank(1)]
        } else {
            letter.activities
        };

        Self {
            letter_number: letter.letter_number,
            company_id: Some(letter.company_id),
            date: letter.date,
            subject: letter.subject,
            letter_type: letter.letter_type,
            recipient_name: letter.recipient_name,
            recipient_position: letter.recipient_position.unwrap_or_default(),
            recipient_address: letter.recipient_address.unwrap_or_default(),
            content: letter.content,
            attachments_count: letter.attachments_count.to_string(),
            cc_list: letter.cc_list,
            signatories,
            activities,
        }
    }

    pub fn apply_info(mut self, patch: DraftInfoPatch) -> Self {
        if let Some(value) = patch.letter_number {
            self.letter_number = value;
        }
        if let Some(value) = patch.company_id {
            self.company_id = Some(value);
        }
        if let Some(value) = patch.date {
            self.date = value;
        }
        if let Some(value) = patch.subject {
            self.subject = value;
        }
        if let Some(value) = patch.letter_type {
            self.letter_type = value;
        }
        if let Some(value) = patch.recipient_name {
            self.recipient_name = value;
        }
        if let Some(value) = patch.recipient_position {
            self.recipient_position = value;
        }
        if let Some(value) = patch.recipient_address {
            self.recipient_address = value;
        }
        if let Some(value) = patch.content {
            self.content = value;
        }
        if let Some(value) = patch.attachments_count {
            self.attachments_count = value;
        }
        if let Some(value) = patch.cc_list {
            self.cc_list = value;
        }
        self
    }

    pub fn add_signatory(mut self) -> Self {
        self.signatories.push(Signatory::blank());
        self
    }

    pub fn update_signatory_at(
        mut self,
        index: usize,
        patch: SignatoryPatch,
    ) -> Result<Self, DraftError> {
        let signatory = self
            .signatories
            .get_mut(index)
            .ok_or(DraftError::SignatoryOutOfRange(index))?;
        if let Some(name) = patch.name {
            signatory.name = name;
        }
        if let Some(position) = patch.position {
            signatory.position = position;
        }
        Ok(self)
    }

    /// Remove one signatory row. The form never drops its last row.
    pub fn remove_signatory_at(mut self, index: usize) -> Result<Self, DraftError> {
        if index >= self.signatories.len() {
            return Err(DraftError::SignatoryOutOfRange(index));
        }
        if self.signatories.len() == 1 {
            return Err(DraftError::LastSignatory);
        }
        self.signatories.remove(index);
        Ok(self)
    }

    /// Move a signatory row to another position; display order is the
    /// left-to-right order of the signature block.
    pub fn move_signatory(mut self, from: usize, to: usize) -> Result<Self, DraftError> {
        if from >= self.signatories.len() {
            return Err(DraftError::SignatoryOutOfRange(from));
        }
        if to >= self.signatories.len() {
            return Err(DraftError::SignatoryOutOfRange(to));
        }
        let signatory = self.signatories.remove(from);
        self.signatories.insert(to, signatory);
        Ok(self)
    }

    pub fn set_signature_at(mut self, index: usize, reference: String) -> Result<Self, DraftError> {
        let signatory = self
            .signatories
            .get_mut(index)
            .ok_or(DraftError::SignatoryOutOfRange(index))?;
        signatory.signature_image = Some(reference);
        Ok(self)
    }

    pub fn clear_signature_at(mut self, index: usize) -> Result<Self, DraftError> {
        let signatory = self
            .signatories
            .get_mut(index)
            .ok_or(DraftError::SignatoryOutOfRange(index))?;
        signatory.signature_image = None;
        Ok(self)
    }

    pub fn add_activity(mut self) -> Self {
        let no = (self.activities.len() + 1) as u32;
        self.activities.push(Activity::blank(no));
        self
    }

    pub fn update_activity_at(
        mut self,
        index: usize,
        patch: ActivityPatch,
    ) -> Result<Self, DraftError> {
        let activity = self
            .activities
            .get_mut(index)
            .ok_or(DraftError::ActivityOutOfRange(index))?;
        if let Some(kegiatan) = patch.kegiatan {
            activity.kegiatan = kegiatan;
        }
        if let Some(jumlah) = patch.jumlah {
            activity.jumlah = jumlah;
        }
        if let Some(satuan) = patch.satuan {
            activity.satuan = satuan;
        }
        if let Some(hasil) = patch.hasil {
            activity.hasil = hasil;
        }
        if let Some(keterangan) = patch.keterangan {
            activity.keterangan = keterangan;
        }
        Ok(self)
    }

    /// Remove one activity row and renumber the rest to 1..N.
    pub fn remove_activity_at(mut self, index: usize) -> Result<Self, DraftError> {
        if index >= self.activities.len() {
            return Err(DraftError::ActivityOutOfRange(index));
        }
        if self.activities.len() == 1 {
            return Err(DraftError::LastActivity);
        }
        self.activities.remove(index);
        self.activities = renumber_activities(self.activities);
        Ok(self)
    }

    /// Move an activity row to another position and renumber to 1..N.
    pub fn move_activity(mut self, from: usize, to: usize) -> Result<Self, DraftError> {
        if from >= self.activities.len() {
            return Err(DraftError::ActivityOutOfRange(from));
        }
        if to >= self.activities.len() {
            return Err(DraftError::ActivityOutOfRange(to));
        }
        let activity = self.activities.remove(from);
        self.activities.insert(to, activity);
        self.activities = renumber_activities(self.activities);
        Ok(self)
    }

    /// Run the submission rules. Blocks submission without sending anything
    /// when a required field is missing or no usable signatory exists.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.letter_number,
            "letter_number",
            "Nomor Surat",
            &mut errors,
        );
        if self.company_id.is_none() {
            errors.add(ValidationError::empty_field("company_id", "Perusahaan"));
        }
        validate_required(&self.subject, "subject", "Perihal", &mut errors);
        validate_required(
            &self.recipient_name,
            "recipient_name",
            "Nama Penerima",
            &mut errors,
        );
        validate_required(&self.content, "content", "Isi Surat", &mut errors);
        validate_signatories(&self.signatories, &mut errors);

        errors.into_result()
    }

    /// Build the submission payload: empty optional fields become absent,
    /// the attachment count is coerced (non-numeric input counts as 0), and
    /// incomplete signatory/activity rows are dropped.
    ///
    /// Callers must validate first; a draft without a company cannot produce
    /// a payload.
    pub fn into_payload(self) -> Result<LetterPayload, DraftError> {
        let company_id = self.company_id.ok_or(DraftError::MissingCompany)?;

        let attachments_count = self
            .attachments_count
            .trim()
            .parse::<u32>()
            .unwrap_or(0);

        let recipient_position = if self.recipient_position.trim().is_empty() {
            None
        } else {
            Some(self.recipient_position)
        };
        let recipient_address = if self.recipient_address.trim().is_empty() {
            None
        } else {
            Some(self.recipient_address)
        };

        let payload = LetterPayload {
            letter_number: self.letter_number,
            company_id,
            date: self.date,
            subject: self.subject,
            letter_type: self.letter_type,
            recipient_name: self.recipient_name,
            recipient_position,
            recipient_address,
            content: self.content,
            attachments_count,
            cc_list: self.cc_list,
            signatories: self.signatories,
            activities: self.activities,
        };

        Ok(payload.normalized())
    }
}

impl Default for LetterDraft {
    fn default() -> Self {
        Self::new()
    }
}
