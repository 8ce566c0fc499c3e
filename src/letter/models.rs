use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Company record as served by the letter store. Read-only from this
/// service's perspective; companies are managed elsewhere.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[schema(example = "PT Maju Bersama")]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// One person in the sign-off block. `signature_image` is an opaque image
/// reference returned by the store's upload endpoint; it is never decoded
/// here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Signatory {
    #[schema(example = "Budi Santoso")]
    pub name: String,
    #[schema(example = "Direktur Utama")]
    pub position: String,
    #[serde(default)]
    pub signature_image: Option<String>,
}

impl Signatory {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            position: String::new(),
            signature_image: None,
        }
    }

    /// A signatory counts toward submission only when both the name and the
    /// position carry text.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.position.trim().is_empty()
    }
}

/// Itemized activity row for report-style letters. `no` is the 1-based
/// display sequence and must stay contiguous after removals.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Activity {
    pub no: u32,
    #[schema(example = "Instalasi jaringan")]
    pub kegiatan: String,
    #[serde(default)]
    pub jumlah: String,
    #[serde(default)]
    pub satuan: String,
    #[serde(default)]
    pub hasil: String,
    #[serde(default)]
    pub keterangan: String,
}

impl Activity {
    pub fn blank(no: u32) -> Self {
        Self {
            no,
            kegiatan: String::new(),
            jumlah: String::new(),
            satuan: String::new(),
            hasil: String::new(),
            keterangan: String::new(),
        }
    }
}

/// Letter category. Unrecognized stored values are carried verbatim so the
/// UI can still display them instead of failing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LetterType {
    General,
    Cooperation,
    Request,
    Other(String),
}

impl LetterType {
    pub fn as_str(&self) -> &str {
        match self {
            LetterType::General => "general",
            LetterType::Cooperation => "cooperation",
            LetterType::Request => "request",
            LetterType::Other(raw) => raw,
        }
    }

    /// Human-readable label for list screens. Unknown values fall back to
    /// the raw stored string.
    pub fn label(&self) -> &str {
        match self {
            LetterType::General => "Surat Umum",
            LetterType::Cooperation => "Surat Penawaran Kerja Sama",
            LetterType::Request => "Surat Permohonan",
            LetterType::Other(raw) => raw,
        }
    }

    /// Fixed closing sentence for the document body. Unknown letter types
    /// have no closing sentence and the section is omitted.
    pub fn closing_sentence(&self) -> Option<&'static str> {
        match self {
            LetterType::General => Some(
                "Demikian surat ini kami sampaikan. Atas perhatian dan kerjasamanya, \
                 kami ucapkan terima kasih.",
            ),
            LetterType::Cooperation => Some(
                "Demikian surat penawaran kerjasama ini kami sampaikan. Besar harapan \
                 kami dapat menjalin kerjasama yang baik dengan perusahaan Bapak/Ibu.",
            ),
            LetterType::Request => Some(
                "Demikian permohonan ini kami sampaikan, atas perhatian dan \
                 perkenannya kami ucapkan terima kasih.",
            ),
            LetterType::Other(_) => None,
        }
    }
}

impl Default for LetterType {
    fn default() -> Self {
        LetterType::General
    }
}

impl From<String> for LetterType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "general" => LetterType::General,
            "cooperation" => LetterType::Cooperation,
            "request" => LetterType::Request,
            _ => LetterType::Other(value),
        }
    }
}

impl From<LetterType> for String {
    fn from(value: LetterType) -> Self {
        value.as_str().to_string()
    }
}

/// Persisted letter record with embedded signatory and activity lists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Letter {
    #[schema(example = "f1e2d3c4-b5a6-7890-1234-567890abcdef")]
    pub id: Uuid,
    #[schema(example = "001/SMG/X/2025")]
    pub letter_number: String,
    pub company_id: Uuid,
    #[schema(example = "2025-10-01")]
    pub date: NaiveDate,
    #[schema(example = "Penawaran Kerjasama Teknologi Informasi")]
    pub subject: String,
    #[schema(value_type = String, example = "general")]
    pub letter_type: LetterType,
    pub recipient_name: String,
    #[serde(default)]
    pub recipient_position: Option<String>,
    #[serde(default)]
    pub recipient_address: Option<String>,
    pub content: String,
    #[serde(default)]
    pub attachments_count: u32,
    #[serde(default)]
    pub cc_list: String,
    #[serde(default)]
    pub signatories: Vec<Signatory>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Letter {
    /// Filename offered to the browser when downloading the PDF. Slashes in
    /// the official letter number would break the header, so they become
    /// underscores before the usual filename sanitizing.
    pub fn pdf_filename(&self) -> String {
        pdf_filename(&self.letter_number)
    }
}

pub fn pdf_filename(letter_number: &str) -> String {
    let flattened = letter_number.replace('/', "_");
    format!("letter_{}.pdf", sanitize_filename::sanitize(flattened))
}

/// Submission body for create and full-replace update: a letter minus its id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct LetterPayload {
    pub letter_number: String,
    pub company_id: Uuid,
    pub date: NaiveDate,
    pub subject: String,
    #[schema(value_type = String, example = "cooperation")]
    pub letter_type: LetterType,
    pub recipient_name: String,
    #[serde(default)]
    pub recipient_position: Option<String>,
    #[serde(default)]
    pub recipient_address: Option<String>,
    pub content: String,
    #[serde(default)]
    pub attachments_count: u32,
    #[serde(default)]
    pub cc_list: String,
    #[serde(default)]
    pub signatories: Vec<Signatory>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl LetterPayload {
    /// Apply the pre-persist filters: drop activity rows without an activity
    /// name, renumber the survivors, and drop signatories missing a name or
    /// position.
    pub fn normalized(mut self) -> Self {
        self.activities.retain(|act| !act.kegiatan.trim().is_empty());
        for (idx, act) in self.activities.iter_mut().enumerate() {
            act.no = (idx + 1) as u32;
        }
        self.signatories.retain(Signatory::is_valid);
        self
    }
}
