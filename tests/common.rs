use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use surat_menyurat_gateway::letter::models::{
    Activity, Company, Letter, LetterPayload, LetterType, Signatory,
};
use surat_menyurat_gateway::store::{LetterStore, StoreError};

/// In-memory mock of the external letter store for endpoint tests.
pub struct MockLetterStore {
    pub letters: Mutex<HashMap<Uuid, Letter>>,
    pub companies: Mutex<HashMap<Uuid, Company>>,
    pub pdfs: Mutex<HashMap<Uuid, Vec<u8>>>,
    /// Payloads received by create/update, for asserting what was sent.
    pub received_payloads: Mutex<Vec<LetterPayload>>,
    /// Filenames received by the signature upload endpoint.
    pub uploaded_files: Mutex<Vec<String>>,
    /// When set, every write operation fails with a store error.
    pub reject_writes: AtomicBool,
}

impl MockLetterStore {
    pub fn new() -> Self {
        Self {
            letters: Mutex::new(HashMap::new()),
            companies: Mutex::new(HashMap::new()),
            pdfs: Mutex::new(HashMap::new()),
            received_payloads: Mutex::new(Vec::new()),
            uploaded_files: Mutex::new(Vec::new()),
            reject_writes: AtomicBool::new(false),
        }
    }

    pub fn with_letter(self, letter: Letter) -> Self {
        self.letters.lock().insert(letter.id, letter);
        self
    }

    pub fn with_company(self, company: Company) -> Self {
        if let Some(id) = company.id {
            self.companies.lock().insert(id, company);
        }
        self
    }

    fn write_error(&self) -> Option<StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            Some(StoreError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        } else {
            None
        }
    }
}

#[async_trait]
impl LetterStore for MockLetterStore {
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.companies.lock().values().cloned().collect())
    }

    async fn get_company(&self, id: Uuid) -> Result<Company, StoreError> {
        self.companies
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_letters(&self) -> Result<Vec<Letter>, StoreError> {
        Ok(self.letters.lock().values().cloned().collect())
    }

    async fn get_letter(&self, id: Uuid) -> Result<Letter, StoreError> {
        self.letters
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_letter(&self, payload: &LetterPayload) -> Result<Letter, StoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        self.received_payloads.lock().push(payload.clone());
        let letter = letter_from_payload(Uuid::new_v4(), payload.clone());
        self.letters.lock().insert(letter.id, letter.clone());
        Ok(letter)
    }

    async fn update_letter(
        &self,
        id: Uuid,
        payload: &LetterPayload,
    ) -> Result<Letter, StoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        if !self.letters.lock().contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        self.received_payloads.lock().push(payload.clone());
        let letter = letter_from_payload(id, payload.clone());
        self.letters.lock().insert(id, letter.clone());
        Ok(letter)
    }

    async fn delete_letter(&self, id: Uuid) -> Result<(), StoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        if self.letters.lock().remove(&id).is_some() {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    async fn download_pdf(&self, id: Uuid) -> Result<Vec<u8>, StoreError> {
        self.pdfs
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn upload_signature(
        &self,
        _data: Vec<u8>,
        filename: String,
        _content_type: String,
    ) -> Result<String, StoreError> {
        if let Some(e) = self.write_error() {
            return Err(e);
        }
        self.uploaded_files.lock().push(filename);
        Ok("data:image/png;base64,dGVzdA==".to_string())
    }
}

pub fn letter_from_payload(id: Uuid, payload: LetterPayload) -> Letter {
    Letter {
        id,
        letter_number: payload.letter_number,
        company_id: payload.company_id,
        date: payload.date,
        subject: payload.subject,
        letter_type: payload.letter_type,
        recipient_name: payload.recipient_name,
        recipient_position: payload.recipient_position,
        recipient_address: payload.recipient_address,
        content: payload.content,
        attachments_count: payload.attachments_count,
        cc_list: payload.cc_list,
        signatories: payload.signatories,
        activities: payload.activities,
    }
}

pub fn sample_company(id: Uuid) -> Company {
    Company {
        id: Some(id),
        name: "PT Maju Bersama".to_string(),
        address: "Jl. Sudirman No. 10, Jakarta".to_string(),
        phone: "+62-21-5551234".to_string(),
        email: "info@majubersama.co.id".to_string(),
        motto: Some("Maju Bersama, Tumbuh Bersama".to_string()),
        website: Some("https://majubersama.co.id".to_string()),
        logo: None,
    }
}

pub fn sample_letter(id: Uuid, company_id: Uuid) -> Letter {
    Letter {
        id,
        letter_number: "001/SMG/X/2025".to_string(),
        company_id,
        date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        subject: "Penawaran Kerjasama Teknologi Informasi".to_string(),
        letter_type: LetterType::Cooperation,
        recipient_name: "Bapak Direktur PT Mitra Sejahtera".to_string(),
        recipient_position: Some("Direktur Utama".to_string()),
        recipient_address: Some("Jl. Gatot Subroto No. 5\nJakarta Selatan".to_string()),
        content: "Paragraf pertama surat ini.\n\nParagraf kedua surat ini.".to_string(),
        attachments_count: 3,
        cc_list: "Manager A\n\nManager B".to_string(),
        signatories: vec![
            Signatory {
                name: "Budi Santoso".to_string(),
                position: "Direktur Utama".to_string(),
                signature_image: Some("data:image/png;base64,c2ln".to_string()),
            },
            Signatory {
                name: "Siti Rahayu".to_string(),
                position: "Manager Operasional".to_string(),
                signature_image: None,
            },
        ],
        activities: vec![Activity {
            no: 1,
            kegiatan: "Instalasi jaringan".to_string(),
            jumlah: "2".to_string(),
            satuan: "titik".to_string(),
            hasil: "Selesai".to_string(),
            keterangan: String::new(),
        }],
    }
}
