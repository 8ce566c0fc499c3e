#[cfg(test)]
mod model_tests {
    use surat_menyurat_gateway::letter::models::{
        pdf_filename, Activity, Letter, LetterPayload, LetterType, Signatory,
    };
    use surat_menyurat_gateway::ErrorResponse;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn test_letter_type_serialization() {
        assert_eq!(
            serde_json::to_string(&LetterType::General).unwrap(),
            "\"general\""
        );
        assert_eq!(
            serde_json::to_string(&LetterType::Cooperation).unwrap(),
            "\"cooperation\""
        );
        assert_eq!(
            serde_json::to_string(&LetterType::Request).unwrap(),
            "\"request\""
        );
    }

    #[test]
    fn test_unknown_letter_type_round_trips_verbatim() {
        let parsed: LetterType = serde_json::from_str("\"memo\"").unwrap();
        assert_eq!(parsed, LetterType::Other("memo".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"memo\"");
        // The display label echoes the raw stored string.
        assert_eq!(parsed.label(), "memo");
    }

    #[test]
    fn test_letter_type_labels() {
        assert_eq!(LetterType::General.label(), "Surat Umum");
        assert_eq!(
            LetterType::Cooperation.label(),
            "Surat Penawaran Kerja Sama"
        );
        assert_eq!(LetterType::Request.label(), "Surat Permohonan");
    }

    #[test]
    fn test_closing_sentences_by_letter_type() {
        assert!(LetterType::General
            .closing_sentence()
            .unwrap()
            .starts_with("Demikian surat ini"));
        assert!(LetterType::Cooperation
            .closing_sentence()
            .unwrap()
            .starts_with("Demikian surat penawaran kerjasama"));
        assert!(LetterType::Request
            .closing_sentence()
            .unwrap()
            .starts_with("Demikian permohonan ini"));
        assert!(LetterType::Other("memo".to_string())
            .closing_sentence()
            .is_none());
    }

    #[test]
    fn test_pdf_filename_flattens_letter_number() {
        assert_eq!(
            pdf_filename("001/SMG/X/2025"),
            "letter_001_SMG_X_2025.pdf"
        );
        assert_eq!(pdf_filename("plain-42"), "letter_plain-42.pdf");
    }

    #[test]
    fn test_signatory_validity() {
        let valid = Signatory {
            name: "Budi".to_string(),
            position: "Direktur".to_string(),
            signature_image: None,
        };
        assert!(valid.is_valid());

        let missing_position = Signatory {
            name: "Budi".to_string(),
            position: "   ".to_string(),
            signature_image: None,
        };
        assert!(!missing_position.is_valid());

        assert!(!Signatory::blank().is_valid());
    }

    fn payload() -> LetterPayload {
        LetterPayload {
            letter_number: "002/SMG/XI/2025".to_string(),
            company_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            subject: "Laporan Kegiatan".to_string(),
            letter_type: LetterType::General,
            recipient_name: "Ibu Kepala Divisi".to_string(),
            recipient_position: None,
            recipient_address: None,
            content: "Isi laporan.".to_string(),
            attachments_count: 0,
            cc_list: String::new(),
            signatories: vec![
                Signatory {
                    name: "Budi".to_string(),
                    position: "Direktur".to_string(),
                    signature_image: None,
                },
                Signatory::blank(),
            ],
            activities: vec![
                Activity {
                    no: 7,
                    kegiatan: "Survey lokasi".to_string(),
                    jumlah: "1".to_string(),
                    satuan: "kali".to_string(),
                    hasil: "Selesai".to_string(),
                    keterangan: String::new(),
                },
                Activity::blank(2),
                Activity {
                    no: 9,
                    kegiatan: "Pemasangan".to_string(),
                    jumlah: "3".to_string(),
                    satuan: "unit".to_string(),
                    hasil: "Selesai".to_string(),
                    keterangan: "Tahap akhir".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_payload_normalization_filters_and_renumbers() {
        let normalized = payload().normalized();

        // Blank signatory dropped, valid one kept.
        assert_eq!(normalized.signatories.len(), 1);
        assert_eq!(normalized.signatories[0].name, "Budi");

        // Activity without a name dropped, survivors renumbered 1..N in order.
        assert_eq!(normalized.activities.len(), 2);
        assert_eq!(normalized.activities[0].kegiatan, "Survey lokasi");
        assert_eq!(normalized.activities[0].no, 1);
        assert_eq!(normalized.activities[1].kegiatan, "Pemasangan");
        assert_eq!(normalized.activities[1].no, 2);
    }

    #[test]
    fn test_letter_deserialization_defaults() {
        let json = format!(
            r#"{{
                "id": "{}",
                "letter_number": "003/SMG/XI/2025",
                "company_id": "{}",
                "date": "2025-11-05",
                "subject": "Perihal",
                "letter_type": "request",
                "recipient_name": "Bapak Penerima",
                "content": "Isi."
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );

        let letter: Letter = serde_json::from_str(&json).unwrap();
        assert_eq!(letter.letter_type, LetterType::Request);
        assert_eq!(letter.attachments_count, 0);
        assert!(letter.cc_list.is_empty());
        assert!(letter.signatories.is_empty());
        assert!(letter.activities.is_empty());
        assert!(letter.recipient_position.is_none());
    }

    #[test]
    fn test_error_response_creation() {
        let not_found_error = ErrorResponse::not_found("Letter not found");
        assert_eq!(not_found_error.error, "NotFound");
        assert_eq!(not_found_error.message, "Letter not found");
        assert!(!not_found_error.timestamp.is_empty());

        let bad_request_error = ErrorResponse::bad_request("Invalid input");
        assert_eq!(bad_request_error.error, "BadRequest");
        assert_eq!(bad_request_error.message, "Invalid input");

        let generic_error = ErrorResponse::new("StoreUnavailable", "store is down");
        assert_eq!(generic_error.error, "StoreUnavailable");
        assert_eq!(generic_error.message, "store is down");
    }
}
