mod common;

#[cfg(test)]
mod assembler_tests {
    use crate::common::{sample_company, sample_letter, MockLetterStore};
    use async_trait::async_trait;
    use std::sync::Arc;
    use surat_menyurat_gateway::letter::models::Company;
    use surat_menyurat_gateway::preview::assembler::{
        assemble, fallback_company, split_lines, CachedCompanySource, CompanySource,
    };
    use surat_menyurat_gateway::store::StoreError;
    use uuid::Uuid;

    /// Company source that always fails, for the degrade path.
    struct FailingCompanySource;

    #[async_trait]
    impl CompanySource for FailingCompanySource {
        async fn lookup(&self, _company_id: Uuid) -> Result<Company, StoreError> {
            Err(StoreError::NotFound)
        }
    }

    #[tokio::test]
    async fn test_assemble_never_fails_on_missing_company() {
        let letter = sample_letter(Uuid::new_v4(), Uuid::new_v4());
        let vm = assemble(letter, &FailingCompanySource).await;

        assert_eq!(vm.company.name, "Company Information Not Available");
        assert!(vm.company.address.is_empty());
        assert!(vm.company.motto.is_none());
    }

    #[tokio::test]
    async fn test_assemble_embeds_resolved_company() {
        let company_id = Uuid::new_v4();
        let store = Arc::new(MockLetterStore::new().with_company(sample_company(company_id)));
        let companies = CachedCompanySource::new(store);

        let letter = sample_letter(Uuid::new_v4(), company_id);
        let vm = assemble(letter, &companies).await;

        assert_eq!(vm.company.name, "PT Maju Bersama");
        assert_eq!(vm.company.id, Some(company_id));
    }

    #[tokio::test]
    async fn test_assemble_splits_paragraphs_and_cc_lines() {
        let mut letter = sample_letter(Uuid::new_v4(), Uuid::new_v4());
        letter.content = "  Paragraf satu.  \n\nParagraf dua.\n   ".to_string();
        letter.cc_list = "Manager A\n\nManager B".to_string();

        let vm = assemble(letter, &FailingCompanySource).await;

        assert_eq!(vm.paragraphs, vec!["Paragraf satu.", "Paragraf dua."]);
        assert_eq!(vm.cc_lines, vec!["Manager A", "Manager B"]);
    }

    #[tokio::test]
    async fn test_cached_source_serves_repeat_lookups_from_cache() {
        let company_id = Uuid::new_v4();
        let store = Arc::new(MockLetterStore::new().with_company(sample_company(company_id)));
        let companies = CachedCompanySource::new(store.clone());

        let first = companies.lookup(company_id).await.unwrap();

        // Remove the record from the backing store; the cache still answers.
        store.companies.lock().clear();
        let second = companies.lookup(company_id).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_lines_drops_blank_lines_entirely() {
        assert_eq!(
            split_lines("a\n\n\nb\n"),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(split_lines("").is_empty());
        assert!(split_lines("   \n  ").is_empty());
    }

    #[test]
    fn test_split_lines_idempotence() {
        let paragraphs: Vec<String> = vec![
            "Kalimat pembuka surat.".to_string(),
            "Kalimat penutup surat.".to_string(),
        ];
        assert_eq!(split_lines(&paragraphs.join("\n")), paragraphs);
    }

    #[test]
    fn test_fallback_company_matches_contract() {
        let company = fallback_company();
        assert_eq!(company.name, "Company Information Not Available");
        assert!(company.id.is_none());
        assert!(company.phone.is_empty());
        assert!(company.email.is_empty());
    }
}
