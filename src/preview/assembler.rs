//! View-model assembly for the letter preview.
//!
//! A preview needs the letter itself plus its company letterhead data. The
//! company lookup is allowed to fail without failing the preview: a missing
//! or unreachable company record is replaced by a fixed placeholder so the
//! document still renders.

use async_trait::async_trait;
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::letter::models::{Company, Letter};
use crate::store::{LetterStore, StoreError};

const COMPANY_CACHE_TTL_SECS: u64 = 10 * 60;
const COMPANY_CACHE_CAPACITY: u64 = 100;

lazy_static::lazy_static! {
    static ref FALLBACK_COMPANY: Company = Company {
        id: None,
        name: "Company Information Not Available".to_string(),
        address: String::new(),
        phone: String::new(),
        email: String::new(),
        motto: None,
        website: None,
        logo: None,
    };
}

/// Placeholder letterhead used when the company record cannot be resolved.
pub fn fallback_company() -> Company {
    FALLBACK_COMPANY.clone()
}

/// Capability to resolve a company by id.
#[async_trait]
pub trait CompanySource: Send + Sync {
    async fn lookup(&self, company_id: Uuid) -> Result<Company, StoreError>;
}

/// Store-backed company source with a small read-through cache, so repeated
/// previews of letters from the same company skip the extra round trip.
pub struct CachedCompanySource {
    store: Arc<dyn LetterStore>,
    cache: Cache<Uuid, Company>,
}

impl CachedCompanySource {
    pub fn new(store: Arc<dyn LetterStore>) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(COMPANY_CACHE_TTL_SECS))
            .max_capacity(COMPANY_CACHE_CAPACITY)
            .build();

        Self { store, cache }
    }
}

#[async_trait]
impl CompanySource for CachedCompanySource {
    async fn lookup(&self, company_id: Uuid) -> Result<Company, StoreError> {
        if let Some(company) = self.cache.get(&company_id).await {
            return Ok(company);
        }

        let company = self.store.get_company(company_id).await?;
        self.cache.insert(company_id, company.clone()).await;
        Ok(company)
    }
}

/// Render-ready aggregation of a letter and its resolved company. Built
/// per preview request and discarded afterwards; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterViewModel {
    pub letter: Letter,
    pub company: Company,
    pub paragraphs: Vec<String>,
    pub cc_lines: Vec<String>,
}

/// Split free text into trimmed, non-empty lines. Used for both the letter
/// body (paragraph per line) and the CC list (recipient per line); blank
/// lines are dropped entirely, they do not render as spacing.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assemble a view model from a fetched letter.
///
/// Company resolution failures of any kind degrade to the fallback company;
/// they are logged but never surfaced to the caller. Letter fetch failures
/// are the caller's concern - by the time this runs, the letter is in hand.
pub async fn assemble(letter: Letter, companies: &dyn CompanySource) -> LetterViewModel {
    let company = match companies.lookup(letter.company_id).await {
        Ok(company) => company,
        Err(e) => {
            log::warn!(
                "Company {} unavailable for preview, using fallback: {}",
                letter.company_id,
                e
            );
            fallback_company()
        }
    };

    let paragraphs = split_lines(&letter.content);
    let cc_lines = split_lines(&letter.cc_list);

    LetterViewModel {
        letter,
        company,
        paragraphs,
        cc_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_trims_and_drops_blanks() {
        let lines = split_lines("  Manager A  \n\n   \nManager B");
        assert_eq!(lines, vec!["Manager A", "Manager B"]);
    }

    #[test]
    fn test_split_lines_is_idempotent_on_clean_input() {
        let paragraphs = vec!["Paragraf satu.".to_string(), "Paragraf dua.".to_string()];
        let joined = paragraphs.join("\n");
        assert_eq!(split_lines(&joined), paragraphs);
    }

    #[test]
    fn test_fallback_company_text() {
        let company = fallback_company();
        assert_eq!(company.name, "Company Information Not Available");
        assert!(company.address.is_empty());
        assert!(company.motto.is_none());
    }
}
