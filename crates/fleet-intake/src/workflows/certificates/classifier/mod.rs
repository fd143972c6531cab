//! Priority-cascade classifier assigning a canonical certificate type to noisy extractor output.
//!
//! The four text signals are uppercased and joined into one buffer. Rules from the
//! [`KeywordCatalog`] run in order and the first one that fires wins; nothing is re-scored.
//! When no rule fires, a non-empty extractor title is trusted verbatim, otherwise the
//! result is [`catalog::UNKNOWN`].

pub mod catalog;
mod keywords;
mod rules;

pub use keywords::{Keyword, KeywordSet};
pub use rules::{KeywordCatalog, PriorityRule, PriorityTier, Refinement};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::ExtractedRecord;

/// Text signals consulted by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationInput {
    pub raw_name: String,
    pub note: String,
    pub rank: String,
    pub document_summary: String,
}

impl From<&ExtractedRecord> for ClassificationInput {
    fn from(record: &ExtractedRecord) -> Self {
        Self {
            raw_name: record.raw_name.clone(),
            note: record.note.clone(),
            rank: record.rank.clone(),
            document_summary: record.document_summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub canonical_type: String,
    pub priority_tier: PriorityTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_keyword: Option<String>,
}

impl ClassificationResult {
    pub fn is_unknown(&self) -> bool {
        self.priority_tier == PriorityTier::Default
    }
}

/// Stateless classifier over an injected keyword catalog.
#[derive(Debug, Clone)]
pub struct CertificateClassifier {
    catalog: KeywordCatalog,
}

impl Default for CertificateClassifier {
    fn default() -> Self {
        Self::new(KeywordCatalog::standard())
    }
}

impl CertificateClassifier {
    pub fn new(catalog: KeywordCatalog) -> Self {
        Self { catalog }
    }

    pub fn classify(&self, input: &ClassificationInput) -> ClassificationResult {
        let buffer = search_buffer(input);

        if let Some((tier, label, keyword)) = self.catalog.first_match(&buffer) {
            debug!(tier = tier.rank(), keyword, label, "certificate classified");
            return ClassificationResult {
                canonical_type: label.to_string(),
                priority_tier: tier,
                matched_keyword: Some(keyword.to_string()),
            };
        }

        if !input.raw_name.trim().is_empty() {
            return ClassificationResult {
                canonical_type: input.raw_name.clone(),
                priority_tier: PriorityTier::ExtractorName,
                matched_keyword: None,
            };
        }

        ClassificationResult {
            canonical_type: catalog::UNKNOWN.to_string(),
            priority_tier: PriorityTier::Default,
            matched_keyword: None,
        }
    }

    /// Convenience wrapper returning only the label.
    pub fn classify_fields(
        &self,
        raw_name: &str,
        note: &str,
        rank: &str,
        document_summary: &str,
    ) -> String {
        self.classify(&ClassificationInput {
            raw_name: raw_name.to_string(),
            note: note.to_string(),
            rank: rank.to_string(),
            document_summary: document_summary.to_string(),
        })
        .canonical_type
    }
}

fn search_buffer(input: &ClassificationInput) -> String {
    [
        input.raw_name.as_str(),
        input.note.as_str(),
        input.rank.as_str(),
        input.document_summary.as_str(),
    ]
    .iter()
    .map(|part| part.to_uppercase())
    .collect::<Vec<_>>()
    .join("\n")
}
