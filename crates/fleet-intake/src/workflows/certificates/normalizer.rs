use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::repository::AbbreviationStore;

/// Which abbreviation rules apply to a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbbreviationKind {
    Certificate,
    Organization,
}

/// Ordered fragment → canonical issuing authority table.
#[derive(Debug, Clone)]
pub struct IssuerTable {
    entries: Vec<(String, String)>,
}

impl IssuerTable {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(fragment, canonical)| (fragment.to_lowercase(), canonical))
            .collect();
        Self { entries }
    }

    pub fn standard() -> Self {
        Self::new(
            [
                ("panama", "Panama Maritime Authority"),
                (
                    "marshall",
                    "The Republic of the Marshall Islands Maritime Administrator",
                ),
                ("liberia", "Liberia Maritime Authority"),
                ("viet nam", "Vietnam Maritime Administration"),
                ("vietnam", "Vietnam Maritime Administration"),
                ("singapore", "Maritime and Port Authority of Singapore"),
                ("hong kong", "Marine Department of Hong Kong"),
                ("malta", "Transport Malta Merchant Shipping Directorate"),
                ("bahamas", "The Bahamas Maritime Authority"),
                ("cyprus", "Cyprus Shipping Deputy Ministry"),
                ("belize", "International Merchant Marine Registry of Belize"),
            ]
            .into_iter()
            .map(|(fragment, canonical)| (fragment.to_string(), canonical.to_string()))
            .collect(),
        )
    }

    /// First table fragment contained in `raw` wins; otherwise `raw` comes back unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        self.entries
            .iter()
            .find(|(fragment, _)| lowered.contains(fragment.as_str()))
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or_else(|| raw.to_string())
    }
}

/// Known organisation matched before the algorithmic fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationAlias {
    pub pattern: String,
    pub abbreviation: String,
    /// Exact match on the whole name instead of substring containment.
    pub exact: bool,
}

impl OrganizationAlias {
    fn contains(pattern: &str, abbreviation: &str) -> Self {
        Self {
            pattern: pattern.to_uppercase(),
            abbreviation: abbreviation.to_string(),
            exact: false,
        }
    }

    fn exact(pattern: &str, abbreviation: &str) -> Self {
        Self {
            pattern: pattern.to_uppercase(),
            abbreviation: abbreviation.to_string(),
            exact: true,
        }
    }

    fn matches(&self, upper_name: &str) -> bool {
        if self.exact {
            upper_name == self.pattern
        } else {
            upper_name.contains(self.pattern.as_str())
        }
    }
}

/// Stop-words, word caps and well-known organisations for algorithmic abbreviations.
#[derive(Debug, Clone)]
pub struct AbbreviationRules {
    stop_words: HashSet<String>,
    certificate_word_cap: usize,
    organization_word_cap: usize,
    organizations: Vec<OrganizationAlias>,
}

impl AbbreviationRules {
    pub fn new(
        stop_words: &[&str],
        certificate_word_cap: usize,
        organization_word_cap: usize,
        organizations: Vec<OrganizationAlias>,
    ) -> Self {
        Self {
            stop_words: stop_words.iter().map(|word| word.to_uppercase()).collect(),
            certificate_word_cap,
            organization_word_cap,
            organizations,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            &[
                "OF", "THE", "AND", "FOR", "IN", "ON", "AT", "TO", "A", "AN", "BY", "WITH", "FROM",
                "&",
            ],
            6,
            4,
            vec![
                OrganizationAlias::contains("DET NORSKE VERITAS", "DNV"),
                OrganizationAlias::contains("DNV GL", "DNV"),
                OrganizationAlias::exact("DNV", "DNV"),
                OrganizationAlias::contains("LLOYD'S REGISTER", "LR"),
                OrganizationAlias::contains("LLOYDS REGISTER", "LR"),
                OrganizationAlias::contains("AMERICAN BUREAU OF SHIPPING", "ABS"),
                OrganizationAlias::contains("BUREAU VERITAS", "BV"),
                OrganizationAlias::contains("NIPPON KAIJI KYOKAI", "NK"),
                OrganizationAlias::contains("CLASSNK", "NK"),
                OrganizationAlias::contains("CLASS NK", "NK"),
                OrganizationAlias::contains("KOREAN REGISTER", "KR"),
                OrganizationAlias::contains("CHINA CLASSIFICATION SOCIETY", "CCS"),
                OrganizationAlias::contains("REGISTRO ITALIANO NAVALE", "RINA"),
                OrganizationAlias::contains("INDIAN REGISTER OF SHIPPING", "IRS"),
                OrganizationAlias::contains("RUSSIAN MARITIME REGISTER", "RS"),
                OrganizationAlias::contains("POLISH REGISTER OF SHIPPING", "PRS"),
                OrganizationAlias::contains("CROATIAN REGISTER OF SHIPPING", "CRS"),
                OrganizationAlias::contains("VIETNAM REGISTER", "VR"),
                OrganizationAlias::contains("VIET NAM REGISTER", "VR"),
                OrganizationAlias::contains("PANAMA MARITIME AUTHORITY", "PMA"),
                OrganizationAlias::contains("MARSHALL ISLANDS", "RMI"),
                OrganizationAlias::contains("MARITIME AND PORT AUTHORITY OF SINGAPORE", "MPA"),
            ],
        )
    }

    /// Abbreviation derived purely from the text, without consulting any override store.
    pub fn algorithmic(&self, name: &str, kind: AbbreviationKind) -> String {
        let upper = name.trim().to_uppercase();

        if kind == AbbreviationKind::Organization {
            if let Some(alias) = self.organizations.iter().find(|alias| alias.matches(&upper)) {
                return alias.abbreviation.clone();
            }
        }

        let mut words: Vec<String> = upper
            .split_whitespace()
            .map(|word| word.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
            .filter(|word| !word.is_empty() && !self.stop_words.contains(word))
            .collect();

        let cap = match kind {
            AbbreviationKind::Certificate => {
                if words.len() > 1 && words.last().map(String::as_str) == Some("CERTIFICATE") {
                    words.pop();
                }
                self.certificate_word_cap
            }
            AbbreviationKind::Organization => self.organization_word_cap,
        };

        words
            .iter()
            .take(cap)
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Canonicalizes issuing authorities and produces certificate/organisation abbreviations.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    issuers: IssuerTable,
    rules: AbbreviationRules,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(IssuerTable::standard(), AbbreviationRules::standard())
    }
}

impl FieldNormalizer {
    pub fn new(issuers: IssuerTable, rules: AbbreviationRules) -> Self {
        Self { issuers, rules }
    }

    pub fn rules(&self) -> &AbbreviationRules {
        &self.rules
    }

    pub fn normalize_issuer(&self, raw: &str) -> String {
        self.issuers.normalize(raw)
    }

    /// User overrides win over the algorithm; a hit is counted in the store.
    /// Store failures are logged and the algorithmic abbreviation is returned instead.
    pub fn abbreviate<S>(&self, store: &S, name: &str, kind: AbbreviationKind) -> String
    where
        S: AbbreviationStore + ?Sized,
    {
        let key = name.trim().to_uppercase();
        if key.is_empty() {
            return String::new();
        }

        match store.lookup(&key) {
            Ok(Some(abbreviation)) if !abbreviation.trim().is_empty() => {
                if let Err(error) = store.record_usage(&key) {
                    warn!(name = %key, %error, "failed to record abbreviation usage");
                }
                return abbreviation.trim().to_string();
            }
            Ok(_) => {}
            Err(error) => {
                warn!(name = %key, %error, "abbreviation override lookup failed; using generated value");
            }
        }

        self.rules.algorithmic(&key, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::certificates::repository::RepositoryError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingStore {
        overrides: HashMap<String, String>,
        usage: Mutex<HashMap<String, u32>>,
    }

    impl AbbreviationStore for CountingStore {
        fn lookup(&self, name: &str) -> Result<Option<String>, RepositoryError> {
            Ok(self.overrides.get(name).cloned())
        }

        fn record_usage(&self, name: &str) -> Result<(), RepositoryError> {
            *self
                .usage
                .lock()
                .expect("usage mutex poisoned")
                .entry(name.to_string())
                .or_default() += 1;
            Ok(())
        }
    }

    struct OfflineStore;

    impl AbbreviationStore for OfflineStore {
        fn lookup(&self, _name: &str) -> Result<Option<String>, RepositoryError> {
            Err(RepositoryError::Unavailable("store offline".to_string()))
        }

        fn record_usage(&self, _name: &str) -> Result<(), RepositoryError> {
            Err(RepositoryError::Unavailable("store offline".to_string()))
        }
    }

    #[test]
    fn issuer_matches_fragment_case_insensitively() {
        let normalizer = FieldNormalizer::default();
        assert_eq!(
            normalizer.normalize_issuer("REPUBLIC OF PANAMA - SEGUMAR"),
            "Panama Maritime Authority"
        );
        assert_eq!(
            normalizer.normalize_issuer("Viet Nam Maritime Administration"),
            "Vietnam Maritime Administration"
        );
        assert_eq!(normalizer.normalize_issuer("Tuvalu Registry"), "Tuvalu Registry");
    }

    #[test]
    fn issuer_table_first_entry_wins() {
        let table = IssuerTable::new(vec![
            ("islands".to_string(), "Generic Islands".to_string()),
            ("marshall".to_string(), "Marshall Islands".to_string()),
        ]);
        assert_eq!(table.normalize("Marshall Islands"), "Generic Islands");
    }

    #[test]
    fn certificate_abbreviation_drops_trailing_certificate() {
        let rules = AbbreviationRules::standard();
        assert_eq!(
            rules.algorithmic("Safety Management Certificate", AbbreviationKind::Certificate),
            "SM"
        );
        assert_eq!(
            rules.algorithmic(
                "International Air Pollution Prevention Certificate",
                AbbreviationKind::Certificate
            ),
            "IAPP"
        );
        assert_eq!(
            rules.algorithmic("Certificate of Registry", AbbreviationKind::Certificate),
            "CR"
        );
    }

    #[test]
    fn certificate_abbreviation_caps_at_six_words() {
        let rules = AbbreviationRules::standard();
        assert_eq!(
            rules.algorithmic(
                "one two three four five six seven eight",
                AbbreviationKind::Certificate
            ),
            "OTTFFS"
        );
    }

    #[test]
    fn organization_abbreviation_prefers_known_societies() {
        let rules = AbbreviationRules::standard();
        assert_eq!(
            rules.algorithmic("Lloyd's Register EMEA", AbbreviationKind::Organization),
            "LR"
        );
        assert_eq!(rules.algorithmic("dnv", AbbreviationKind::Organization), "DNV");
        assert_eq!(
            rules.algorithmic(
                "Saigon Shipping Joint Stock Company Limited",
                AbbreviationKind::Organization
            ),
            "SSJS"
        );
    }

    #[test]
    fn override_wins_and_counts_usage() {
        let mut store = CountingStore::default();
        store
            .overrides
            .insert("SAFETY MANAGEMENT CERTIFICATE".to_string(), "SMC".to_string());
        let normalizer = FieldNormalizer::default();

        let abbreviation = normalizer.abbreviate(
            &store,
            "  safety management certificate ",
            AbbreviationKind::Certificate,
        );

        assert_eq!(abbreviation, "SMC");
        let usage = store.usage.lock().expect("usage mutex poisoned");
        assert_eq!(usage.get("SAFETY MANAGEMENT CERTIFICATE"), Some(&1));
    }

    #[test]
    fn missing_override_falls_back_without_counting() {
        let store = CountingStore::default();
        let normalizer = FieldNormalizer::default();

        let abbreviation = normalizer.abbreviate(
            &store,
            "Safety Management Certificate",
            AbbreviationKind::Certificate,
        );

        assert_eq!(abbreviation, "SM");
        assert!(store.usage.lock().expect("usage mutex poisoned").is_empty());
    }

    #[test]
    fn store_failure_degrades_to_algorithm() {
        let normalizer = FieldNormalizer::default();
        assert_eq!(
            normalizer.abbreviate(&OfflineStore, "Bureau Veritas", AbbreviationKind::Organization),
            "BV"
        );
        assert_eq!(
            normalizer.abbreviate(&OfflineStore, "   ", AbbreviationKind::Certificate),
            ""
        );
    }
}
