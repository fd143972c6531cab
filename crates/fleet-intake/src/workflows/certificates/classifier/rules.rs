use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::catalog;
use super::keywords::{Keyword, KeywordSet};

/// Cascade position of the rule that produced a label. Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    IdentityDocument,
    RadioQualification,
    NavigationalWatch,
    Training,
    Rank,
    ResourceManagement,
    ExtractorName,
    Default,
}

impl PriorityTier {
    pub fn rank(&self) -> &'static str {
        match self {
            PriorityTier::IdentityDocument => "0",
            PriorityTier::RadioQualification => "1",
            PriorityTier::NavigationalWatch => "1.5",
            PriorityTier::Training => "2",
            PriorityTier::Rank => "3",
            PriorityTier::ResourceManagement => "3.5",
            PriorityTier::ExtractorName => "4",
            PriorityTier::Default => "default",
        }
    }
}

/// Secondary keyword search that swaps the label of an already-triggered rule.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub when: KeywordSet,
    pub label: String,
}

/// One step of the cascade: when `trigger` hits, the rule wins outright and the first
/// refinement that also hits picks the label.
#[derive(Debug, Clone)]
pub struct PriorityRule {
    pub tier: PriorityTier,
    pub trigger: KeywordSet,
    pub refinements: Vec<Refinement>,
    pub label: String,
}

impl PriorityRule {
    pub fn new(tier: PriorityTier, trigger: KeywordSet, label: &str) -> Self {
        Self {
            tier,
            trigger,
            refinements: Vec::new(),
            label: label.to_string(),
        }
    }

    pub fn refine(mut self, when: KeywordSet, label: &str) -> Self {
        self.refinements.push(Refinement {
            when,
            label: label.to_string(),
        });
        self
    }

    /// Returns the resolved label and the trigger keyword when the rule fires.
    pub fn evaluate<'a>(&'a self, buffer: &str) -> Option<(&'a str, &'a str)> {
        let keyword = self.trigger.first_hit(buffer)?;
        let label = self
            .refinements
            .iter()
            .find(|refinement| refinement.when.first_hit(buffer).is_some())
            .map(|refinement| refinement.label.as_str())
            .unwrap_or(self.label.as_str());
        Some((label, keyword))
    }
}

/// Ordered rule list backing the classifier. Position in `rules` is the conflict policy.
#[derive(Debug, Clone)]
pub struct KeywordCatalog {
    rules: Vec<PriorityRule>,
}

impl KeywordCatalog {
    pub fn new(rules: Vec<PriorityRule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        STANDARD_CATALOG.clone()
    }

    pub fn rules(&self) -> &[PriorityRule] {
        &self.rules
    }

    /// First rule that fires, in list order.
    pub fn first_match(&self, buffer: &str) -> Option<(PriorityTier, &str, &str)> {
        self.rules.iter().find_map(|rule| {
            rule.evaluate(buffer)
                .map(|(label, keyword)| (rule.tier, label, keyword))
        })
    }

    fn build_standard() -> Result<Self, regex::Error> {
        let radio = || {
            KeywordSet::new(vec![
                Keyword::phrase("GMDSS"),
                Keyword::phrase("GENERAL OPERATOR"),
                Keyword::phrase("RADIO OPERATOR"),
                Keyword::phrase("RESTRICTED OPERATOR"),
                Keyword::code("GOC"),
                Keyword::code("ROC"),
                Keyword::spaced("IV/2"),
            ])
        };

        let mut rules = vec![
            PriorityRule::new(
                PriorityTier::IdentityDocument,
                KeywordSet::new(vec![
                    Keyword::phrase("SEAMAN'S BOOK"),
                    Keyword::phrase("SEAMAN\u{2019}S BOOK"),
                    Keyword::phrase("SEAMANS BOOK"),
                    Keyword::phrase("SEAMAN BOOK"),
                    Keyword::phrase("SEAMEN'S BOOK"),
                    Keyword::phrase("DISCHARGE BOOK"),
                    Keyword::phrase("SEAFARER'S IDENTITY"),
                    Keyword::phrase("SEAFARERS IDENTITY"),
                    Keyword::phrase("SEAFARER IDENTITY"),
                    Keyword::phrase("SEAFARER ID"),
                ])?,
                catalog::SEAMAN_BOOK,
            )
            .refine(radio()?, catalog::SEAMAN_BOOK_GMDSS)
            .refine(
                KeywordSet::new(vec![
                    Keyword::phrase("CERTIFICATE OF COMPETENCY"),
                    Keyword::phrase("OFFICER IN CHARGE"),
                    Keyword::code("COC"),
                    Keyword::code("II/1"),
                    Keyword::code("II/2"),
                    Keyword::code("II/3"),
                    Keyword::code("III/1"),
                    Keyword::code("III/2"),
                    Keyword::code("III/3"),
                    Keyword::code("III/6"),
                ])?,
                catalog::SEAMAN_BOOK_COC,
            ),
            PriorityRule::new(PriorityTier::RadioQualification, radio()?, catalog::GMDSS),
            PriorityRule::new(
                PriorityTier::NavigationalWatch,
                KeywordSet::new(vec![
                    Keyword::phrase("OFFICER IN CHARGE OF A NAVIGATIONAL WATCH"),
                    Keyword::phrase("OFFICER IN CHARGE OF THE NAVIGATIONAL WATCH"),
                    Keyword::phrase("OFFICER IN CHARGE OF NAVIGATIONAL WATCH"),
                    Keyword::code("OICNW"),
                ])?,
                catalog::COMPETENCY,
            ),
        ];

        for (keyword, label) in TRAINING_DICTIONARY.iter() {
            rules.push(PriorityRule::new(
                PriorityTier::Training,
                KeywordSet::new(vec![keyword.clone()])?,
                label,
            ));
        }

        rules.push(
            PriorityRule::new(
                PriorityTier::Rank,
                KeywordSet::new(vec![
                    Keyword::code("MASTER"),
                    Keyword::phrase("CHIEF MATE"),
                    Keyword::phrase("CHIEF OFFICER"),
                    Keyword::phrase("SECOND MATE"),
                    Keyword::phrase("SECOND OFFICER"),
                    Keyword::phrase("THIRD MATE"),
                    Keyword::phrase("THIRD OFFICER"),
                    Keyword::phrase("CHIEF ENGINEER"),
                    Keyword::phrase("SECOND ENGINEER"),
                    Keyword::phrase("THIRD ENGINEER"),
                    Keyword::phrase("FOURTH ENGINEER"),
                    Keyword::phrase("ELECTRO-TECHNICAL OFFICER"),
                    Keyword::phrase("ELECTROTECHNICAL OFFICER"),
                    Keyword::phrase("OFFICER IN CHARGE OF AN ENGINEERING WATCH"),
                    Keyword::code("ETO"),
                    Keyword::code("C/O"),
                    Keyword::code("2/O"),
                    Keyword::code("3/O"),
                    Keyword::code("C/E"),
                    Keyword::code("2/E"),
                    Keyword::code("3/E"),
                    Keyword::code("II/1"),
                    Keyword::code("II/2"),
                    Keyword::code("II/3"),
                    Keyword::code("III/1"),
                    Keyword::code("III/2"),
                    Keyword::code("III/3"),
                    Keyword::code("III/6"),
                ])?,
                catalog::COMPETENCY,
            )
            .refine(
                KeywordSet::new(vec![
                    Keyword::phrase("ENDORSEMENT"),
                    Keyword::phrase("ENDORSED"),
                    Keyword::phrase("RECOGNITION"),
                    Keyword::phrase("RECOGNIZING"),
                    Keyword::phrase("RECOGNISING"),
                ])?,
                catalog::ENDORSEMENT,
            ),
        );

        rules.push(PriorityRule::new(
            PriorityTier::ResourceManagement,
            KeywordSet::new(vec![
                Keyword::phrase("BRIDGE RESOURCE MANAGEMENT"),
                Keyword::phrase("BRIDGE TEAM MANAGEMENT"),
                Keyword::code("BRM"),
            ])?,
            catalog::BRIDGE_RESOURCE_MANAGEMENT,
        ));
        rules.push(PriorityRule::new(
            PriorityTier::ResourceManagement,
            KeywordSet::new(vec![
                Keyword::phrase("ENGINE RESOURCE MANAGEMENT"),
                Keyword::phrase("ENGINE ROOM RESOURCE MANAGEMENT"),
                Keyword::code("ERM"),
            ])?,
            catalog::ENGINE_RESOURCE_MANAGEMENT,
        ));

        Ok(Self { rules })
    }
}

lazy_static! {
    /// Training keyword dictionary, evaluated in insertion order.
    static ref TRAINING_DICTIONARY: Vec<(Keyword, &'static str)> = vec![
        (Keyword::phrase("SHIP SECURITY OFFICER"), catalog::SHIP_SECURITY_OFFICER),
        (Keyword::code("SSO"), catalog::SHIP_SECURITY_OFFICER),
        (Keyword::phrase("ADVANCED FIRE FIGHTING"), catalog::ADVANCED_FIRE_FIGHTING),
        (Keyword::phrase("ADVANCED FIRE-FIGHTING"), catalog::ADVANCED_FIRE_FIGHTING),
        (Keyword::phrase("ADVANCED FIREFIGHTING"), catalog::ADVANCED_FIRE_FIGHTING),
        (Keyword::phrase("BASIC SAFETY"), catalog::BASIC_SAFETY),
        (Keyword::phrase("BASIC TRAINING"), catalog::BASIC_SAFETY),
        (Keyword::phrase("MEDICAL FIRST AID"), catalog::MEDICAL_FIRST_AID),
        (Keyword::phrase("MEDICAL CARE"), catalog::MEDICAL_CARE),
        (Keyword::phrase("MEDICAL FITNESS"), catalog::MEDICAL),
        (Keyword::phrase("MEDICAL EXAMINATION"), catalog::MEDICAL),
        (Keyword::phrase("MEDICAL CERTIFICATE"), catalog::MEDICAL),
        (Keyword::phrase("ELECTRONIC CHART DISPLAY"), catalog::ECDIS),
        (Keyword::code("ECDIS"), catalog::ECDIS),
        (Keyword::phrase("SECURITY AWARENESS"), catalog::SECURITY_AWARENESS),
        (Keyword::phrase("DESIGNATED SECURITY DUTIES"), catalog::DESIGNATED_SECURITY_DUTIES),
        (Keyword::phrase("SURVIVAL CRAFT"), catalog::SURVIVAL_CRAFT),
        (Keyword::phrase("FAST RESCUE BOAT"), catalog::FAST_RESCUE_BOAT),
        (Keyword::phrase("RADAR NAVIGATION"), catalog::RADAR_ARPA),
        (Keyword::code("ARPA"), catalog::RADAR_ARPA),
        (Keyword::phrase("TANKER FAMILIARIZATION"), catalog::TANKER_FAMILIARIZATION),
        (Keyword::phrase("TANKER FAMILIARISATION"), catalog::TANKER_FAMILIARIZATION),
        (Keyword::phrase("ADVANCED TRAINING FOR OIL TANKER"), catalog::ADVANCED_OIL_TANKER),
        (Keyword::phrase("ADVANCED TRAINING FOR CHEMICAL TANKER"), catalog::ADVANCED_CHEMICAL_TANKER),
        (Keyword::phrase("LIQUEFIED GAS TANKER"), catalog::LIQUEFIED_GAS_TANKER),
        (Keyword::phrase("HIGH VOLTAGE"), catalog::HIGH_VOLTAGE),
        (Keyword::phrase("CROWD MANAGEMENT"), catalog::CROWD_CRISIS_MANAGEMENT),
        (Keyword::phrase("CRISIS MANAGEMENT"), catalog::CROWD_CRISIS_MANAGEMENT),
        (Keyword::phrase("YELLOW FEVER"), catalog::YELLOW_FEVER),
        (Keyword::code("PASSPORT"), catalog::PASSPORT),
    ];

    static ref STANDARD_CATALOG: KeywordCatalog =
        KeywordCatalog::build_standard().expect("standard keyword catalog compiles");
}
