//! Canonical certificate-type labels.
//!
//! These strings are shared verbatim with storage and UI layers; renaming one is a
//! data migration, not a refactor.

pub const COMPETENCY: &str = "Certificate of Competency (COC)";
pub const ENDORSEMENT: &str = "Certificate of Endorsement (COE)";
pub const SEAMAN_BOOK: &str = "Seaman Book";
pub const SEAMAN_BOOK_COC: &str = "Seaman book for COC";
pub const SEAMAN_BOOK_GMDSS: &str = "Seaman book for GMDSS";
pub const GMDSS: &str = "GMDSS Certificate";
pub const PASSPORT: &str = "Passport";
pub const MEDICAL: &str = "Medical Certificate";
pub const BASIC_SAFETY: &str = "Basic Safety Training (BST)";
pub const ADVANCED_FIRE_FIGHTING: &str = "Advanced Fire Fighting (AFF)";
pub const SURVIVAL_CRAFT: &str = "Proficiency in Survival Craft and Rescue Boats (PSCRB)";
pub const FAST_RESCUE_BOAT: &str = "Fast Rescue Boat (FRB)";
pub const MEDICAL_FIRST_AID: &str = "Medical First Aid (MFA)";
pub const MEDICAL_CARE: &str = "Medical Care (MC)";
pub const SHIP_SECURITY_OFFICER: &str = "Ship Security Officer (SSO)";
pub const SECURITY_AWARENESS: &str = "Ship Security Awareness (SSA)";
pub const DESIGNATED_SECURITY_DUTIES: &str = "Designated Security Duties (DSD)";
pub const ECDIS: &str = "ECDIS";
pub const RADAR_ARPA: &str = "Radar Navigation / ARPA";
pub const BRIDGE_RESOURCE_MANAGEMENT: &str = "Bridge Resource Management (BRM)";
pub const ENGINE_RESOURCE_MANAGEMENT: &str = "Engine Resource Management (ERM)";
pub const TANKER_FAMILIARIZATION: &str = "Oil and Chemical Tanker Familiarization";
pub const ADVANCED_OIL_TANKER: &str = "Advanced Oil Tanker Operations";
pub const ADVANCED_CHEMICAL_TANKER: &str = "Advanced Chemical Tanker Operations";
pub const LIQUEFIED_GAS_TANKER: &str = "Liquefied Gas Tanker Operations";
pub const HIGH_VOLTAGE: &str = "High Voltage";
pub const CROWD_CRISIS_MANAGEMENT: &str = "Crowd and Crisis Management";
pub const YELLOW_FEVER: &str = "Yellow Fever Vaccination";

pub const UNKNOWN: &str = "Unknown";

pub const CANONICAL_TYPES: &[&str] = &[
    COMPETENCY,
    ENDORSEMENT,
    SEAMAN_BOOK,
    SEAMAN_BOOK_COC,
    SEAMAN_BOOK_GMDSS,
    GMDSS,
    PASSPORT,
    MEDICAL,
    BASIC_SAFETY,
    ADVANCED_FIRE_FIGHTING,
    SURVIVAL_CRAFT,
    FAST_RESCUE_BOAT,
    MEDICAL_FIRST_AID,
    MEDICAL_CARE,
    SHIP_SECURITY_OFFICER,
    SECURITY_AWARENESS,
    DESIGNATED_SECURITY_DUTIES,
    ECDIS,
    RADAR_ARPA,
    BRIDGE_RESOURCE_MANAGEMENT,
    ENGINE_RESOURCE_MANAGEMENT,
    TANKER_FAMILIARIZATION,
    ADVANCED_OIL_TANKER,
    ADVANCED_CHEMICAL_TANKER,
    LIQUEFIED_GAS_TANKER,
    HIGH_VOLTAGE,
    CROWD_CRISIS_MANAGEMENT,
    YELLOW_FEVER,
];

pub fn is_canonical(label: &str) -> bool {
    label == UNKNOWN || CANONICAL_TYPES.contains(&label)
}
