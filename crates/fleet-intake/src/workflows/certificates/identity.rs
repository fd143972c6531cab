//! Cross-identity guard comparing extracted identity fields against the authoritative entity.
//!
//! Missing data on either side never blocks. Differing data blocks unless the caller passes
//! an explicit bypass, in which case the verdict is downgraded and an audit entry is logged.

use serde::{Deserialize, Serialize};
use tracing::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::dates::parse_calendar_date;
use super::domain::{AuthoritativeEntity, EntityId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    Matched,
    HolderNameMismatch,
    DateOfBirthMismatch,
    ImoMismatch,
    ShipNameDiffers,
    Bypassed,
    InsufficientData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchDetails {
    pub extracted: Option<String>,
    pub authoritative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualMessage {
    pub en: String,
    pub vi: String,
}

impl BilingualMessage {
    fn new(en: impl Into<String>, vi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            vi: vi.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchVerdict {
    pub blocked: bool,
    pub reason: MismatchReason,
    pub details: MismatchDetails,
    pub message: BilingualMessage,
    /// Reference-only annotation to persist with the record. Never blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<BilingualMessage>,
}

impl MismatchVerdict {
    fn matched(details: MismatchDetails) -> Self {
        Self {
            blocked: false,
            reason: MismatchReason::Matched,
            details,
            message: BilingualMessage::new("Identity confirmed", "Thông tin nhận dạng khớp"),
            note: None,
        }
    }

    fn insufficient(details: MismatchDetails) -> Self {
        Self {
            blocked: false,
            reason: MismatchReason::InsufficientData,
            details,
            message: BilingualMessage::new(
                "Not enough data to verify identity; accepted",
                "Không đủ dữ liệu để xác minh; vẫn chấp nhận",
            ),
            note: None,
        }
    }

    fn block(reason: MismatchReason, details: MismatchDetails, message: BilingualMessage) -> Self {
        Self {
            blocked: true,
            reason,
            details,
            message,
            note: None,
        }
    }
}

/// Which identity check a verdict came from, for audit logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardKind {
    Holder,
    Ship,
}

impl GuardKind {
    fn as_str(&self) -> &'static str {
        match self {
            GuardKind::Holder => "holder",
            GuardKind::Ship => "ship",
        }
    }
}

/// Stateless guard; the entity id is only used for audit entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGuard;

impl IdentityGuard {
    pub fn new() -> Self {
        Self
    }

    /// Holder name (order-insensitive, alternate transliteration accepted), then date of birth.
    pub fn check_holder(
        &self,
        entity_id: &EntityId,
        extracted_name: Option<&str>,
        extracted_dob: Option<&str>,
        authoritative: &AuthoritativeEntity,
        bypass: bool,
    ) -> MismatchVerdict {
        let verdict = evaluate_holder(extracted_name, extracted_dob, authoritative);
        apply_bypass(GuardKind::Holder, entity_id, verdict, bypass)
    }

    /// IMO decides vessel identity; a differing name under the same IMO only earns a note.
    pub fn check_ship(
        &self,
        entity_id: &EntityId,
        extracted_ship_name: Option<&str>,
        extracted_imo: Option<&str>,
        authoritative: &AuthoritativeEntity,
        bypass: bool,
    ) -> MismatchVerdict {
        let verdict = evaluate_ship(extracted_ship_name, extracted_imo, authoritative);
        apply_bypass(GuardKind::Ship, entity_id, verdict, bypass)
    }
}

/// True when both names consist of the same multiset of tokens, ignoring order, case and punctuation.
pub fn names_match(left: &str, right: &str) -> bool {
    let left = name_tokens(left);
    !left.is_empty() && left == name_tokens(right)
}

/// Accented and unaccented spellings ("Nguyễn", "NGUYEN") compare equal.
fn name_tokens(name: &str) -> Vec<String> {
    let cleaned: String = name
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .map(|ch| match ch {
            'Đ' => 'D',
            'đ' => 'd',
            ch if ch.is_alphanumeric() => ch,
            _ => ' ',
        })
        .collect();
    let mut tokens: Vec<String> = cleaned.split_whitespace().map(str::to_uppercase).collect();
    tokens.sort();
    tokens
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn evaluate_holder(
    extracted_name: Option<&str>,
    extracted_dob: Option<&str>,
    authoritative: &AuthoritativeEntity,
) -> MismatchVerdict {
    let name_details = MismatchDetails {
        extracted: non_blank(extracted_name).map(str::to_string),
        authoritative: non_blank(Some(authoritative.name.as_str())).map(str::to_string),
    };

    let (Some(extracted), Some(expected)) = (
        name_details.extracted.as_deref(),
        name_details.authoritative.as_deref(),
    ) else {
        return MismatchVerdict::insufficient(name_details);
    };

    let alternate_ok = authoritative
        .name_alt
        .as_deref()
        .is_some_and(|alt| names_match(extracted, alt));

    if !names_match(extracted, expected) && !alternate_ok {
        let message = BilingualMessage::new(
            format!("Holder name '{extracted}' does not match crew record '{expected}'"),
            format!("Tên chủ chứng chỉ '{extracted}' không khớp với hồ sơ thuyền viên '{expected}'"),
        );
        return MismatchVerdict::block(MismatchReason::HolderNameMismatch, name_details, message);
    }

    let dob_details = MismatchDetails {
        extracted: non_blank(extracted_dob).map(str::to_string),
        authoritative: non_blank(authoritative.date_of_birth.as_deref()).map(str::to_string),
    };
    let extracted_dob = dob_details.extracted.as_deref().and_then(parse_calendar_date);
    let expected_dob = dob_details
        .authoritative
        .as_deref()
        .and_then(parse_calendar_date);

    let differs = match (extracted_dob, expected_dob) {
        (Some(found), Some(expected)) => found != expected,
        // One side is unreadable; fall back to comparing the printed values.
        _ => match (dob_details.extracted.as_deref(), dob_details.authoritative.as_deref()) {
            (Some(found), Some(expected)) => found.to_uppercase() != expected.to_uppercase(),
            _ => false,
        },
    };

    if differs {
        let found = extracted_dob
            .map(|date| date.to_string())
            .or_else(|| dob_details.extracted.clone())
            .unwrap_or_default();
        let expected = expected_dob
            .map(|date| date.to_string())
            .or_else(|| dob_details.authoritative.clone())
            .unwrap_or_default();
        let message = BilingualMessage::new(
            format!("Date of birth {found} does not match crew record {expected}"),
            format!("Ngày sinh {found} không khớp với hồ sơ thuyền viên {expected}"),
        );
        return MismatchVerdict::block(MismatchReason::DateOfBirthMismatch, dob_details, message);
    }

    MismatchVerdict::matched(name_details)
}

fn imo_digits(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

fn ship_name_key(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn evaluate_ship(
    extracted_ship_name: Option<&str>,
    extracted_imo: Option<&str>,
    authoritative: &AuthoritativeEntity,
) -> MismatchVerdict {
    let imo_details = MismatchDetails {
        extracted: non_blank(extracted_imo).map(str::to_string),
        authoritative: non_blank(authoritative.imo.as_deref()).map(str::to_string),
    };

    let found = imo_details.extracted.as_deref().and_then(imo_digits);
    let expected = imo_details.authoritative.as_deref().and_then(imo_digits);
    let (Some(found), Some(expected)) = (found, expected) else {
        return MismatchVerdict::insufficient(imo_details);
    };

    if found != expected {
        let message = BilingualMessage::new(
            format!("IMO {found} belongs to a different vessel than IMO {expected}"),
            format!("Số IMO {found} thuộc tàu khác với IMO {expected}"),
        );
        return MismatchVerdict::block(MismatchReason::ImoMismatch, imo_details, message);
    }

    let Some(extracted_name) = non_blank(extracted_ship_name) else {
        return MismatchVerdict::matched(imo_details);
    };
    let expected_name = authoritative.name.trim();
    if expected_name.is_empty() || ship_name_key(extracted_name) == ship_name_key(expected_name) {
        return MismatchVerdict::matched(imo_details);
    }

    let note = BilingualMessage::new(
        format!(
            "Certificate names the ship '{extracted_name}'; registered as '{expected_name}' (IMO {expected}). Reference only."
        ),
        format!(
            "Chứng chỉ ghi tên tàu '{extracted_name}'; tên đăng ký '{expected_name}' (IMO {expected}). Chỉ để tham khảo."
        ),
    );
    MismatchVerdict {
        blocked: false,
        reason: MismatchReason::ShipNameDiffers,
        details: MismatchDetails {
            extracted: Some(extracted_name.to_string()),
            authoritative: Some(expected_name.to_string()),
        },
        message: BilingualMessage::new(
            "Same IMO, different ship name; accepted",
            "Cùng số IMO, khác tên tàu; vẫn chấp nhận",
        ),
        note: Some(note),
    }
}

fn apply_bypass(
    kind: GuardKind,
    entity_id: &EntityId,
    verdict: MismatchVerdict,
    bypass: bool,
) -> MismatchVerdict {
    if !bypass {
        return verdict;
    }

    warn!(
        guard = kind.as_str(),
        entity_id = %entity_id.0,
        would_block = verdict.blocked,
        reason = ?verdict.reason,
        extracted = verdict.details.extracted.as_deref().unwrap_or(""),
        authoritative = verdict.details.authoritative.as_deref().unwrap_or(""),
        "identity check bypassed by caller"
    );

    if !verdict.blocked {
        return verdict;
    }

    MismatchVerdict {
        blocked: false,
        reason: MismatchReason::Bypassed,
        message: BilingualMessage::new(
            format!("Override accepted: {}", verdict.message.en),
            format!("Đã bỏ qua kiểm tra: {}", verdict.message.vi),
        ),
        ..verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_tokens_ignore_punctuation_and_case() {
        assert!(names_match("Tran, Van-A", "a tran van"));
        assert!(!names_match("", ""));
    }
}
