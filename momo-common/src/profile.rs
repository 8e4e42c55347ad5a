//! User profile supplied with each memory request
//!
//! Every field is free text. The literal value `"0"` means the user does
//! not remember that detail; it is treated the same as an empty field and
//! must never reach a generated prompt.

use serde::{Deserialize, Serialize};

/// Value the client sends for a detail the user cannot remember
pub const NOT_REMEMBERED: &str = "0";

/// Biographical and sensory details for one memory
///
/// Field names match the JSON keys the web client sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub gender: String,
    pub age: String,
    pub occupation: String,
    #[serde(rename = "relationship_with_person")]
    pub relationship: String,
    #[serde(rename = "how_you_refer_to_person")]
    pub referral: String,
    #[serde(rename = "event_involving_person")]
    pub event: String,
    #[serde(rename = "place_where_event_occured")]
    pub place: String,
    pub visual_detail: String,
    pub auditory_detail: String,
    pub tactile_detail: String,
}

/// Returns the trimmed value if the user remembers it
pub fn remembered(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NOT_REMEMBERED {
        None
    } else {
        Some(trimmed)
    }
}

impl UserProfile {
    /// True when no sensory detail is remembered
    pub fn has_no_sensory_details(&self) -> bool {
        remembered(&self.visual_detail).is_none()
            && remembered(&self.auditory_detail).is_none()
            && remembered(&self.tactile_detail).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remembered_filters_sentinel_and_blank() {
        assert_eq!(remembered("0"), None);
        assert_eq!(remembered(" 0 "), None);
        assert_eq!(remembered(""), None);
        assert_eq!(remembered("   "), None);
        assert_eq!(remembered(" the park "), Some("the park"));
        assert_eq!(remembered("10"), Some("10"));
    }

    #[test]
    fn test_deserialize_uses_client_field_names() {
        let json = r#"{
            "gender": "woman",
            "relationship_with_person": "daughter",
            "how_you_refer_to_person": "Anna",
            "place_where_event_occured": "the park",
            "visual_detail": "0"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.gender, "woman");
        assert_eq!(profile.relationship, "daughter");
        assert_eq!(profile.referral, "Anna");
        assert_eq!(profile.place, "the park");
        assert_eq!(profile.age, "");
        assert!(profile.has_no_sensory_details());
    }
}
