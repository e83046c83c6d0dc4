//! Affiliated facility ("hospital" / office) record.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{HospitalId, Timestamp};
use crate::validation::{self, non_blank, FieldErrors};

static HOSPITAL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid regex")
});

const MAX_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    /// Empty on create; the backend assigns it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hospital_id: HospitalId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<Timestamp>,
}

/// Raw facility form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HospitalInput {
    pub name: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact_person: Option<String>,
}

fn owned(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}

impl HospitalInput {
    pub fn from_hospital(hospital: &Hospital) -> Self {
        Self {
            name: Some(hospital.name.clone()),
            postal_code: hospital.postal_code.clone(),
            address: hospital.address.clone(),
            phone: hospital.phone.clone(),
            email: hospital.email.clone(),
            contact_person: hospital.contact_person.clone(),
        }
    }

    /// Validate and build the record. `hospital_id` is empty for new facilities.
    pub fn validate(&self, hospital_id: &str) -> Result<Hospital, FieldErrors> {
        let mut errors = FieldErrors::new();

        validation::require(&mut errors, "name", self.name.as_deref(), "事業所名");
        validation::check_max_len(
            &mut errors,
            "name",
            self.name.as_deref(),
            MAX_NAME_LEN,
            "事業所名",
        );
        validation::check_postal_code(&mut errors, "postalCode", self.postal_code.as_deref());
        validation::check_max_len(
            &mut errors,
            "address",
            self.address.as_deref(),
            MAX_ADDRESS_LEN,
            "住所",
        );
        validation::check_phone(&mut errors, "phone", self.phone.as_deref());
        validation::check_email(&mut errors, "email", self.email.as_deref());
        validation::check_max_len(
            &mut errors,
            "contactPerson",
            self.contact_person.as_deref(),
            MAX_NAME_LEN,
            "担当者名",
        );

        errors.into_result()?;

        Ok(Hospital {
            hospital_id: hospital_id.to_string(),
            name: owned(&self.name).unwrap_or_default(),
            postal_code: owned(&self.postal_code),
            address: owned(&self.address),
            phone: owned(&self.phone),
            email: owned(&self.email),
            contact_person: owned(&self.contact_person),
            created_at: None,
            updated_at: None,
        })
    }
}

/// Whether `id` has the shape of a backend-assigned facility id.
pub fn is_valid_hospital_id(id: &str) -> bool {
    HOSPITAL_ID_RE.is_match(id)
}

/// Display name for a facility id, falling back to the id itself.
pub fn hospital_name<'a>(hospitals: &'a [Hospital], id: &'a str) -> &'a str {
    hospitals
        .iter()
        .find(|h| h.hospital_id == id)
        .map(|h| h.name.as_str())
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        let errors = HospitalInput::default().validate("").unwrap_err();
        assert_eq!(errors.get("name"), Some("事業所名は必須です"));
    }

    #[test]
    fn contact_fields_are_checked() {
        let input = HospitalInput {
            name: Some("みまもり訪問看護ステーション".into()),
            phone: Some("12345".into()),
            email: Some("office".into()),
            postal_code: Some("abc".into()),
            ..Default::default()
        };
        let errors = input.validate("").unwrap_err();
        assert!(errors.get("phone").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("postalCode").is_some());
    }

    #[test]
    fn new_facility_omits_id_in_json() {
        let hospital = HospitalInput {
            name: Some("中央病院".into()),
            ..Default::default()
        }
        .validate("")
        .unwrap();
        let json = serde_json::to_value(&hospital).unwrap();
        assert!(json.get("hospitalId").is_none());
        assert_eq!(json["name"], "中央病院");
    }

    #[test]
    fn hospital_id_shape() {
        assert!(is_valid_hospital_id("65f1c0a2e4b0"));
        assert!(is_valid_hospital_id("42"));
        assert!(!is_valid_hospital_id(""));
        assert!(!is_valid_hospital_id("a/b"));
    }

    #[test]
    fn lookup_falls_back_to_id() {
        let hospitals = vec![Hospital {
            hospital_id: "h1".into(),
            name: "中央病院".into(),
            ..Default::default()
        }];
        assert_eq!(hospital_name(&hospitals, "h1"), "中央病院");
        assert_eq!(hospital_name(&hospitals, "h9"), "h9");
    }
}
