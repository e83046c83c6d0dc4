//! Monitored user profile record and its registration/edit form.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{HospitalId, Timestamp, UserId};
use crate::validation::{self, non_blank, FieldErrors};

/// Shape required of an id chosen on the registration form.
static LOGIN_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("valid regex")
});

/// Any id the backend may hand out that still fits in one URL path segment.
static PATH_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._~-]{1,64}$").expect("valid regex")
});

/// Static segments under `/users` that an id would shadow.
const RESERVED_USER_IDS: &[&str] = &["new"];

static DEVICE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9:_-]{1,64}$").expect("valid regex")
});

/// Height bounds in centimetres.
pub const HEIGHT_RANGE_CM: (f64, f64) = (50.0, 250.0);

/// Weight bounds in kilograms.
pub const WEIGHT_RANGE_KG: (f64, f64) = (10.0, 300.0);

/// Resting heart-rate bounds in bpm.
pub const RESTING_HR_RANGE: (i32, i32) = (30, 200);

const MAX_NAME_LEN: usize = 50;
const MAX_ADDRESS_LEN: usize = 200;
const MAX_NOTES_LEN: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Label shown in forms and detail pages.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "男性",
            Gender::Female => "女性",
            Gender::Other => "その他",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }
}

/// A monitored individual as exchanged with the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_kana: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_id: Option<HospitalId>,
    /// Resolved by the backend on reads; never sent back.
    #[serde(default, skip_serializing)]
    pub hospital_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<Timestamp>,
}

/// Whether `id` can be used as a `/users/{id}` path segment.
///
/// Looser than the registration rule: ids already stored in the backend may
/// predate it.
pub fn is_valid_user_id(id: &str) -> bool {
    PATH_ID_RE.is_match(id) && id != "." && id != ".."
}

impl User {
    /// Age in whole years as of the local date.
    pub fn age(&self) -> Option<u32> {
        self.age_on(chrono::Local::now().date_naive())
    }

    /// Age in whole years on `today`, when the birth date is known.
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = NaiveDate::parse_from_str(self.birth_date.as_deref()?, "%Y-%m-%d").ok()?;
        today.years_since(born)
    }
}

/// Raw registration/edit form submission. Every field arrives as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInput {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub name_kana: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub postal_code: Option<String>,
    pub address: Option<String>,
    pub hospital_id: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub height_cm: Option<String>,
    pub weight_kg: Option<String>,
    pub resting_heart_rate: Option<String>,
    pub device_id: Option<String>,
    pub gateway_id: Option<String>,
    pub notes: Option<String>,
}

fn owned(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}

impl UserInput {
    /// Prefill an edit form from a stored record.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: Some(user.user_id.clone()),
            name: Some(user.name.clone()),
            name_kana: user.name_kana.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            gender: user.gender.map(|g| g.as_str().to_string()),
            birth_date: user.birth_date.clone(),
            postal_code: user.postal_code.clone(),
            address: user.address.clone(),
            hospital_id: user.hospital_id.clone(),
            emergency_contact_name: user.emergency_contact_name.clone(),
            emergency_contact_phone: user.emergency_contact_phone.clone(),
            height_cm: user.height_cm.map(|v| v.to_string()),
            weight_kg: user.weight_kg.map(|v| v.to_string()),
            resting_heart_rate: user.resting_heart_rate.map(|v| v.to_string()),
            device_id: user.device_id.clone(),
            gateway_id: user.gateway_id.clone(),
            notes: user.notes.clone(),
        }
    }

    /// Validate a registration form against the local calendar date.
    pub fn validate(&self) -> Result<User, FieldErrors> {
        self.validate_on(chrono::Local::now().date_naive())
    }

    /// Validate a registration form and build the record to send to the
    /// backend. The chosen id must follow the login id rule.
    ///
    /// `today` bounds the birth date.
    pub fn validate_on(&self, today: NaiveDate) -> Result<User, FieldErrors> {
        let mut errors = FieldErrors::new();

        validation::require(&mut errors, "userId", self.user_id.as_deref(), "利用者ID");
        validation::check_pattern(
            &mut errors,
            "userId",
            self.user_id.as_deref(),
            &LOGIN_ID_RE,
            "利用者IDは3〜32文字の半角英数字・ハイフン・アンダースコアで入力してください",
        );
        if let Some(id) = non_blank(self.user_id.as_deref()) {
            if RESERVED_USER_IDS.contains(&id) {
                errors.insert("userId", format!("「{id}」は利用者IDとして使用できません"));
            }
        }

        let user_id = owned(&self.user_id).unwrap_or_default();
        self.validate_fields(errors, user_id, today)
    }

    /// Validate an edit form for the stored user `user_id`.
    ///
    /// The id is not editable, so it is taken as given and the submitted
    /// `userId` is ignored.
    pub fn validate_edit(&self, user_id: &str) -> Result<User, FieldErrors> {
        self.validate_edit_on(user_id, chrono::Local::now().date_naive())
    }

    pub fn validate_edit_on(&self, user_id: &str, today: NaiveDate) -> Result<User, FieldErrors> {
        self.validate_fields(FieldErrors::new(), user_id.to_string(), today)
    }

    fn validate_fields(
        &self,
        mut errors: FieldErrors,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<User, FieldErrors> {
        validation::require(&mut errors, "name", self.name.as_deref(), "氏名");
        validation::check_max_len(&mut errors, "name", self.name.as_deref(), MAX_NAME_LEN, "氏名");
        validation::check_kana(&mut errors, "nameKana", self.name_kana.as_deref());
        validation::check_email(&mut errors, "email", self.email.as_deref());
        validation::check_phone(&mut errors, "phone", self.phone.as_deref());

        let gender = match non_blank(self.gender.as_deref()) {
            None => None,
            Some(raw) => {
                let parsed = Gender::from_name(raw);
                if parsed.is_none() {
                    errors.insert("gender", "性別の値が正しくありません");
                }
                parsed
            }
        };

        validation::check_birth_date(&mut errors, "birthDate", self.birth_date.as_deref(), today);
        validation::check_postal_code(&mut errors, "postalCode", self.postal_code.as_deref());
        validation::check_max_len(
            &mut errors,
            "address",
            self.address.as_deref(),
            MAX_ADDRESS_LEN,
            "住所",
        );
        validation::check_max_len(
            &mut errors,
            "emergencyContactName",
            self.emergency_contact_name.as_deref(),
            MAX_NAME_LEN,
            "緊急連絡先氏名",
        );
        validation::check_phone(
            &mut errors,
            "emergencyContactPhone",
            self.emergency_contact_phone.as_deref(),
        );

        let height_cm: Option<f64> =
            validation::parse_number(&mut errors, "heightCm", self.height_cm.as_deref(), "身長");
        validation::check_range(
            &mut errors,
            "heightCm",
            height_cm,
            HEIGHT_RANGE_CM.0,
            HEIGHT_RANGE_CM.1,
            "身長",
        );
        let weight_kg: Option<f64> =
            validation::parse_number(&mut errors, "weightKg", self.weight_kg.as_deref(), "体重");
        validation::check_range(
            &mut errors,
            "weightKg",
            weight_kg,
            WEIGHT_RANGE_KG.0,
            WEIGHT_RANGE_KG.1,
            "体重",
        );
        let resting_heart_rate: Option<i32> = validation::parse_number(
            &mut errors,
            "restingHeartRate",
            self.resting_heart_rate.as_deref(),
            "安静時心拍数",
        );
        validation::check_range(
            &mut errors,
            "restingHeartRate",
            resting_heart_rate,
            RESTING_HR_RANGE.0,
            RESTING_HR_RANGE.1,
            "安静時心拍数",
        );

        let device_message = "機器IDは64文字以内の半角英数字と記号(:_-)で入力してください";
        validation::check_pattern(
            &mut errors,
            "deviceId",
            self.device_id.as_deref(),
            &DEVICE_ID_RE,
            device_message,
        );
        validation::check_pattern(
            &mut errors,
            "gatewayId",
            self.gateway_id.as_deref(),
            &DEVICE_ID_RE,
            device_message,
        );
        validation::check_max_len(
            &mut errors,
            "notes",
            self.notes.as_deref(),
            MAX_NOTES_LEN,
            "備考",
        );

        errors.into_result()?;

        Ok(User {
            user_id,
            name: owned(&self.name).unwrap_or_default(),
            name_kana: owned(&self.name_kana),
            email: owned(&self.email),
            phone: owned(&self.phone),
            gender,
            birth_date: owned(&self.birth_date),
            postal_code: owned(&self.postal_code),
            address: owned(&self.address),
            hospital_id: owned(&self.hospital_id),
            hospital_name: None,
            emergency_contact_name: owned(&self.emergency_contact_name),
            emergency_contact_phone: owned(&self.emergency_contact_phone),
            height_cm,
            weight_kg,
            resting_heart_rate,
            device_id: owned(&self.device_id),
            gateway_id: owned(&self.gateway_id),
            notes: owned(&self.notes),
            created_at: None,
            updated_at: None,
        })
    }
}
