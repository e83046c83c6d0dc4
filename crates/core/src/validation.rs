//! Shared form validation helpers.
//!
//! Each form validator collects every problem into a [`FieldErrors`] map so
//! the page can show all messages next to their inputs at once, instead of
//! failing on the first one.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use validator::ValidateEmail;


static KANA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ァ-ヶー・\s]+$").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[0-9-]+$").expect("valid regex"));

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}-?\d{4}$").expect("valid regex"));

/// Earliest birth date accepted by the registration form.
const MIN_BIRTH_DATE: (i32, u32, u32) = (1900, 1, 1);

// ---------------------------------------------------------------------------
// FieldErrors
// ---------------------------------------------------------------------------

/// Ordered field → message map produced by form validation.
///
/// Only the first message per field is kept; later checks on a field that
/// already failed are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.entries.push((field.to_string(), message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// All messages joined into one line, for toasts and JSON errors.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|(_, m)| m.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

/// Trimmed value, or `None` for a blank string.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn require(errors: &mut FieldErrors, field: &str, value: Option<&str>, label: &str) {
    if non_blank(value).is_none() {
        errors.insert(field, format!("{label}は必須です"));
    }
}

pub fn check_pattern(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    pattern: &Regex,
    message: &str,
) {
    if let Some(v) = non_blank(value) {
        if !pattern.is_match(v) {
            errors.insert(field, message);
        }
    }
}

pub fn check_max_len(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
    label: &str,
) {
    if let Some(v) = non_blank(value) {
        if v.chars().count() > max {
            errors.insert(field, format!("{label}は{max}文字以内で入力してください"));
        }
    }
}

pub fn check_email(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(v) = non_blank(value) {
        if !v.validate_email() {
            errors.insert(field, "メールアドレスの形式が正しくありません");
        }
    }
}

/// Japanese domestic numbers: digits and hyphens, 10–11 digits, leading `0`.
pub fn check_phone(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(v) = non_blank(value) {
        let digits = v.chars().filter(char::is_ascii_digit).count();
        if !PHONE_RE.is_match(v) || !(10..=11).contains(&digits) {
            errors.insert(field, "電話番号の形式が正しくありません（例: 090-1234-5678）");
        }
    }
}

pub fn check_postal_code(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    check_pattern(
        errors,
        field,
        value,
        &POSTAL_CODE_RE,
        "郵便番号の形式が正しくありません（例: 123-4567）",
    );
}

pub fn check_kana(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    check_pattern(errors, field, value, &KANA_RE, "フリガナは全角カタカナで入力してください");
}

/// `YYYY-MM-DD`, a real calendar date, between 1900-01-01 and `today`.
pub fn check_birth_date(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    today: NaiveDate,
) {
    let Some(v) = non_blank(value) else {
        return;
    };
    match NaiveDate::parse_from_str(v, "%Y-%m-%d") {
        Ok(date) => {
            let (y, m, d) = MIN_BIRTH_DATE;
            let earliest = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
            if date > today {
                errors.insert(field, "生年月日に未来の日付は指定できません");
            } else if date < earliest {
                errors.insert(field, "生年月日が古すぎます");
            }
        }
        Err(_) => errors.insert(field, "生年月日の形式が正しくありません（例: 1950-04-01）"),
    }
}

/// Inclusive range check for an optional numeric value.
pub fn check_range<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<T>,
    min: T,
    max: T,
    label: &str,
) where
    T: PartialOrd + Display + Copy,
{
    if let Some(v) = value {
        if v < min || v > max {
            errors.insert(field, format!("{label}は{min}〜{max}の範囲で入力してください"));
        }
    }
}

/// Require `lower < upper` when both bounds are present.
pub fn check_ordered<T>(
    errors: &mut FieldErrors,
    field: &str,
    lower: Option<T>,
    upper: Option<T>,
    label: &str,
) where
    T: PartialOrd + Copy,
{
    if let (Some(lo), Some(hi)) = (lower, upper) {
        if lo >= hi {
            errors.insert(field, format!("{label}の下限は上限より小さくしてください"));
        }
    }
}

/// A number that can be read from a form field.
pub trait FormNumber: FromStr {
    /// `false` for values that parse but are not usable numbers.
    fn is_finite(&self) -> bool {
        true
    }
}

impl FormNumber for i32 {}

impl FormNumber for f64 {
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

/// Parse an optional numeric form input.
///
/// Blank input is `None`. Unparseable input, or `NaN` and infinities, records
/// an error and also yields `None`.
pub fn parse_number<T: FormNumber>(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
    label: &str,
) -> Option<T> {
    let v = non_blank(raw)?;
    match v.parse::<T>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            errors.insert(field, format!("{label}には数値を入力してください"));
            None
        }
    }
}
