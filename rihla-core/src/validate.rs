use crate::pii::Sensitive;
use crate::submission::{
    ContactInquiry, CustomPackageRequest, FlightInquiry, SubmissionKind, SubmissionRecord,
};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Flat field map as submitted by the form: field name to raw string value.
pub type FieldMap = HashMap<String, String>;

// RFC-5322-lite: one @, no whitespace, a dot somewhere in the domain part.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"));

/// A single field that failed validation, with a user-presentable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Non-empty set of field failures for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(pub Vec<FieldError>);

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|e| e.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

impl FieldErrors {
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

/// Validate one submission's raw fields against its kind's schema.
///
/// Rules run in the declared field order for the kind and every failing
/// field is reported; a typed record is produced only when the whole map is
/// clean. Pure function, no side effects.
pub fn validate(kind: SubmissionKind, fields: &FieldMap) -> Result<SubmissionRecord, FieldErrors> {
    match kind {
        SubmissionKind::Contact => validate_contact(fields).map(SubmissionRecord::Contact),
        SubmissionKind::FlightInquiry => {
            validate_flight_inquiry(fields).map(SubmissionRecord::FlightInquiry)
        }
        SubmissionKind::CustomPackage => {
            validate_custom_package(fields).map(SubmissionRecord::CustomPackage)
        }
    }
}

fn validate_contact(fields: &FieldMap) -> Result<ContactInquiry, FieldErrors> {
    let mut check = FieldCheck::new(fields);
    let name = check.required("name");
    let email = check.optional_email("email");
    let phone = check.required("phone");
    let subject = check.required("subject");
    let message = check.required("message");
    check.finish()?;
    Ok(ContactInquiry {
        name,
        email: email.map(Sensitive::new),
        phone: Sensitive::new(phone),
        subject,
        message,
    })
}

fn validate_flight_inquiry(fields: &FieldMap) -> Result<FlightInquiry, FieldErrors> {
    let mut check = FieldCheck::new(fields);
    let departure_city = check.required("departure_city");
    let arrival_city = check.required("arrival_city");
    let departure_date = check.required("departure_date");
    let return_date = check.optional("return_date");
    let adults = check.count("adults", 1, 1);
    let children = check.count("children", 0, 0);
    let infants = check.count("infants", 0, 0);
    let contact_name = check.required("contact_name");
    let contact_phone = check.required("contact_phone");
    let contact_email = check.optional_email("contact_email");
    check.finish()?;
    Ok(FlightInquiry {
        departure_city,
        arrival_city,
        departure_date,
        return_date,
        adults,
        children,
        infants,
        contact_name,
        contact_phone: Sensitive::new(contact_phone),
        contact_email: contact_email.map(Sensitive::new),
    })
}

fn validate_custom_package(fields: &FieldMap) -> Result<CustomPackageRequest, FieldErrors> {
    let mut check = FieldCheck::new(fields);
    let name = check.required("name");
    let phone_no = check.required("phone_no");
    let email = check.optional_email("email");
    let departure_city = check.required("departure_city");
    let budget = check.optional("budget");
    let details = check.optional("details");
    check.finish()?;
    Ok(CustomPackageRequest {
        name,
        phone_no: Sensitive::new(phone_no),
        email: email.map(Sensitive::new),
        departure_city,
        budget,
        details,
    })
}

/// Accumulates per-field failures while extracting trimmed values, so one
/// pass both reads the map and collects every error. On any failure the
/// placeholder values returned by the accessors are discarded by `finish`.
struct FieldCheck<'a> {
    fields: &'a FieldMap,
    errors: Vec<FieldError>,
}

impl<'a> FieldCheck<'a> {
    fn new(fields: &'a FieldMap) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    fn raw(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.trim())
    }

    fn fail(&mut self, name: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: name.to_string(),
            message: message.into(),
        });
    }

    /// Required non-empty string after trimming.
    fn required(&mut self, name: &str) -> String {
        match self.raw(name) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                self.fail(name, format!("{} is required", label(name)));
                String::new()
            }
        }
    }

    /// Optional string; absent or blank folds to `None`.
    fn optional(&mut self, name: &str) -> Option<String> {
        self.raw(name).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Optional email; blank folds to `None`, non-blank must parse.
    fn optional_email(&mut self, name: &str) -> Option<String> {
        let value = self.optional(name)?;
        if EMAIL_RE.is_match(&value) {
            Some(value)
        } else {
            self.fail(name, "Invalid email address");
            None
        }
    }

    /// Integer count coerced from the raw string, defaulting when absent or
    /// blank, rejecting non-numeric input and values below `min`.
    fn count(&mut self, name: &str, min: i32, default: i32) -> i32 {
        let Some(raw) = self.raw(name).filter(|v| !v.is_empty()) else {
            return default;
        };
        match raw.parse::<i32>() {
            Ok(n) if n >= min => n,
            Ok(_) => {
                self.fail(name, format!("{} must be at least {min}", label(name)));
                default
            }
            Err(_) => {
                self.fail(name, format!("{} must be a number", label(name)));
                default
            }
        }
    }

    fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FieldErrors(self.errors))
        }
    }
}

/// "contact_phone" -> "Contact phone", for user-facing reasons.
fn label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn contact_fields() -> FieldMap {
        fields(&[
            ("name", "Ali"),
            ("email", "ali@example.com"),
            ("phone", "0300-1234567"),
            ("subject", "Umrah packages"),
            ("message", "Looking for a family package."),
        ])
    }

    fn flight_fields() -> FieldMap {
        fields(&[
            ("departure_city", "Lahore"),
            ("arrival_city", "Jeddah"),
            ("departure_date", "2025-10-01"),
            ("contact_name", "Ali"),
            ("contact_phone", "0300-1234567"),
        ])
    }

    #[test]
    fn valid_contact_produces_typed_record() {
        let record = validate(SubmissionKind::Contact, &contact_fields()).unwrap();
        let SubmissionRecord::Contact(contact) = record else {
            panic!("wrong record kind");
        };
        assert_eq!(contact.name, "Ali");
        assert_eq!(contact.email.unwrap().into_inner(), "ali@example.com");
    }

    #[test]
    fn each_missing_required_field_is_reported() {
        for missing in ["name", "phone", "subject", "message"] {
            let mut map = contact_fields();
            map.remove(missing);
            let errors = validate(SubmissionKind::Contact, &map).unwrap_err();
            assert!(errors.contains(missing), "expected error for {missing}");
        }
    }

    #[test]
    fn whitespace_only_required_field_is_rejected() {
        let mut map = contact_fields();
        map.insert("subject".into(), "   ".into());
        let errors = validate(SubmissionKind::Contact, &map).unwrap_err();
        assert!(errors.contains("subject"));
    }

    #[test]
    fn empty_optional_email_folds_to_absent() {
        let mut map = contact_fields();
        map.insert("email".into(), "".into());
        let record = validate(SubmissionKind::Contact, &map).unwrap();
        let SubmissionRecord::Contact(contact) = record else {
            panic!("wrong record kind");
        };
        assert!(contact.email.is_none());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut map = contact_fields();
        map.insert("email".into(), "not-an-email".into());
        let errors = validate(SubmissionKind::Contact, &map).unwrap_err();
        assert!(errors.contains("email"));
    }

    #[test]
    fn all_failures_are_collected_in_one_pass() {
        let map = fields(&[("email", "bad"), ("phone", "0300")]);
        let errors = validate(SubmissionKind::Contact, &map).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("email"));
        assert!(errors.contains("subject"));
        assert!(errors.contains("message"));
        assert!(!errors.contains("phone"));
    }

    #[test]
    fn passenger_counts_default_when_absent() {
        let record = validate(SubmissionKind::FlightInquiry, &flight_fields()).unwrap();
        let SubmissionRecord::FlightInquiry(inquiry) = record else {
            panic!("wrong record kind");
        };
        assert_eq!(inquiry.adults, 1);
        assert_eq!(inquiry.children, 0);
        assert_eq!(inquiry.infants, 0);
        assert!(inquiry.return_date.is_none());
    }

    #[test]
    fn zero_adults_is_rejected() {
        let mut map = flight_fields();
        map.insert("adults".into(), "0".into());
        let errors = validate(SubmissionKind::FlightInquiry, &map).unwrap_err();
        assert!(errors.contains("adults"));
    }

    #[test]
    fn non_numeric_adults_is_rejected() {
        let mut map = flight_fields();
        map.insert("adults".into(), "abc".into());
        let errors = validate(SubmissionKind::FlightInquiry, &map).unwrap_err();
        assert!(errors.contains("adults"));
    }

    #[test]
    fn zero_children_is_accepted() {
        let mut map = flight_fields();
        map.insert("children".into(), "0".into());
        map.insert("adults".into(), "2".into());
        let record = validate(SubmissionKind::FlightInquiry, &map).unwrap();
        let SubmissionRecord::FlightInquiry(inquiry) = record else {
            panic!("wrong record kind");
        };
        assert_eq!(inquiry.adults, 2);
        assert_eq!(inquiry.children, 0);
    }

    #[test]
    fn custom_package_optional_fields_fold_to_absent() {
        let map = fields(&[
            ("name", "Sara"),
            ("phone_no", "0301-7654321"),
            ("email", ""),
            ("departure_city", "Karachi"),
            ("budget", ""),
        ]);
        let record = validate(SubmissionKind::CustomPackage, &map).unwrap();
        let SubmissionRecord::CustomPackage(request) = record else {
            panic!("wrong record kind");
        };
        assert!(request.email.is_none());
        assert!(request.budget.is_none());
        assert!(request.details.is_none());
    }

    #[test]
    fn custom_package_missing_required_fields() {
        let errors = validate(SubmissionKind::CustomPackage, &FieldMap::new()).unwrap_err();
        assert!(errors.contains("name"));
        assert!(errors.contains("phone_no"));
        assert!(errors.contains("departure_city"));
    }
}
