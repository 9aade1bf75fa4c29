use crate::pii::Sensitive;
use serde::{Deserialize, Serialize};

/// Tag selecting one of the three inbound form schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Contact,
    FlightInquiry,
    CustomPackage,
}

impl SubmissionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::FlightInquiry => "flight_inquiry",
            Self::CustomPackage => "custom_package",
        }
    }
}

/// General contact form message.
///
/// Email is optional: the form marks it required client-side, but an empty
/// value is accepted and stored as absent rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub name: String,
    pub email: Option<Sensitive<String>>,
    pub phone: Sensitive<String>,
    pub subject: String,
    pub message: String,
}

/// Flight search request from the inquiry form. Passenger counts arrive as
/// strings and are coerced during validation; dates stay as the raw strings
/// the date picker produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightInquiry {
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub adults: i32,
    pub children: i32,
    pub infants: i32,
    pub contact_name: String,
    pub contact_phone: Sensitive<String>,
    pub contact_email: Option<Sensitive<String>>,
}

/// Request for a custom travel package quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPackageRequest {
    pub name: String,
    pub phone_no: Sensitive<String>,
    pub email: Option<Sensitive<String>>,
    pub departure_city: String,
    pub budget: Option<String>,
    pub details: Option<String>,
}

/// A fully validated record ready for its single insert. Once handed to the
/// repository it is never mutated or deleted by this subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionRecord {
    Contact(ContactInquiry),
    FlightInquiry(FlightInquiry),
    CustomPackage(CustomPackageRequest),
}

impl SubmissionRecord {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Self::Contact(_) => SubmissionKind::Contact,
            Self::FlightInquiry(_) => SubmissionKind::FlightInquiry,
            Self::CustomPackage(_) => SubmissionKind::CustomPackage,
        }
    }
}
