pub mod pii;
pub mod repository;
pub mod submission;
pub mod validate;
pub mod verifier;

pub use pii::Sensitive;
pub use repository::{StorageError, SubmissionRepository};
pub use submission::{
    ContactInquiry, CustomPackageRequest, FlightInquiry, SubmissionKind, SubmissionRecord,
};
pub use validate::{validate, FieldError, FieldErrors, FieldMap};
pub use verifier::{evaluate_verdict, AbuseVerifier, TrustScore, VerifyError, DEFAULT_MIN_SCORE};
