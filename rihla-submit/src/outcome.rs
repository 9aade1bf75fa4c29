use rihla_core::{FieldErrors, FieldMap, SubmissionKind};
use serde::Serialize;

/// Terminal result of one submission attempt. Every variant is final for
/// the attempt; a resubmission is a fresh attempt with fresh input.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded(SubmissionKind),
    Rejected(Rejection),
    Failed(Failure),
}

/// The attempt was turned away before any write happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// No verification token was supplied; the client challenge likely had
    /// not finished loading. The verifier is never called in this case.
    MissingToken,
    /// The verification service failed, said no, or scored below threshold.
    VerificationFailed,
    /// One or more fields failed schema rules.
    InvalidInput(FieldErrors),
}

/// The attempt passed all checks but could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The repository insert failed. Details stay in the logs.
    Storage,
    /// Something outside the known taxonomy escaped; contained at the
    /// orchestrator boundary.
    Unexpected,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Client-visible result contract: a success flag and a user-safe message.
/// Never carries raw verifier or storage internals.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionReply {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

/// Map an outcome onto the uniform client contract. Message selection is a
/// pure function of the outcome kind.
pub fn project(outcome: &SubmissionOutcome) -> SubmissionReply {
    match outcome {
        SubmissionOutcome::Succeeded(kind) => SubmissionReply {
            success: true,
            message: success_message(*kind).to_string(),
            field_errors: None,
        },
        SubmissionOutcome::Rejected(Rejection::MissingToken) => SubmissionReply {
            success: false,
            message: "Verification is not ready yet. Please try again.".to_string(),
            field_errors: None,
        },
        SubmissionOutcome::Rejected(Rejection::VerificationFailed) => SubmissionReply {
            success: false,
            message: "Verification failed. Please try again.".to_string(),
            field_errors: None,
        },
        SubmissionOutcome::Rejected(Rejection::InvalidInput(errors)) => SubmissionReply {
            success: false,
            message: "Please check your inputs and try again.".to_string(),
            field_errors: Some(errors.clone()),
        },
        SubmissionOutcome::Failed(Failure::Storage) => SubmissionReply {
            success: false,
            message: "Failed to submit. Please try again.".to_string(),
            field_errors: None,
        },
        SubmissionOutcome::Failed(Failure::Unexpected) => SubmissionReply {
            success: false,
            message: "Something went wrong. Please try again.".to_string(),
            field_errors: None,
        },
    }
}

fn success_message(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Contact => "Your message has been sent successfully!",
        SubmissionKind::FlightInquiry => {
            "Inquiry submitted successfully! Our team will get back to you shortly."
        }
        SubmissionKind::CustomPackage => {
            "Request submitted successfully! We will get back to you with a quote."
        }
    }
}

// ============================================================================
// Form lifecycle
// ============================================================================

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

/// Notice shown to the visitor once an attempt settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    /// A submission is already in flight; the submit control stays disabled
    /// until it settles, which is the duplicate-click suppression.
    #[error("a submission is already in flight")]
    AlreadySubmitting,
}

/// Explicit state machine for the client form: `Idle` → `Submitting` →
/// `Idle` with a notice. Success clears the captured fields; failure keeps
/// them so the visitor can correct and resubmit.
#[derive(Debug, Default)]
pub struct FormController {
    fields: FieldMap,
    phase: FormPhase,
    notice: Option<Notice>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// Transition `Idle` → `Submitting`, handing back a snapshot of the
    /// captured fields for the attempt. Refused while already in flight.
    pub fn begin(&mut self) -> Result<FieldMap, FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.phase = FormPhase::Submitting;
        self.notice = None;
        Ok(self.fields.clone())
    }

    /// Transition back to `Idle` with the settled reply, resetting the form
    /// on success and preserving it on failure.
    pub fn finish(&mut self, reply: &SubmissionReply) {
        self.phase = FormPhase::Idle;
        if reply.success {
            self.fields.clear();
            self.notice = Some(Notice::Success(reply.message.clone()));
        } else {
            self.notice = Some(Notice::Error(reply.message.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rihla_core::FieldError;

    #[test]
    fn success_reply_is_user_safe_per_kind() {
        let reply = project(&SubmissionOutcome::Succeeded(SubmissionKind::Contact));
        assert!(reply.success);
        assert_eq!(reply.message, "Your message has been sent successfully!");
        assert!(reply.field_errors.is_none());
    }

    #[test]
    fn storage_failure_message_leaks_nothing() {
        let reply = project(&SubmissionOutcome::Failed(Failure::Storage));
        assert!(!reply.success);
        assert_eq!(reply.message, "Failed to submit. Please try again.");
    }

    #[test]
    fn invalid_input_reply_carries_field_errors() {
        let errors = FieldErrors(vec![FieldError {
            field: "name".into(),
            message: "Name is required".into(),
        }]);
        let reply = project(&SubmissionOutcome::Rejected(Rejection::InvalidInput(errors)));
        assert!(!reply.success);
        assert!(reply.field_errors.is_some());
    }

    #[test]
    fn reply_serializes_to_flag_and_message() {
        let reply = project(&SubmissionOutcome::Rejected(Rejection::MissingToken));
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("field_errors").is_none());
    }

    #[test]
    fn form_lifecycle_success_resets_fields() {
        let mut form = FormController::new();
        form.set_field("name", "Ali");
        assert_eq!(form.phase(), FormPhase::Idle);

        let snapshot = form.begin().unwrap();
        assert_eq!(snapshot.get("name").map(String::as_str), Some("Ali"));
        assert_eq!(form.phase(), FormPhase::Submitting);

        form.finish(&project(&SubmissionOutcome::Succeeded(
            SubmissionKind::Contact,
        )));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(form.fields().is_empty());
        assert!(matches!(form.notice(), Some(Notice::Success(_))));
    }

    #[test]
    fn form_lifecycle_failure_preserves_fields() {
        let mut form = FormController::new();
        form.set_field("name", "Ali");
        form.begin().unwrap();
        form.finish(&project(&SubmissionOutcome::Failed(Failure::Storage)));
        assert_eq!(form.fields().get("name").map(String::as_str), Some("Ali"));
        assert!(matches!(form.notice(), Some(Notice::Error(_))));
    }

    #[test]
    fn double_click_is_refused_while_in_flight() {
        let mut form = FormController::new();
        form.begin().unwrap();
        assert_eq!(form.begin(), Err(FormError::AlreadySubmitting));
    }
}
