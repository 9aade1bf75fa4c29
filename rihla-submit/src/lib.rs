pub mod orchestrator;
pub mod outcome;
pub mod verifier;

pub use orchestrator::{MemoryRepository, SubmissionPipeline};
pub use outcome::{
    project, Failure, FormController, FormError, FormPhase, Notice, Rejection, SubmissionOutcome,
    SubmissionReply,
};
pub use verifier::{HttpAbuseVerifier, StaticVerifier, VerifierSettings};
