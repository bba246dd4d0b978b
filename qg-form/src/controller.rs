//! Submission Form Controller
//!
//! Owns the workflow step, the draft, the inline error message and the
//! confirmed position. Email validation runs synchronously on submit, never
//! on keystrokes. No retries, no cancellation.
//!
//! On submission failure the workflow returns to the email step and the
//! profile typed on step two is discarded; the email is kept so the user can
//! retry. Whether the profile should survive a failure is an open product
//! question, so this keeps the long-standing behavior.

use qg_common::{validate_email, ProfileField, WaitlistSubmission};
use thiserror::Error;
use tracing::{debug, warn};

use crate::client::{ClientError, IntakeClient};
use crate::draft::{DisplayPosition, SubmissionDraft};
use crate::workflow::{transition, WorkflowEvent, WorkflowStep};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Controller operation errors
#[derive(Debug, Error)]
pub enum FormError {
    /// Operation not available on the current step
    #[error("Cannot {action} from the {step} step")]
    InvalidStep {
        action: &'static str,
        step: WorkflowStep,
    },

    /// Submission reached the service path and failed
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Multi-step waitlist form
pub struct FormController<C> {
    client: C,
    step: WorkflowStep,
    draft: SubmissionDraft,
    error: Option<String>,
    position: Option<DisplayPosition>,
}

impl<C: IntakeClient> FormController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            step: WorkflowStep::default(),
            draft: SubmissionDraft::default(),
            error: None,
            position: None,
        }
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    /// Inline error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Position shown on the confirmation step
    pub fn position(&self) -> Option<DisplayPosition> {
        self.position
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Replace the email (called on every keystroke; not validated here)
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    pub fn set_profile_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.draft.profile.set(field, value);
    }

    /// Step one submit: validate, then advance to the profile step
    ///
    /// Returns whether the workflow advanced. No network call is made.
    pub fn submit_email_step(&mut self) -> bool {
        if self.step != WorkflowStep::EmailEntry {
            debug!(step = %self.step, "Email submit ignored outside the email step");
            return false;
        }

        if !validate_email(&self.draft.email) {
            self.error = Some(INVALID_EMAIL_MESSAGE.to_string());
            return false;
        }

        self.error = None;
        self.apply(WorkflowEvent::EmailAccepted)
    }

    /// Step two submit: send the form, with or without the profile
    pub async fn submit_final(&mut self, skip_profile: bool) -> Result<DisplayPosition, FormError> {
        if self.step != WorkflowStep::ProfileEntry {
            return Err(FormError::InvalidStep {
                action: "submit",
                step: self.step,
            });
        }

        let submission = self.build_submission(skip_profile);

        match self.client.submit(&submission).await {
            Ok(receipt) => {
                let position = match receipt.position {
                    Some(position) => DisplayPosition::Confirmed(position),
                    None => {
                        warn!("Intake response had no position, showing a placeholder");
                        DisplayPosition::placeholder()
                    }
                };
                self.position = Some(position);
                self.error = None;
                let event = if skip_profile {
                    WorkflowEvent::ProfileSkipped
                } else {
                    WorkflowEvent::ProfileSubmitted
                };
                self.apply(event);
                Ok(position)
            }
            Err(e) => {
                warn!(error = %e, "Waitlist submission failed");
                self.error = Some(SUBMISSION_FAILED_MESSAGE.to_string());
                self.draft.profile = Default::default();
                self.apply(WorkflowEvent::SubmissionFailed);
                Err(e.into())
            }
        }
    }

    /// Back to step one with everything cleared
    pub fn reset(&mut self) {
        self.draft.clear();
        self.position = None;
        self.error = None;
        self.apply(WorkflowEvent::Reset);
    }

    /// Outbound payload; profile fields only when not skipping
    pub fn build_submission(&self, skip_profile: bool) -> WaitlistSubmission {
        WaitlistSubmission {
            email: Some(self.draft.email.clone()),
            profile: if skip_profile {
                Default::default()
            } else {
                self.draft.profile.clone()
            },
            timestamp: Some(qg_common::time::now_iso8601()),
        }
    }

    fn apply(&mut self, event: WorkflowEvent) -> bool {
        match transition(self.step, event) {
            Some(next) => {
                debug!(from = %self.step, to = %next, ?event, "Workflow transition");
                self.step = next;
                true
            }
            None => {
                debug!(step = %self.step, ?event, "Event not valid in current step");
                false
            }
        }
    }
}
