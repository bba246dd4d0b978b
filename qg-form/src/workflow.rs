//! Signup workflow state machine
//!
//! Three steps and an explicit transition table. Submission failure is not
//! a state of its own: it sends the workflow back to `EmailEntry`.

use std::fmt;

/// Step currently shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkflowStep {
    #[default]
    EmailEntry,
    ProfileEntry,
    Confirmation,
}

/// Something that happened to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowEvent {
    /// Email passed syntax validation
    EmailAccepted,
    /// Submitted without profile and the service accepted it
    ProfileSkipped,
    /// Submitted with profile and the service accepted it
    ProfileSubmitted,
    /// Network failure or non-2xx response
    SubmissionFailed,
    /// User asked to start over
    Reset,
}

/// Transition table; `None` means the event is not valid in `from`
pub fn transition(from: WorkflowStep, event: WorkflowEvent) -> Option<WorkflowStep> {
    use WorkflowEvent::*;
    use WorkflowStep::*;

    match (from, event) {
        (_, Reset) => Some(EmailEntry),
        (EmailEntry, EmailAccepted) => Some(ProfileEntry),
        (ProfileEntry, ProfileSkipped) | (ProfileEntry, ProfileSubmitted) => Some(Confirmation),
        (ProfileEntry, SubmissionFailed) => Some(EmailEntry),
        _ => None,
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::EmailEntry => "email",
            WorkflowStep::ProfileEntry => "profile",
            WorkflowStep::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}
