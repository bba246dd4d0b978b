//! qg-form library - Submission Form Controller
//!
//! Drives the three-step waitlist signup (email, optional profile,
//! confirmation) and submits it to the intake service.

pub mod client;
pub mod controller;
pub mod draft;
pub mod workflow;

pub use client::{ClientError, HttpIntakeClient, IntakeClient, IntakeReceipt};
pub use controller::{FormController, FormError};
pub use draft::{DisplayPosition, SubmissionDraft};
pub use workflow::{WorkflowEvent, WorkflowStep};
