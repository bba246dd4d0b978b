//! Client-side form data

use qg_common::ProfileFields;
use std::fmt;

/// What the user has typed so far; lives only in UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub email: String,
    pub profile: ProfileFields,
}

impl SubmissionDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Position shown on the confirmation step
///
/// `Confirmed` is the value the intake service assigned. `Placeholder` is a
/// cosmetic pseudo-random number used only when the service answered 2xx
/// without a position; it carries no meaning and must not be relied upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPosition {
    Confirmed(u64),
    Placeholder(u32),
}

impl DisplayPosition {
    /// Range the placeholder is drawn from
    pub const PLACEHOLDER_RANGE: std::ops::RangeInclusive<u32> = 1..=200;

    /// Draw a cosmetic placeholder
    pub fn placeholder() -> Self {
        use rand::Rng;
        DisplayPosition::Placeholder(rand::thread_rng().gen_range(Self::PLACEHOLDER_RANGE))
    }

    /// Server-assigned position, if this is one
    pub fn confirmed(&self) -> Option<u64> {
        match self {
            DisplayPosition::Confirmed(position) => Some(*position),
            DisplayPosition::Placeholder(_) => None,
        }
    }

    /// Number to render, whichever variant this is
    pub fn display_number(&self) -> u64 {
        match self {
            DisplayPosition::Confirmed(position) => *position,
            DisplayPosition::Placeholder(n) => u64::from(*n),
        }
    }
}

impl fmt::Display for DisplayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.display_number())
    }
}
