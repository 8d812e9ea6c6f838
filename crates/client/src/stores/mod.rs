//! Workflow state for the broadcast pages.
//!
//! Each store is plain data plus synchronous transitions. Actions that hit the
//! backend are split in two: a `begin_*` step that runs local checks and
//! yields a request value, and a `finish_*` step that applies the awaited
//! result. Views hold the store in a signal and await the request in between,
//! so no borrow is held across an `.await`.

pub mod broadcasts;
pub mod dispatch;
pub mod recipients;
pub mod selection;

pub use broadcasts::{BroadcastForm, BroadcastStore, Deletion, SubmitOutcome, Submission};
pub use dispatch::{DeliveryDispatcher, DeliveryRequest, DispatchState};
pub use recipients::RecipientSelector;
pub use selection::SelectionSet;

/// A one-off message for the operator, shown as an alert near the control
/// that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Case-insensitive substring match used by the list filters.
pub(crate) fn matches_search(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
