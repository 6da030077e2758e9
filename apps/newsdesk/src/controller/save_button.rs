//! Save-article button: label/disabled state machine and the attribute codec
//! used to carry an article through the rendered markup.

use std::borrow::Cow;

use client_core::ClientError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::protocol::{SaveArticleRequest, SaveArticleResponse, SaveStatus};

pub const IDLE_LABEL: &str = "💾 Save";
pub const SAVING_LABEL: &str = "Saving...";
pub const SAVED_LABEL: &str = "Saved! ✅";
pub const ALREADY_SAVED_LABEL: &str = "Already Saved!";
pub const FAILED_LABEL: &str = "Failed ❌";
pub const ERRORED_LABEL: &str = "Error ❌";

const SAVED_FAMILY_MARKER: &str = "Saved";

/// Characters left as-is by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveButtonState {
    Idle,
    Saving,
    Saved,
    AlreadySaved,
    Failed,
    Errored,
    /// Saved-family label kept after the reset timer; clickable again.
    Sticky,
}

/// How a save attempt ended, as seen by the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
    Rejected { message: String },
    Unreachable,
}

impl SaveOutcome {
    pub fn from_result(result: &Result<SaveArticleResponse, ClientError>) -> Self {
        match result {
            Ok(response) => match &response.status {
                SaveStatus::Success => Self::Saved,
                SaveStatus::Warning => Self::AlreadySaved,
                SaveStatus::Other(_) => Self::Rejected {
                    message: response.message.clone().unwrap_or_default(),
                },
            },
            Err(_) => Self::Unreachable,
        }
    }
}

impl SaveButtonState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => IDLE_LABEL,
            Self::Saving => SAVING_LABEL,
            Self::Saved | Self::Sticky => SAVED_LABEL,
            Self::AlreadySaved => ALREADY_SAVED_LABEL,
            Self::Failed => FAILED_LABEL,
            Self::Errored => ERRORED_LABEL,
        }
    }

    /// Disabled from the click until the reset timer fires.
    pub fn is_disabled(self) -> bool {
        !matches!(self, Self::Idle | Self::Sticky)
    }

    /// Only an enabled button can start a save; any other state is kept.
    pub fn begin(self) -> Self {
        match self {
            Self::Idle | Self::Sticky => Self::Saving,
            other => other,
        }
    }

    pub fn resolve(self, outcome: &SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Saved => Self::Saved,
            SaveOutcome::AlreadySaved => Self::AlreadySaved,
            SaveOutcome::Rejected { .. } => Self::Failed,
            SaveOutcome::Unreachable => Self::Errored,
        }
    }

    /// Timer transition, driven by whatever label the button shows when the
    /// timer fires.
    pub fn settle_from_label(current_label: &str) -> Self {
        if current_label.contains(SAVED_FAMILY_MARKER) {
            Self::Sticky
        } else {
            Self::Idle
        }
    }
}

pub fn encode_attr(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

pub fn decode_attr(value: &str) -> Cow<'_, str> {
    percent_decode_str(value).decode_utf8_lossy()
}

/// Attribute names under which an article is embedded in its save button.
pub const DATA_TITLE: &str = "data-title";
pub const DATA_URL: &str = "data-url";
pub const DATA_SOURCE: &str = "data-source";
pub const DATA_PUBLISHED_AT: &str = "data-published-at";

/// Rebuilds the save payload from the button's data attributes.
/// `published_at` travels unencoded.
pub fn decode_payload(attr: impl Fn(&str) -> Option<String>) -> SaveArticleRequest {
    let decoded = |name: &str| {
        attr(name)
            .map(|raw| decode_attr(&raw).into_owned())
            .unwrap_or_default()
    };
    SaveArticleRequest {
        title: decoded(DATA_TITLE),
        url: decoded(DATA_URL),
        source: decoded(DATA_SOURCE),
        published_at: attr(DATA_PUBLISHED_AT).unwrap_or_default(),
    }
}
