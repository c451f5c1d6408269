use serde::{Deserialize, Serialize};
use url::Url;

/// One of the fixed downloadable repositories offered on the selector screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    Glide,
    LoadApp,
    Retrofit,
}

impl DownloadTarget {
    pub const ALL: [DownloadTarget; 3] = [
        DownloadTarget::Glide,
        DownloadTarget::LoadApp,
        DownloadTarget::Retrofit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DownloadTarget::Glide => "Glide",
            DownloadTarget::LoadApp => "LoadApp",
            DownloadTarget::Retrofit => "Retrofit",
        }
    }

    /// Long form shown next to the radio button.
    pub fn description(self) -> &'static str {
        match self {
            DownloadTarget::Glide => "Glide - Image Loading Library by BumpTech",
            DownloadTarget::LoadApp => "LoadApp - Current repository by Udacity",
            DownloadTarget::Retrofit => "Retrofit - Type-safe HTTP client by Square, Inc.",
        }
    }

    pub fn url(self) -> Url {
        let raw = match self {
            DownloadTarget::Glide => "https://github.com/bumptech/glide/archive/master.zip",
            DownloadTarget::LoadApp => {
                "https://github.com/udacity/nd940-c3-advanced-android-programming-project-starter/archive/master.zip"
            }
            DownloadTarget::Retrofit => "https://github.com/square/retrofit/archive/master.zip",
        };

        Url::parse(raw).expect("catalog URLs are known-good")
    }
}

/// Terminal state recorded for a finished download, as reported by the
/// download service. A missing record maps to [`Outcome::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Successful,
    Failed,
}

/// Three-valued classification of a finished download. The string form is
/// both the internal state and the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
    Unknown,
}

impl Outcome {
    pub fn from_status(status: Option<TerminalStatus>) -> Self {
        match status {
            Some(TerminalStatus::Successful) => Outcome::Success,
            Some(TerminalStatus::Failed) => Outcome::Failed,
            None => Outcome::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failed => "Failed",
            Outcome::Unknown => "Unknown",
        }
    }
}

/// Two-field payload handed from the selector screen to the detail screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadReport {
    pub label: String,
    pub outcome: String,
}

impl DownloadReport {
    pub fn new(label: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            label: label.into(),
            outcome: outcome.as_str().to_string(),
        }
    }
}
