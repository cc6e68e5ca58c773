//! # cadence-settings
//!
//! Explicit configuration for the Cadence engine, built once at process
//! start and passed by reference into every collaborator that needs it.
//! Nothing reads the environment ad hoc mid-operation.
//!
//! Required keys are secrets: any missing one is a fatal configuration error
//! surfaced before a single network call is attempted. Optional keys carry
//! defaults and exist mostly so tests can point clients at a mock server.

#![deny(unsafe_code)]

pub mod errors;

use tracing::debug;

pub use errors::SettingsError;

/// Default Anthropic API endpoint.
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
/// Default model used for update synthesis.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
/// Default Google Sheets API endpoint.
pub const DEFAULT_SHEETS_URL: &str = "https://sheets.googleapis.com";
/// Default Google Docs API endpoint.
pub const DEFAULT_DOCS_URL: &str = "https://docs.googleapis.com";
/// Default sheet range (tab) name.
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1";

/// Anthropic completion endpoint settings.
#[derive(Clone, Debug)]
pub struct AnthropicSettings {
    /// API key (`ANTHROPIC_API_KEY`, required).
    pub api_key: String,
    /// Model identifier (`CADENCE_MODEL`).
    pub model: String,
    /// Base URL (`CADENCE_ANTHROPIC_URL`).
    pub base_url: String,
}

/// Jira tracker settings.
#[derive(Clone, Debug)]
pub struct JiraSettings {
    /// Site base URL (`JIRA_BASE_URL`, required).
    pub base_url: String,
    /// Account email for basic auth (`JIRA_EMAIL`, required).
    pub email: String,
    /// API token for basic auth (`JIRA_API_TOKEN`, required).
    pub api_token: String,
}

/// Google Sheets / Docs settings.
#[derive(Clone, Debug)]
pub struct GoogleSettings {
    /// Bearer access token (`GOOGLE_ACCESS_TOKEN`). Required only when the
    /// Google collaborators are actually used.
    pub access_token: Option<String>,
    /// Sheets API base URL (`CADENCE_SHEETS_URL`).
    pub sheets_base_url: String,
    /// Docs API base URL (`CADENCE_DOCS_URL`).
    pub docs_base_url: String,
    /// Sheet range / tab name (`CADENCE_SHEET_RANGE`).
    pub range: String,
}

impl GoogleSettings {
    /// The access token, or the same fatal error a missing required key
    /// produces. Deferred because Jira-only invocations never touch Google.
    pub fn access_token(&self) -> Result<&str, SettingsError> {
        self.access_token
            .as_deref()
            .ok_or_else(|| SettingsError::Missing {
                key: "GOOGLE_ACCESS_TOKEN".to_string(),
            })
    }
}

/// Full process configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Completion endpoint.
    pub anthropic: AnthropicSettings,
    /// Issue tracker.
    pub jira: JiraSettings,
    /// Tabular and document sources.
    pub google: GoogleSettings,
}

impl Settings {
    /// Build settings from process environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    /// Build settings from an arbitrary key lookup (testable without
    /// touching the process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| SettingsError::Missing {
                key: key.to_string(),
            })
        };

        let settings = Self {
            anthropic: AnthropicSettings {
                api_key: required("ANTHROPIC_API_KEY")?,
                model: lookup("CADENCE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: lookup("CADENCE_ANTHROPIC_URL")
                    .unwrap_or_else(|| DEFAULT_ANTHROPIC_URL.to_string()),
            },
            jira: JiraSettings {
                base_url: required("JIRA_BASE_URL")?,
                email: required("JIRA_EMAIL")?,
                api_token: required("JIRA_API_TOKEN")?,
            },
            google: GoogleSettings {
                access_token: lookup("GOOGLE_ACCESS_TOKEN"),
                sheets_base_url: lookup("CADENCE_SHEETS_URL")
                    .unwrap_or_else(|| DEFAULT_SHEETS_URL.to_string()),
                docs_base_url: lookup("CADENCE_DOCS_URL")
                    .unwrap_or_else(|| DEFAULT_DOCS_URL.to_string()),
                range: lookup("CADENCE_SHEET_RANGE")
                    .unwrap_or_else(|| DEFAULT_SHEET_RANGE.to_string()),
            },
        };
        debug!(model = %settings.anthropic.model, "settings loaded");
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
