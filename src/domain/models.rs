use crate::domain::time::TimeValue;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const PLACEHOLDER_TEXT: &str = "...";
pub const PARAGRAPH_SECONDS_LIMIT: u64 = 3_600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    pub start: TimeValue,
    pub end: TimeValue,
    pub text: String,
}

impl Paragraph {
    pub fn new(start: TimeValue, end: TimeValue, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn placeholder(start: TimeValue, end: TimeValue) -> Self {
        Self::new(start, end, PLACEHOLDER_TEXT)
    }

    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }

    pub fn move_start(&mut self, new_start: TimeValue) {
        let duration = self.duration_ms();
        self.start = new_start;
        self.end = new_start.add_millis(duration);
    }

    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && self.text.chars().any(|c| c.is_ascii_alphanumeric())
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} \"{}\"", self.start, self.end, self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
}

impl EditOutcome {
    pub fn is_dirty(self) -> bool {
        matches!(self, EditOutcome::Changed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingRules {
    pub min_duration_ms: u64,
    pub default_duration_ms: u64,
}

impl Default for TimingRules {
    fn default() -> Self {
        EditorSettings::default().timing_rules()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorSettings {
    pub min_paragraph_seconds: u64,
    pub max_paragraph_seconds: u64,
    pub replay_milliseconds: u64,
    pub native_extension: String,
    pub reference_extension: String,
}

impl EditorSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in [
            ("minParagraphSeconds", self.min_paragraph_seconds),
            ("maxParagraphSeconds", self.max_paragraph_seconds),
        ] {
            if value == 0 || value > PARAGRAPH_SECONDS_LIMIT {
                return Err(AppError::Settings(format!(
                    "{name} must be between 1 and {PARAGRAPH_SECONDS_LIMIT}, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn timing_rules(&self) -> TimingRules {
        let seconds = |value: u64| value.clamp(1, PARAGRAPH_SECONDS_LIMIT) * 1_000;
        let min_duration_ms = seconds(self.min_paragraph_seconds);
        TimingRules {
            min_duration_ms,
            default_duration_ms: seconds(self.max_paragraph_seconds).max(min_duration_ms),
        }
    }

    pub fn nudge_ms(&self) -> i64 {
        self.replay_milliseconds.clamp(100, 10_000) as i64
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_paragraph_seconds: 1,
            max_paragraph_seconds: 4,
            replay_milliseconds: 400,
            native_extension: "titler".to_string(),
            reference_extension: "srt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphView {
    pub index: usize,
    pub count: usize,
    pub start: TimeValue,
    pub end: TimeValue,
    pub text: String,
    pub is_last: bool,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Format(String),

    #[error("malformed subtitle block at line {line}: '{content}'")]
    ImportFormat { line: usize, content: String },

    #[error("paragraph index {index} is out of range for {count} paragraphs")]
    Index { index: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Settings(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format(_) => "FORMAT_ERROR",
            Self::ImportFormat { .. } => "IMPORT_FORMAT_ERROR",
            Self::Index { .. } => "INDEX_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Settings(_) => "SETTINGS_ERROR",
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Format(_) => Some("fix or remove the damaged .titler file"),
            Self::ImportFormat { .. } => Some("check numbering and timestamps of the .srt file"),
            Self::Index { .. } => None,
            Self::Io(_) => Some("check disk space and file permissions"),
            Self::Settings(_) => Some("delete settings.json to restore defaults"),
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("AppError", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("suggestion", &self.suggestion())?;
        state.end()
    }
}
