//! Draft timer form (uncommitted input fields)

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Accepted `datetime-local` layouts, interpreted in the host timezone
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// The three input fields behind the "Add Timer" action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub target: String,
}

/// Partial update of the draft form; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub target: Option<String>,
}

impl TimerForm {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            target: target.into(),
        }
    }

    /// All three fields hold something
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.category.trim().is_empty()
            && !self.target.trim().is_empty()
    }

    pub fn apply(&mut self, patch: FormPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(target) = patch.target {
            self.target = target;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parse a target date-time field into an absolute instant
///
/// Accepts RFC 3339 with an explicit offset, or a `datetime-local` value
/// (`YYYY-MM-DDTHH:MM[:SS]`) read in the host's local timezone.
pub fn parse_target(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Utc));
    }

    LOCAL_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(input, format).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    })
}
