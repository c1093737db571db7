//! Job openings listed on the careers page.

use crate::types::CareerId;
use crate::validation::{clean_optional, optional_text, require_text, MAX_LABEL_LEN, MAX_TITLE_LEN};
use crate::MeridianError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Career {
    pub id: CareerId,
    pub title: String,
    pub department: String,
    pub location: String,
    /// e.g. "Full-time", "Internship".
    pub employment_type: String,
    pub description: String,
    pub requirements: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool { true }

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerInput {
    pub title: String,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl CareerInput {
    pub fn validate(&self) -> Result<(), MeridianError> {
        require_text("career.title", &self.title, MAX_TITLE_LEN)?;
        require_text("career.department", &self.department, MAX_LABEL_LEN)?;
        require_text("career.location", &self.location, MAX_LABEL_LEN)?;
        require_text("career.employment_type", &self.employment_type, MAX_LABEL_LEN)?;
        require_text("career.description", &self.description, 20_000)?;
        optional_text("career.requirements", self.requirements.as_deref(), 20_000)
    }

    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            department: self.department.trim().to_string(),
            location: self.location.trim().to_string(),
            employment_type: self.employment_type.trim().to_string(),
            description: self.description.trim().to_string(),
            requirements: clean_optional(self.requirements),
            active: self.active,
        }
    }

    pub fn into_career(self, id: CareerId, now: DateTime<Utc>) -> Career {
        Career {
            id,
            title: self.title,
            department: self.department,
            location: self.location,
            employment_type: self.employment_type,
            description: self.description,
            requirements: self.requirements,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}
