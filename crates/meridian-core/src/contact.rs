//! Messages submitted through the public contact form.

use crate::types::MessageId;
use crate::validation::{
    clean_optional, optional_text, require_email, require_text, MAX_TITLE_LEN,
};
use crate::MeridianError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<(), MeridianError> {
        require_text("contact.name", &self.name, MAX_TITLE_LEN)?;
        require_email("contact.email", &self.email)?;
        optional_text("contact.phone", self.phone.as_deref(), 40)?;
        optional_text("contact.company", self.company.as_deref(), MAX_TITLE_LEN)?;
        optional_text("contact.subject", Some(&self.subject), MAX_TITLE_LEN)?;
        require_text("contact.message", &self.message, 10_000)
    }

    /// Trimmed copy; a blank subject becomes "General inquiry".
    pub fn normalized(self) -> Self {
        let subject = self.subject.trim();
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: clean_optional(self.phone),
            company: clean_optional(self.company),
            subject: if subject.is_empty() {
                "General inquiry".to_string()
            } else {
                subject.to_string()
            },
            message: self.message.trim().to_string(),
        }
    }

    pub fn into_message(self, id: MessageId, now: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            subject: self.subject,
            message: self.message,
            created_at: now,
        }
    }
}
