//! Quality and compliance certificates shown on the company profile.

use crate::types::CertificateId;
use crate::validation::{
    clean_optional, optional_image_url, optional_text, require_text, MAX_TITLE_LEN,
};
use crate::MeridianError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Certificate {
    pub id: CertificateId,
    pub title: String,
    pub issuer: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub issued_on: Option<NaiveDate>,
    pub expires_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CertificateInput {
    pub title: String,
    pub issuer: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
}

impl CertificateInput {
    pub fn validate(&self) -> Result<(), MeridianError> {
        require_text("certificate.title", &self.title, MAX_TITLE_LEN)?;
        require_text("certificate.issuer", &self.issuer, MAX_TITLE_LEN)?;
        optional_text("certificate.description", self.description.as_deref(), 5_000)?;
        optional_image_url("certificate.image_url", self.image_url.as_deref())?;
        if let (Some(issued), Some(expires)) = (self.issued_on, self.expires_on) {
            if expires < issued {
                return Err(MeridianError::validation_error(
                    "certificate.expires_on",
                    "must not be before issued_on",
                ));
            }
        }
        Ok(())
    }

    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            issuer: self.issuer.trim().to_string(),
            description: clean_optional(self.description),
            image_url: clean_optional(self.image_url),
            issued_on: self.issued_on,
            expires_on: self.expires_on,
        }
    }

    pub fn into_certificate(self, id: CertificateId, now: DateTime<Utc>) -> Certificate {
        Certificate {
            id,
            title: self.title,
            issuer: self.issuer,
            description: self.description,
            image_url: self.image_url,
            issued_on: self.issued_on,
            expires_on: self.expires_on,
            created_at: now,
        }
    }
}
