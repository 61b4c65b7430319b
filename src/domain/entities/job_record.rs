use crate::domain::value_objects::{JobId, JobStatus};
use crate::shared::error::AppError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A tracked job application as it lives in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub company: String,
    pub role: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub date_applied: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<NaiveDate>,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
}

/// Input for creating a record; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub company: String,
    pub role: String,
    pub location: String,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub date_applied: NaiveDate,
    pub follow_up_date: Option<NaiveDate>,
    pub status: JobStatus,
    pub tags: Option<BTreeSet<String>>,
}

impl JobDraft {
    /// Rejects drafts whose required text fields are missing or blank.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("company", &self.company),
            ("role", &self.role),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "Field '{field}' must not be empty"
                )));
            }
        }
        Ok(())
    }

    pub fn into_record(self, id: JobId) -> JobRecord {
        JobRecord {
            id,
            company: self.company,
            role: self.role,
            location: self.location,
            salary: self.salary,
            url: self.url,
            notes: self.notes,
            contact_person: self.contact_person,
            contact_email: self.contact_email,
            date_applied: self.date_applied,
            follow_up_date: self.follow_up_date,
            status: self.status,
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> JobDraft {
        JobDraft {
            company: "Acme".into(),
            role: "Engineer".into(),
            location: "Remote".into(),
            salary: None,
            url: None,
            notes: None,
            contact_person: None,
            contact_email: None,
            date_applied: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            follow_up_date: None,
            status: JobStatus::Applied,
            tags: None,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut d = draft();
        d.location = "   ".into();
        assert!(matches!(d.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn into_record_keeps_fields() {
        let id = JobId::generate();
        let record = draft().into_record(id);
        assert_eq!(record.id, id);
        assert_eq!(record.company, "Acme");
        assert_eq!(record.status, JobStatus::Applied);
    }
}
