use crate::domain::entities::JobRecord;
use crate::domain::value_objects::{JobId, JobStatus};
use crate::infrastructure::remote::rows::RemoteJobRow;
use crate::shared::error::AppError;
use std::collections::BTreeSet;

pub fn row_from_record(record: &JobRecord) -> RemoteJobRow {
    RemoteJobRow {
        id: record.id.to_string(),
        company: record.company.clone(),
        role: record.role.clone(),
        location: record.location.clone(),
        salary: record.salary.clone(),
        url: record.url.clone(),
        notes: record.notes.clone(),
        contact_person: record.contact_person.clone(),
        contact_email: record.contact_email.clone(),
        date_applied: record.date_applied,
        follow_up_date: record.follow_up_date,
        status: record.status.as_str().to_string(),
        tags: record
            .tags
            .as_ref()
            .map(|tags| tags.iter().cloned().collect()),
        created_at: None,
    }
}

pub fn record_from_row(row: RemoteJobRow) -> Result<JobRecord, AppError> {
    let id: JobId = row
        .id
        .parse()
        .map_err(|err: String| AppError::Remote(format!("Malformed remote row: {err}")))?;
    let status: JobStatus = row
        .status
        .parse()
        .map_err(|err: String| AppError::Remote(format!("Malformed remote row: {err}")))?;

    Ok(JobRecord {
        id,
        company: row.company,
        role: row.role,
        location: row.location,
        salary: row.salary,
        url: row.url,
        notes: row.notes,
        contact_person: row.contact_person,
        contact_email: row.contact_email,
        date_applied: row.date_applied,
        follow_up_date: row.follow_up_date,
        status,
        tags: row.tags.map(|tags| tags.into_iter().collect::<BTreeSet<_>>()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::JobDraft;
    use chrono::NaiveDate;

    fn record() -> JobRecord {
        JobDraft {
            company: "Acme".into(),
            role: "Engineer".into(),
            location: "Remote".into(),
            salary: Some("120k".into()),
            url: None,
            notes: Some("Referred by Sam".into()),
            contact_person: None,
            contact_email: None,
            date_applied: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            follow_up_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            status: JobStatus::Interviewing,
            tags: Some(["rust".to_string(), "backend".to_string()].into()),
        }
        .into_record(JobId::generate())
    }

    #[test]
    fn record_survives_row_mapping() {
        let original = record();
        let mapped = record_from_row(row_from_record(&original)).unwrap();
        assert_eq!(mapped, original);
    }

    #[test]
    fn bad_id_is_a_remote_error() {
        let mut row = row_from_record(&record());
        row.id = "bogus".into();
        assert!(matches!(record_from_row(row), Err(AppError::Remote(_))));
    }

    #[test]
    fn unknown_status_is_a_remote_error() {
        let mut row = row_from_record(&record());
        row.status = "ghosted".into();
        assert!(matches!(record_from_row(row), Err(AppError::Remote(_))));
    }
}
