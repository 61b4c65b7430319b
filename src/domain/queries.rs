use crate::domain::entities::JobRecord;
use crate::domain::value_objects::JobStatus;
use std::collections::HashMap;

/// Number of records per status, with every status present in the result.
pub fn status_counts(jobs: &[JobRecord]) -> HashMap<JobStatus, usize> {
    let mut counts: HashMap<JobStatus, usize> =
        JobStatus::ALL.iter().map(|status| (*status, 0)).collect();
    for job in jobs {
        *counts.entry(job.status).or_default() += 1;
    }
    counts
}

pub fn filter_by_status(jobs: &[JobRecord], status: Option<JobStatus>) -> Vec<JobRecord> {
    match status {
        None => jobs.to_vec(),
        Some(wanted) => jobs
            .iter()
            .filter(|job| job.status == wanted)
            .cloned()
            .collect(),
    }
}

/// Case-insensitive free-text search over company, role, location, notes,
/// contact person and tags. A blank query matches everything.
pub fn search(jobs: &[JobRecord], query: &str) -> Vec<JobRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return jobs.to_vec();
    }

    jobs.iter()
        .filter(|job| {
            let mut haystacks = vec![
                job.company.as_str(),
                job.role.as_str(),
                job.location.as_str(),
            ];
            if let Some(notes) = job.notes.as_deref() {
                haystacks.push(notes);
            }
            if let Some(contact) = job.contact_person.as_deref() {
                haystacks.push(contact);
            }
            let in_fields = haystacks
                .iter()
                .any(|text| text.to_lowercase().contains(&needle));
            let in_tags = job
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|tag| tag.to_lowercase().contains(&needle)));
            in_fields || in_tags
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::JobDraft;
    use crate::domain::value_objects::JobId;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn record(company: &str, role: &str, status: JobStatus, tags: &[&str]) -> JobRecord {
        let tags: BTreeSet<String> = tags.iter().map(|tag| tag.to_string()).collect();
        JobDraft {
            company: company.into(),
            role: role.into(),
            location: "Remote".into(),
            salary: None,
            url: None,
            notes: None,
            contact_person: None,
            contact_email: None,
            date_applied: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            follow_up_date: None,
            status,
            tags: (!tags.is_empty()).then_some(tags),
        }
        .into_record(JobId::generate())
    }

    #[test]
    fn counts_cover_all_statuses() {
        let jobs = vec![
            record("Acme", "Engineer", JobStatus::Applied, &[]),
            record("Globex", "Manager", JobStatus::Applied, &[]),
            record("Initech", "Analyst", JobStatus::Rejected, &[]),
        ];
        let counts = status_counts(&jobs);
        assert_eq!(counts[&JobStatus::Applied], 2);
        assert_eq!(counts[&JobStatus::Rejected], 1);
        assert_eq!(counts[&JobStatus::Offered], 0);
        assert_eq!(counts.len(), JobStatus::ALL.len());
    }

    #[test]
    fn filter_passes_everything_without_status() {
        let jobs = vec![record("Acme", "Engineer", JobStatus::Applied, &[])];
        assert_eq!(filter_by_status(&jobs, None).len(), 1);
        assert_eq!(filter_by_status(&jobs, Some(JobStatus::Offered)).len(), 0);
    }

    #[test]
    fn search_matches_fields_and_tags() {
        let jobs = vec![
            record("Acme", "Engineer", JobStatus::Applied, &["rust", "backend"]),
            record("Globex", "Designer", JobStatus::Applied, &[]),
        ];
        assert_eq!(search(&jobs, "RUST").len(), 1);
        assert_eq!(search(&jobs, "globex").len(), 1);
        assert_eq!(search(&jobs, "  ").len(), 2);
        assert_eq!(search(&jobs, "nothing").len(), 0);
    }
}
