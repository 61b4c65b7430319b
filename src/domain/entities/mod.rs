pub mod backup;
pub mod job_record;
pub mod pending_change;

pub use backup::{BackupInfo, BackupMetadata, BackupPayload, BackupSnapshot, BACKUP_SCHEMA_VERSION};
pub use job_record::{JobDraft, JobRecord};
pub use pending_change::{ChangeKind, PendingChange};
