pub mod backup_service;
pub mod record_store;
pub mod sync_service;

pub use backup_service::{BackupService, BACKUP_FILENAME};
pub use record_store::RecordStore;
pub use sync_service::{SyncOutcome, SyncScheduleHandle, SyncService};
