pub mod job_id;
pub mod job_status;

pub use job_id::JobId;
pub use job_status::JobStatus;
