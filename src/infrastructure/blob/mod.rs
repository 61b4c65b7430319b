pub mod drive_store;
pub mod memory_blob;

pub use drive_store::DriveBlobStore;
pub use memory_blob::InMemoryBlobStore;
