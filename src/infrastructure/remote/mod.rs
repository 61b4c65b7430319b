pub mod http_store;
pub mod mappers;
pub mod memory_remote;
pub mod rows;

pub use http_store::HttpJobStore;
pub use memory_remote::InMemoryJobStore;
pub use rows::RemoteJobRow;
