pub mod blob_store;
pub mod identity;
pub mod key_value_store;
pub mod remote_store;

pub use blob_store::{BackupBlobStore, BlobMetadata};
pub use identity::{Identity, IdentityProvider};
pub use key_value_store::KeyValueStore;
pub use remote_store::RemoteJobStore;
