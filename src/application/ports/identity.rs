use crate::shared::error::AppError;
use async_trait::async_trait;

/// The authenticated identity behind remote access. Token acquisition and
/// refresh live outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub access_token: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `None` when no valid credential is currently available; sync treats
    /// that as "offline" and backup treats it as an error.
    async fn current(&self) -> Result<Option<Identity>, AppError>;
}
