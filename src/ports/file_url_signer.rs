//! FileUrlSigner port for time-limited download links.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Produces presigned download URLs for files held in host storage.
#[async_trait]
pub trait FileUrlSigner: Send + Sync {
    /// Presigned URL for `file_key`. `private` selects the private bucket.
    async fn presigned_download_url(
        &self,
        file_key: &str,
        private: bool,
    ) -> Result<String, DomainError>;
}
