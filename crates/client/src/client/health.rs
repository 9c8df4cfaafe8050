//! Health check operations.

use calgrid_core::calendar::HealthStatus;

use super::CalgridClient;
use crate::error::Result;

impl CalgridClient {
    /// Check server health.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.url("/api/health")).send().await?;
        self.handle_data(response).await
    }
}
