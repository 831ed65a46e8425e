use crate::core::{Adapter, ApiResponse, QueryParams};
use crate::utils::error::Result;

pub struct AdapterEngine<A: Adapter> {
    adapter: A,
}

impl<A: Adapter> AdapterEngine<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    /// 執行 validate -> fetch -> map，任何階段失敗都轉成回應，不往外拋
    pub async fn run(&self, query: &QueryParams) -> ApiResponse {
        let name = self.adapter.name();
        tracing::debug!(adapter = name, "Handling lookup request");

        let response = match self.pipeline(query).await {
            Ok(response) => response,
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    tracing::error!(
                        adapter = name,
                        category = ?e.category(),
                        "❌ Lookup failed: {}",
                        e
                    );
                } else {
                    tracing::info!(adapter = name, category = ?e.category(), "Lookup rejected: {}", e);
                }
                self.adapter.recover(e)
            }
        };

        tracing::info!(adapter = name, status = response.status, "Lookup finished");
        response
    }

    async fn pipeline(&self, query: &QueryParams) -> Result<ApiResponse> {
        let input = self.adapter.validate(query)?;
        let upstream = self.adapter.fetch(input).await?;
        self.adapter.map(upstream)
    }
}
