use async_trait::async_trait;
use intake_core::{MetadataRegistrar, RegisterAssetRequest, RegisteredAsset, RegistrationError};

use crate::{ApiClient, ApiStatusError};

#[async_trait]
impl MetadataRegistrar for ApiClient {
    async fn register(
        &self,
        request: RegisterAssetRequest,
    ) -> Result<RegisteredAsset, RegistrationError> {
        let start = std::time::Instant::now();

        let asset = self.register_asset(&request).await.map_err(|err| {
            match err.downcast::<ApiStatusError>() {
                Ok(status) => RegistrationError::Rejected {
                    status: status.status,
                    message: status.body,
                },
                Err(other) => RegistrationError::Request(other),
            }
        })?;

        tracing::debug!(
            asset_id = %asset.id,
            key = %asset.key,
            size_bytes = asset.size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Asset registered"
        );

        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Auth;

    fn request() -> RegisterAssetRequest {
        RegisterAssetRequest {
            key: "uploads/k.png".to_string(),
            mime_type: "image/png".to_string(),
            name: "k.png".to_string(),
            size: 1,
        }
    }

    #[tokio::test]
    async fn rejected_registration_keeps_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v0/buckets")
            .with_status(422)
            .with_body("key already registered")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), Auth::XApiKey("k".to_string())).unwrap();
        let err = client.register(request()).await.unwrap_err();

        mock.assert_async().await;
        match err {
            RegistrationError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "key already registered");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_response_is_a_request_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v0/buckets")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"not\": \"an asset\"}")
            .create_async()
            .await;

        let client = ApiClient::new(server.url(), Auth::XApiKey("k".to_string())).unwrap();
        let err = client.register(request()).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Request(_)));
    }
}
