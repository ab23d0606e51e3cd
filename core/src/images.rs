//! Image-host upload service.
//!
//! # Design
//! The image host accepts a multipart/form-data POST with the payload in an
//! `image` part; the API key and expiration travel as query parameters. The
//! response is JSON with the hosted URL under `data.display_url`. Like the
//! rest of the crate this is split into `build_`/`parse_` halves around a
//! transport.
//!
//! Refs that already carry an `https://` URL are passed through untouched —
//! only pending payloads are uploaded.

use serde::Deserialize;
use tracing::debug;

use crate::client::check_status;
use crate::config::ImageHostConfig;
use crate::error::{ApiError, RepositoryError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::types::{ImageRef, ProductDraft};

/// Boundary for the hand-built multipart bodies. Fixed so request bodies
/// are deterministic and comparable in tests.
const MULTIPART_BOUNDARY: &str = "catalog-image-upload";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    display_url: String,
}

/// Uploads pending image refs to the configured image host.
#[derive(Debug, Clone)]
pub struct ImageUploader {
    config: ImageHostConfig,
}

impl ImageUploader {
    pub fn new(config: ImageHostConfig) -> Self {
        Self { config }
    }

    pub fn build_upload(&self, image: &ImageRef) -> HttpRequest {
        let payload = strip_data_url_prefix(image.as_str());
        HttpRequest {
            method: HttpMethod::Post,
            path: format!(
                "{}?expiration={}&key={}",
                self.config.base_url, self.config.expiration_secs, self.config.api_key
            ),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )],
            body: Some(multipart_image_body(payload)),
        }
    }

    pub fn parse_upload(&self, response: HttpResponse) -> Result<ImageRef, ApiError> {
        check_status(&response, 200)?;
        let parsed: UploadResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if !parsed.success {
            return Err(ApiError::Http {
                status: response.status,
                body: response.body,
            });
        }
        Ok(ImageRef::new(parsed.data.display_url))
    }

    /// Upload `image` if it is still pending; hosted refs come back as-is.
    pub fn ensure_uploaded<T: HttpTransport>(
        &self,
        transport: &T,
        image: ImageRef,
    ) -> Result<ImageRef, RepositoryError> {
        if image.is_uploaded() {
            return Ok(image);
        }
        debug!("uploading pending image");
        let request = self.build_upload(&image);
        let response = transport
            .execute(request)
            .map_err(|e| RepositoryError::UploadFailed(e.into()))?;
        self.parse_upload(response)
            .map_err(RepositoryError::UploadFailed)
    }

    /// Resolve both image fields of a draft to hosted URLs.
    pub fn upload_draft_images<T: HttpTransport>(
        &self,
        transport: &T,
        mut draft: ProductDraft,
    ) -> Result<ProductDraft, RepositoryError> {
        draft.product_image = self.ensure_uploaded(transport, draft.product_image)?;
        draft.brand_image = self.ensure_uploaded(transport, draft.brand_image)?;
        Ok(draft)
    }
}

/// Drop a `data:image/…;base64,` prefix so only the payload is uploaded.
fn strip_data_url_prefix(raw: &str) -> &str {
    if let Some(rest) = raw.strip_prefix("data:image/") {
        if let Some(idx) = rest.find(";base64,") {
            return &rest[idx + ";base64,".len()..];
        }
    }
    raw
}

fn multipart_image_body(payload: &str) -> String {
    format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"image\"\r\n\
         \r\n\
         {payload}\r\n\
         --{MULTIPART_BOUNDARY}--\r\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploader() -> ImageUploader {
        ImageUploader::new(ImageHostConfig {
            base_url: "https://api.imgbb.com/1/upload".to_string(),
            api_key: "test-key".to_string(),
            expiration_secs: 3600,
        })
    }

    #[test]
    fn build_upload_carries_key_and_expiration_in_query() {
        let req = uploader().build_upload(&ImageRef::new("AAAA"));
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.path,
            "https://api.imgbb.com/1/upload?expiration=3600&key=test-key"
        );
        assert_eq!(
            req.headers[0].1,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
        );
        let body = req.body.unwrap();
        assert!(body.contains("name=\"image\""));
        assert!(body.contains("AAAA"));
    }

    #[test]
    fn data_url_prefix_is_stripped() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,QUJD"), "QUJD");
        assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,QQ=="), "QQ==");
        assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    }

    #[test]
    fn parse_upload_returns_the_display_url() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"success":true,"data":{"display_url":"https://images.example.com/a.png"}}"#
                .to_string(),
        };
        let hosted = uploader().parse_upload(response).unwrap();
        assert_eq!(hosted.as_str(), "https://images.example.com/a.png");
        assert!(hosted.is_uploaded());
    }

    #[test]
    fn parse_upload_rejected_by_host() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"success":false,"data":{"display_url":""}}"#.to_string(),
        };
        let err = uploader().parse_upload(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { .. }));
    }

    #[test]
    fn parse_upload_non_2xx() {
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: "missing key".to_string(),
        };
        let err = uploader().parse_upload(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 401, .. }));
    }

    #[test]
    fn hosted_refs_skip_the_network() {
        struct NoTransport;
        impl HttpTransport for NoTransport {
            fn execute(
                &self,
                _request: HttpRequest,
            ) -> Result<HttpResponse, crate::http::TransportError> {
                panic!("hosted ref must not be uploaded");
            }
        }

        let hosted = ImageRef::new("https://images.example.com/a.png");
        let out = uploader().ensure_uploaded(&NoTransport, hosted.clone()).unwrap();
        assert_eq!(out, hosted);
    }
}
