//! HTTP API: receipt upload and health endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::info;

use recarbo_core::{RecarboError, ReceiptProcessor, Report, TextExtractor};

use crate::error::ApiError;

/// Multipart field name carrying the receipt image.
const RECEIPT_FIELD: &str = "receipt";

/// Shared application state: the pipeline over the startup-loaded catalog.
pub struct AppState {
    pub processor: ReceiptProcessor<Box<dyn TextExtractor>>,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/process-receipt", post(process_receipt_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health response body.
#[derive(Serialize)]
struct Health {
    status: &'static str,
    catalog_entries: usize,
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Health> {
    Json(Health {
        status: "ok",
        catalog_entries: state.processor.catalog().len(),
    })
}

/// Accept a multipart receipt upload and return its emission report.
async fn process_receipt_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<Report>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        if name == RECEIPT_FIELD {
            let data = field.bytes().await.map_err(|e| ApiError::InvalidRequest {
                message: e.to_string(),
            })?;
            file_data = Some(data.to_vec());
        }
    }

    let data = file_data.ok_or(ApiError::MissingFile)?;
    info!("Received receipt upload ({} bytes)", data.len());

    // OCR is CPU-bound; keep it off the async worker threads.
    let state = state.clone();
    let result = tokio::task::spawn_blocking(move || state.processor.process(&data))
        .await
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?;

    match result {
        Ok(result) => Ok(Json(result.report)),
        Err(RecarboError::Extraction(e)) => Err(ApiError::Extraction(e)),
        Err(e) => Err(ApiError::Internal {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use recarbo_core::{Catalog, ExtractionError};

    use super::*;

    /// Extractor returning a fixed receipt text.
    struct FixedExtractor(&'static str);

    impl TextExtractor for FixedExtractor {
        fn extract_text(&self, _image: &[u8]) -> Result<String, ExtractionError> {
            Ok(self.0.to_string())
        }
    }

    fn test_state(text: &'static str) -> Arc<AppState> {
        let source = "\
item,category,co2_per_unit,unit
Milk,Dairy,1.2,liter
";
        let catalog = Arc::new(Catalog::from_reader(source.as_bytes()).unwrap());
        let extractor: Box<dyn TextExtractor> = Box::new(FixedExtractor(text));
        Arc::new(AppState {
            processor: ReceiptProcessor::new(extractor, catalog),
        })
    }

    fn multipart_request(field_name: &str) -> Request<Body> {
        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field_name}\"; filename=\"r.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             fakeimagebytes\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/process-receipt")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_report() {
        let app = router(test_state("Milk 2L\nTOTAL 3.00"));
        let response = app.oneshot(multipart_request("receipt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: Report = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report.items.len(), 1);
        assert_eq!(report.items[0].item, "Milk");
        assert_eq!(report.total_co2, 1.2);
    }

    #[tokio::test]
    async fn test_missing_file_is_bad_request() {
        let app = router(test_state("Milk"));
        let response = app.oneshot(multipart_request("attachment")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "no file uploaded");
    }

    #[tokio::test]
    async fn test_health_reports_catalog_size() {
        let app = router(test_state(""));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["catalog_entries"], 1);
    }
}
