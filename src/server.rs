use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_typed_multipart::TypedMultipart;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::{ConvertResponse, ConvertSubmission};
use crate::error::FormError;
use crate::form::ConvertForm;
use crate::parser::extract_format;

pub struct Server {
    form: ConvertForm,
    upload_limit: usize,
}

impl Server {
    pub(crate) fn new(form: ConvertForm, upload_limit: usize) -> Server {
        Server { form, upload_limit }
    }

    pub fn router(self) -> Router {
        let upload_limit = self.upload_limit;
        let this = Arc::new(self);
        Router::new()
            .route("/", get(convert_form))
            .route(
                "/:ext",
                post(submit_convert).layer(DefaultBodyLimit::max(upload_limit)),
            )
            .with_state(this)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(self, addr: &str) -> std::io::Result<()> {
        let app = self.router();

        info!("listening on {addr}");
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await
    }
}

async fn convert_form(State(server): State<Arc<Server>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        server.form.data(),
    )
}

async fn submit_convert(
    uri: Uri,
    TypedMultipart(mut submission): TypedMultipart<ConvertSubmission>,
) -> Result<(StatusCode, Json<ConvertResponse>), FormError> {
    let input_format = extract_format(&uri).to_string();
    let (_file, metadata) = submission.extract_file()?;
    let config = submission.parse()?;

    let id = Uuid::new_v4();
    info!(
        "accepted convert request {}: {} -> {}",
        id,
        input_format,
        config.format()
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(ConvertResponse {
            id: Some(id.to_string()),
            input_format: Some(input_format),
            file_name: metadata.file_name,
            config: Some(config),
            error: None,
        }),
    ))
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        warn!("rejected convert request: {}", self);
        (
            StatusCode::BAD_REQUEST,
            Json(ConvertResponse {
                error: Some(self.to_string()),
                ..Default::default()
            }),
        )
            .into_response()
    }
}
