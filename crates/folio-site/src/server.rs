/// HTTP surface of the portfolio site.
///
/// Pages are rendered server-side from the current snapshot. The JSON admin API
/// and the plain HTML editor both drive the single edit session held by
/// [`SiteState`].
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::Datelike;
use serde::Deserialize;
use tracing::info;

use folio_common::api::{
    CancelEditResponse, SaveEditResponse, ScratchResponse, SectionContentResponse, SectionInfo,
    SectionListResponse,
};
use folio_common::editor::EditOp;
use folio_common::media::to_data_uri;
use folio_common::router::{Page, ADMIN_ANCHOR};
use folio_common::section::Section;
use folio_common::state::SiteState;
use folio_common::theme::css_variables;

use crate::error::AppError;
use crate::render;

pub type SharedState = Arc<SiteState>;

/// Largest accepted request body; uploads are inlined as data URIs.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/theme.css", get(theme_css))
        .route("/api/sections", get(list_sections))
        .route("/api/sections/{section}", get(get_section))
        .route("/api/edit", get(get_scratch).delete(cancel_edit))
        .route("/api/edit/ops", post(apply_op))
        .route("/api/edit/save", post(save_edit))
        .route("/api/edit/items/{id}/images", post(upload_image))
        .route("/api/edit/{section}", post(open_edit))
        .route("/admin/edit/save", post(admin_save))
        .route("/admin/edit/cancel", post(admin_cancel))
        .route("/admin/edit/{section}", get(admin_editor))
        .route("/{page}", get(page))
        .fallback(home)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}

// --- pages ---

async fn render_layout(state: &SiteState, page: Page) -> Html<String> {
    let snapshot = state.snapshot().await;
    Html(render::render_page(&snapshot, page, chrono::Utc::now().year()))
}

async fn home(State(state): State<SharedState>) -> Html<String> {
    render_layout(&state, Page::Home).await
}

/// Unknown slugs render the home layout.
async fn page(State(state): State<SharedState>, Path(slug): Path<String>) -> Html<String> {
    render_layout(&state, Page::from_path(&format!("/{slug}"))).await
}

async fn theme_css(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = state.snapshot().await;
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        css_variables(&snapshot.theme),
    )
}

// --- content API ---

async fn list_sections(State(state): State<SharedState>) -> Json<SectionListResponse> {
    Json(SectionListResponse {
        backend: state.store().backend_kind().to_string(),
        sections: Section::ALL.into_iter().map(SectionInfo::from).collect(),
    })
}

async fn get_section(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let section: Section = name.parse()?;
    // Body and ETag both come from the served snapshot, not the store.
    let current = state.snapshot().await.get(section);
    let fingerprint = current.fingerprint();
    let etag = HeaderValue::from_str(&format!("\"{fingerprint}\"")).ok();

    if let (Some(etag), Some(seen)) = (&etag, headers.get(header::IF_NONE_MATCH)) {
        if etag == seen {
            return Ok(StatusCode::NOT_MODIFIED.into_response());
        }
    }

    let mut response = Json(SectionContentResponse {
        section: section.name().to_string(),
        storage_key: section.storage_key().to_string(),
        fingerprint: Some(fingerprint),
        value: current.to_json(),
    })
    .into_response();
    if let Some(etag) = etag {
        response.headers_mut().insert(header::ETAG, etag);
    }
    Ok(response)
}

// --- edit API ---

async fn open_edit(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<ScratchResponse>, AppError> {
    let section: Section = name.parse()?;
    let scratch = state.begin_edit(section).await;
    Ok(Json(ScratchResponse::new(&scratch, None)))
}

async fn get_scratch(State(state): State<SharedState>) -> Result<Json<ScratchResponse>, AppError> {
    let scratch = state.scratch().await?;
    Ok(Json(ScratchResponse::new(&scratch, None)))
}

async fn apply_op(
    State(state): State<SharedState>,
    Json(op): Json<EditOp>,
) -> Result<Json<ScratchResponse>, AppError> {
    let applied = state.apply_edit(op).await?;
    let scratch = state.scratch().await?;
    Ok(Json(ScratchResponse::new(&scratch, applied.created_id)))
}

#[derive(Debug, Deserialize)]
struct UploadQuery {
    /// Original file name; its extension picks the MIME type.
    name: Option<String>,
}

async fn upload_image(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<ScratchResponse>, AppError> {
    if body.is_empty() {
        return Err(AppError::BadRequest("empty upload".to_string()));
    }
    let name = query.name.unwrap_or_default();
    let image = to_data_uri(&body, &name);
    info!(item = %id, bytes = body.len(), "image uploaded");
    state.apply_edit(EditOp::AddImage { id, image }).await?;
    let scratch = state.scratch().await?;
    Ok(Json(ScratchResponse::new(&scratch, None)))
}

#[derive(Debug, Deserialize)]
struct SaveQuery {
    /// Section the caller believes is open; a different open session is refused.
    section: Option<String>,
}

async fn save_edit(
    State(state): State<SharedState>,
    Query(query): Query<SaveQuery>,
) -> Result<Json<SaveEditResponse>, AppError> {
    let expected = query.section.as_deref().map(str::parse::<Section>).transpose()?;
    let section = state.save_edit_to(expected).await?;
    let fingerprint = state.store().fingerprint(section.storage_key()).await;
    Ok(Json(SaveEditResponse {
        section: section.name().to_string(),
        fingerprint,
    }))
}

async fn cancel_edit(State(state): State<SharedState>) -> Json<CancelEditResponse> {
    let section = state.cancel_edit().await;
    Json(CancelEditResponse {
        cancelled: section.is_some(),
        section: section.map(|s| s.name().to_string()),
    })
}

// --- HTML editor ---

fn back_to_admin() -> Redirect {
    Redirect::to(&format!("/#{ADMIN_ANCHOR}"))
}

async fn admin_editor(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let section: Section = name.parse()?;
    let scratch = state.begin_edit(section).await;
    let json = serde_json::to_string_pretty(&scratch.to_json())
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Html(render::render_editor(section, &json)))
}

#[derive(Debug, Deserialize)]
struct EditorForm {
    /// Section the form was rendered for.
    section: String,
    value: String,
}

async fn admin_save(
    State(state): State<SharedState>,
    Form(form): Form<EditorForm>,
) -> Result<Redirect, AppError> {
    let section: Section = form.section.parse()?;
    let value: serde_json::Value = serde_json::from_str(&form.value)
        .map_err(|e| AppError::BadRequest(format!("value is not JSON: {e}")))?;
    state
        .apply_edit_to(Some(section), EditOp::Replace { value })
        .await?;
    state.save_edit_to(Some(section)).await?;
    Ok(back_to_admin())
}

async fn admin_cancel(State(state): State<SharedState>) -> Redirect {
    state.cancel_edit().await;
    back_to_admin()
}
