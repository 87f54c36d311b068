/// MCP admin surface for the portfolio content.
///
/// Exposes eight tools:
/// - `list_sections` / `get_section`: inspect stored content
/// - `open_edit`, `apply_edit`, `attach_image_file`: work on the scratch copy
/// - `save_edit` / `cancel_edit`: commit or discard the scratch copy
/// - `render_route`: resolve a URL fragment to the page it shows
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use folio_common::api::{
    ApplyEditParams, AttachImageParams, CancelEditResponse, RenderRouteParams,
    RenderRouteResponse, SaveEditResponse, ScratchResponse, SectionContentResponse, SectionInfo,
    SectionListResponse, SectionParams,
};
use folio_common::editor::EditOp;
use folio_common::error::CommonError;
use folio_common::media::file_to_data_uri;
use folio_common::router::Page;
use folio_common::section::Section;
use folio_common::state::SiteState;

use crate::error::AppError;

#[derive(Clone)]
pub struct FolioMcpServer {
    state: Arc<SiteState>,
    tool_router: ToolRouter<FolioMcpServer>,
}

impl FolioMcpServer {
    pub fn new(state: Arc<SiteState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }
}

fn tool_error(err: CommonError) -> String {
    let err = AppError::from(err);
    warn!(error = %err, "tool call rejected");
    err.to_string()
}

fn parse_section(name: &str) -> Result<Section, String> {
    name.parse::<Section>().map_err(tool_error)
}

#[tool_router]
impl FolioMcpServer {
    #[tool(description = "List the portfolio sections with their storage keys and admin labels.")]
    async fn list_sections(&self) -> Result<Json<SectionListResponse>, String> {
        Ok(Json(SectionListResponse {
            backend: self.state.store().backend_kind().to_string(),
            sections: Section::ALL.into_iter().map(SectionInfo::from).collect(),
        }))
    }

    #[tool(description = "Get the current JSON of one section as loaded, with its fingerprint.")]
    async fn get_section(
        &self,
        Parameters(params): Parameters<SectionParams>,
    ) -> Result<Json<SectionContentResponse>, String> {
        let section = parse_section(&params.section)?;
        let current = self.state.snapshot().await.get(section);
        Ok(Json(SectionContentResponse {
            section: section.name().to_string(),
            storage_key: section.storage_key().to_string(),
            fingerprint: Some(current.fingerprint()),
            value: current.to_json(),
        }))
    }

    #[tool(description = "Open an edit session on a section, replacing any open session. Returns the scratch copy.")]
    async fn open_edit(
        &self,
        Parameters(params): Parameters<SectionParams>,
    ) -> Result<Json<ScratchResponse>, String> {
        let section = parse_section(&params.section)?;
        let scratch = self.state.begin_edit(section).await;
        info!(%section, "open_edit tool invoked");
        Ok(Json(ScratchResponse::new(&scratch, None)))
    }

    #[tool(description = "Apply one edit operation to the open session's scratch copy. Failed operations leave the scratch unchanged.")]
    async fn apply_edit(
        &self,
        Parameters(params): Parameters<ApplyEditParams>,
    ) -> Result<Json<ScratchResponse>, String> {
        let applied = self.state.apply_edit(params.op).await.map_err(tool_error)?;
        let scratch = self.state.scratch().await.map_err(tool_error)?;
        Ok(Json(ScratchResponse::new(&scratch, applied.created_id)))
    }

    #[tool(description = "Read a local image file, inline it as a data URI and append it to a project, blog post or event in the open session.")]
    async fn attach_image_file(
        &self,
        Parameters(params): Parameters<AttachImageParams>,
    ) -> Result<Json<ScratchResponse>, String> {
        let path = PathBuf::from(params.path.trim());
        let image = file_to_data_uri(&path).await.map_err(tool_error)?;
        info!(item = %params.item_id, path = %path.display(), "attaching image file");
        self.state
            .apply_edit(EditOp::AddImage {
                id: params.item_id,
                image,
            })
            .await
            .map_err(tool_error)?;
        let scratch = self.state.scratch().await.map_err(tool_error)?;
        Ok(Json(ScratchResponse::new(&scratch, None)))
    }

    #[tool(description = "Validate and persist the open session, reload all sections and close the session.")]
    async fn save_edit(&self) -> Result<Json<SaveEditResponse>, String> {
        let section = self.state.save_edit().await.map_err(tool_error)?;
        let fingerprint = self.state.store().fingerprint(section.storage_key()).await;
        Ok(Json(SaveEditResponse {
            section: section.name().to_string(),
            fingerprint,
        }))
    }

    #[tool(description = "Discard the open session without writing anything.")]
    async fn cancel_edit(&self) -> Result<Json<CancelEditResponse>, String> {
        let section = self.state.cancel_edit().await;
        Ok(Json(CancelEditResponse {
            cancelled: section.is_some(),
            section: section.map(|s| s.name().to_string()),
        }))
    }

    #[tool(description = "Resolve a URL fragment such as \"#/blog\" to the page it renders. Unknown fragments render the home page.")]
    async fn render_route(
        &self,
        Parameters(params): Parameters<RenderRouteParams>,
    ) -> Result<Json<RenderRouteResponse>, String> {
        Ok(Json(Page::from_fragment(params.fragment.trim()).into()))
    }
}

#[tool_handler]
impl ServerHandler for FolioMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "folio-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Portfolio content admin. Use list_sections and get_section to inspect \
                 content, open_edit to start editing a section, apply_edit (and \
                 attach_image_file for local images) to change the scratch copy, then \
                 save_edit to persist or cancel_edit to discard. Only one section can \
                 be edited at a time."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::content_store::ContentStore;
    use serde_json::json;

    async fn server() -> FolioMcpServer {
        FolioMcpServer::new(Arc::new(SiteState::open(ContentStore::in_memory()).await))
    }

    fn section(name: &str) -> Parameters<SectionParams> {
        Parameters(SectionParams {
            section: name.to_string(),
        })
    }

    fn op(value: serde_json::Value) -> Parameters<ApplyEditParams> {
        Parameters(ApplyEditParams {
            op: serde_json::from_value(value).unwrap(),
        })
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = FolioMcpServer::tool_router().list_all();
        for name in [
            "list_sections",
            "get_section",
            "open_edit",
            "apply_edit",
            "attach_image_file",
            "save_edit",
            "cancel_edit",
            "render_route",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[tokio::test]
    async fn edit_and_save_through_tools() {
        let server = server().await;
        server.open_edit(section("certificates")).await.unwrap();
        let Json(added) = server.apply_edit(op(json!({"op": "add_item"}))).await.unwrap();
        let id = added.created_id.unwrap();
        server
            .apply_edit(op(json!({
                "op": "update_item", "id": id, "field": "issuer", "value": "Coursera"
            })))
            .await
            .unwrap();
        let Json(saved) = server.save_edit().await.unwrap();
        assert_eq!(saved.section, "certificates");
        assert!(saved.fingerprint.is_some());

        let Json(content) = server.get_section(section("portfolio-certificates")).await.unwrap();
        let items = content.value.as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[3]["issuer"], "Coursera");
    }

    #[tokio::test]
    async fn errors_come_back_as_messages() {
        let server = server().await;
        let err = server.get_section(section("ads")).await.err().expect("expected Err");
        assert!(err.contains("unknown section"));

        let err = server.apply_edit(op(json!({"op": "add_item"}))).await.err().expect("expected Err");
        assert_eq!(err, "no edit session is open");

        let Json(cancelled) = server.cancel_edit().await.unwrap();
        assert!(!cancelled.cancelled);
    }

    #[tokio::test]
    async fn attaches_local_images() {
        let server = server().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, b"hi").unwrap();

        server.open_edit(section("events")).await.unwrap();
        let Json(scratch) = server
            .attach_image_file(Parameters(AttachImageParams {
                item_id: "1".to_string(),
                path: path.display().to_string(),
            }))
            .await
            .unwrap();
        let images = scratch.value[0]["images"].as_array().unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[2], "data:image/png;base64,aGk=");

        let missing = server
            .attach_image_file(Parameters(AttachImageParams {
                item_id: "1".to_string(),
                path: dir.path().join("gone.png").display().to_string(),
            }))
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn resolves_routes() {
        let server = server().await;
        let Json(route) = server
            .render_route(Parameters(RenderRouteParams {
                fragment: "#/events".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(route.page, Page::Events);
        assert_eq!(route.path, "/events");

        let Json(route) = server
            .render_route(Parameters(RenderRouteParams {
                fragment: "#/unknown".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(route.page, Page::Home);
    }
}
