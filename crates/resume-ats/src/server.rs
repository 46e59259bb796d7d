//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes résumé scoring to AI assistants over stdio. The server is a
//! presentation layer: every tool delegates to the same [`Engine`] the CLI
//! commands use and returns its JSON output.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use resume_ats_core::roles::{self, RoleTemplateProvider};
use resume_ats_core::{ResumeMetadata, check_input_size};

use crate::commands::Engine;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `score_resume` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreResumeParams {
    /// Plain text extracted from the résumé.
    pub text: String,
    /// Target job title. May be empty.
    #[serde(default)]
    pub job_title: String,
    /// Whether the source document used a multi-column layout.
    #[serde(default)]
    pub is_multi_column: bool,
    /// Note from the text extractor, e.g. "ocr".
    pub extraction_hint: Option<String>,
}

/// Parameters for the `diagnose_grammar` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct DiagnoseGrammarParams {
    /// Plain text extracted from the résumé.
    pub text: String,
    /// Note from the text extractor, e.g. "ocr".
    pub extraction_hint: Option<String>,
}

/// Parameters for the `get_role_template` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetRoleTemplateParams {
    /// A role family slug such as "data_engineer", or a free-form job title.
    pub role: String,
}

#[derive(Serialize)]
struct TemplateResponse {
    role_family: String,
    #[serde(flatten)]
    template: resume_ats_core::RoleTemplate,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

/// MCP server exposing the scoring engine.
#[derive(Clone)]
pub struct ResumeServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    engine: Arc<Engine>,
    max_input: Option<usize>,
}

#[tool_router]
impl ResumeServer {
    /// Create a server around a shared engine.
    pub fn new(engine: Arc<Engine>, max_input: Option<usize>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            engine,
            max_input,
        }
    }

    fn check_size(&self, text: &str) -> Result<(), McpError> {
        check_input_size(text, self.max_input)
            .map(|_| ())
            .map_err(|msg| McpError::invalid_params(msg, None))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, description, and scoring profile version")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let profile = &self.engine.profile().version;
        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
                "profileVersion": profile,
            }))?
        } else {
            format!(
                "{} v{}\n{}\nScoring profile: {profile}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score a résumé.
    #[tool(
        description = "Score a plain-text résumé for ATS compatibility against a job title. Returns keyword, formatting, structure, tone, and grammar scores, an overall 0-100 score, matched and missing skills, and recommendations."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", job_title = %params.job_title))]
    async fn score_resume(
        &self,
        Parameters(params): Parameters<ScoreResumeParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "score_resume", text_len = params.text.len(), "executing MCP tool");
        self.check_size(&params.text)?;

        let metadata = ResumeMetadata {
            is_multi_column: params.is_multi_column,
            extraction_hint: params.extraction_hint,
        };
        let result = self
            .engine
            .score_resume(&params.text, &params.job_title, &metadata)
            .await;

        tracing::info!(
            tool = "score_resume",
            overall = result.overall_score,
            role_family = %result.role_family,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }

    /// Grammar verdict and diagnostics.
    #[tool(
        description = "Diagnose grammar and text-extraction quality of a plain-text résumé. Returns the grammar band and 0-10 score with penalties, misspelling samples, extraction status, and confidence."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    async fn diagnose_grammar(
        &self,
        Parameters(params): Parameters<DiagnoseGrammarParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "diagnose_grammar", text_len = params.text.len(), "executing MCP tool");
        self.check_size(&params.text)?;

        let report = self
            .engine
            .check_grammar(&params.text, params.extraction_hint.as_deref())
            .await;

        tracing::info!(
            tool = "diagnose_grammar",
            band = report.verdict.band.as_str(),
            raw_score = report.diagnostics.raw_score,
            status = %report.diagnostics.extraction_status,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// List role families.
    #[tool(description = "List every role family the scorer has a skill template for.")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn list_role_families(&self) -> Result<CallToolResult, McpError> {
        let families = self.engine.templates().families();
        tracing::debug!(tool = "list_role_families", count = families.len(), "executing MCP tool");
        Ok(CallToolResult::success(vec![Content::text(to_json(&families)?)]))
    }

    /// Show a role template.
    #[tool(
        description = "Show the must-have skills, nice-to-have skills, and tools for a role family or job title."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", role = %params.role))]
    async fn get_role_template(
        &self,
        Parameters(params): Parameters<GetRoleTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        let templates = self.engine.templates();
        let family = if templates.families().contains(&params.role) {
            params.role
        } else {
            roles::resolve_with_provider(templates, &roles::normalize_job_title(&params.role))
        };
        let resolved = roles::load_role_template(templates, &family).await;
        let response = TemplateResponse {
            role_family: resolved.role_family,
            template: resolved.template,
        };
        Ok(CallToolResult::success(vec![Content::text(to_json(&response)?)]))
    }
}

#[tool_handler]
impl ServerHandler for ResumeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Call score_resume with résumé text and a job title to get an ATS compatibility score with recommendations.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_engine;
    use resume_ats_core::{Config, ConfigSources, ScoringProfile};
    use rmcp::model::RawContent;

    const RESUME: &str = "Jane Doe\njane@example.com | (555) 123-4567\n\nExperience\n\
        Data Engineer at Acme, 2019 - 2024\n• Built ETL pipelines in Python and SQL, cutting costs 20%.\n\n\
        Education\nBS Computer Science, 2019\n\nSkills\nPython, SQL, Airflow, Spark\n";

    fn server_with_limit(max_input: Option<usize>) -> ResumeServer {
        let engine = build_engine(&Config::default(), &ConfigSources::default(), ScoringProfile::default());
        ResumeServer::new(Arc::new(engine), max_input)
    }

    fn server() -> ResumeServer {
        server_with_limit(None)
    }

    /// Extract text from the first content item in a `CallToolResult`.
    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn extract_json(result: &CallToolResult) -> serde_json::Value {
        serde_json::from_str(extract_text(result).expect("should have text content"))
            .expect("output should be valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let info = ServerHandler::get_info(&server());
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("score_resume"));
    }

    #[test]
    fn get_info_tool_reports_profile() {
        let result = server()
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .unwrap();
        let json = extract_json(&result);
        assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
        assert_eq!(json["profileVersion"], resume_ats_core::profile::DEFAULT_PROFILE_VERSION);
    }

    #[tokio::test]
    async fn score_resume_tool_returns_result() {
        let result = server()
            .score_resume(Parameters(ScoreResumeParams {
                text: RESUME.to_string(),
                job_title: "Data Engineer".to_string(),
                is_multi_column: false,
                extraction_hint: None,
            }))
            .await
            .unwrap();
        assert!(!result.is_error.unwrap_or(false));
        let json = extract_json(&result);
        assert_eq!(json["roleFamily"], "data_engineer");
        assert!(json["overallScore"].as_u64().unwrap() <= 100);
        assert!(json["recommendations"].is_array());
    }

    #[tokio::test]
    async fn score_resume_tool_rejects_oversized_input() {
        let err = server_with_limit(Some(16))
            .score_resume(Parameters(ScoreResumeParams {
                text: RESUME.to_string(),
                job_title: String::new(),
                is_multi_column: false,
                extraction_hint: None,
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("limit"));
    }

    #[tokio::test]
    async fn diagnose_grammar_tool_flags_ocr() {
        let result = server()
            .diagnose_grammar(Parameters(DiagnoseGrammarParams {
                text: RESUME.to_string(),
                extraction_hint: Some("OCR".to_string()),
            }))
            .await
            .unwrap();
        let json = extract_json(&result);
        assert_eq!(json["extractionStatus"], "scanned_pdf");
        assert_eq!(json["band"], "neutral_low_conf");
        assert_eq!(json["score"], 6);
        assert_eq!(json["aiVerificationEnabled"], false);
    }

    #[test]
    fn list_role_families_tool_includes_generic() {
        let result = server().list_role_families().unwrap();
        let json = extract_json(&result);
        let families = json.as_array().unwrap();
        assert!(families.iter().any(|f| f == "generic_professional"));
        assert!(families.iter().any(|f| f == "data_engineer"));
    }

    #[tokio::test]
    async fn get_role_template_accepts_title_or_slug() {
        let s = server();
        let by_slug = s
            .get_role_template(Parameters(GetRoleTemplateParams {
                role: "data_engineer".to_string(),
            }))
            .await
            .unwrap();
        let by_title = s
            .get_role_template(Parameters(GetRoleTemplateParams {
                role: "Senior Data Engineer".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(extract_json(&by_slug), extract_json(&by_title));
        assert!(extract_json(&by_slug)["must_have"].is_array());
    }
}
