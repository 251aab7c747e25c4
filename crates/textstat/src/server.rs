//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes text analysis over the MCP protocol via stdio transport. The
//! server is a presentation layer: each `#[tool]` method delegates to
//! `textstat-core`.
//!
//! One [`Analyzer`] lives for the whole server process, so `get_history`
//! reports the analyses made through `analyze_text` during this session.
//! Tool calls may arrive concurrently; the analyzer sits behind a mutex so
//! each append-and-evict on the history happens as one step.

use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use textstat_core::{AnalysisError, AnalysisRecord, Analyzer, AnalyzerSettings, compute_record};

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

const fn default_remember() -> bool {
    true
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Whether to record the analysis in session history (default: true).
    #[serde(default = "default_remember")]
    pub remember: bool,
}

/// Parameters for the `get_history` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct GetHistoryParams {
    /// Return only the summary lines instead of full records.
    #[serde(default)]
    pub summaries_only: bool,
}

/// MCP server exposing text statistics to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    analyzer: Arc<Mutex<Analyzer>>,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new(AnalyzerSettings::default(), None)
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with a fresh analyzer.
    pub fn new(settings: AnalyzerSettings, max_input_bytes: Option<usize>) -> Self {
        Self {
            analyzer: Arc::new(Mutex::new(Analyzer::with_settings(settings))),
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    fn lock_analyzer(&self) -> Result<MutexGuard<'_, Analyzer>, McpError> {
        self.analyzer
            .lock()
            .map_err(|_| McpError::internal_error("analyzer lock poisoned", None))
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Compute text statistics.
    #[tool(
        description = "Analyze text: character, word, sentence and line counts, word frequency, top 5 words, average word length, and reading time. Recorded in session history unless remember is false."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_text", remember = params.remember, "executing MCP tool");

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: text exceeds {max} bytes"),
                None,
            ));
        }

        let result = if params.remember {
            self.lock_analyzer()?.analyze(&params.text)
        } else {
            let settings = *self.lock_analyzer()?.settings();
            compute_record(&params.text, &settings).map(Arc::new)
        };
        let record = result.map_err(|e| match e {
            AnalysisError::EmptyInput => McpError::invalid_params(e.to_string(), None),
        })?;

        let json = serde_json::to_string_pretty(&*record)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            tool = "analyze_text",
            words = record.word_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Describe the JSON shape returned by `analyze_text`.
    #[tool(description = "Get the JSON Schema of the record returned by analyze_text")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_record_schema(&self) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_record_schema", "executing MCP tool");

        let schema = schemars::schema_for!(AnalysisRecord);
        let json = serde_json::to_string_pretty(&schema)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "get_record_schema", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Report the session's analysis history.
    #[tool(description = "List recent analyses from this session, oldest first.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn get_history(
        &self,
        Parameters(params): Parameters<GetHistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "get_history",
            summaries_only = params.summaries_only,
            "executing MCP tool"
        );

        let analyzer = self.lock_analyzer()?;
        let history = analyzer.history();
        let json = if params.summaries_only {
            let summaries: Vec<&str> = history.iter().map(|e| e.summary.as_str()).collect();
            serde_json::to_string_pretty(&summaries)
        } else {
            serde_json::to_string_pretty(history)
        }
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "get_history", entries = history.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
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
                "{} MCP server. Use analyze_text to compute text statistics, get_record_schema to see the shape of its output, and get_history to review this session's analyses.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
