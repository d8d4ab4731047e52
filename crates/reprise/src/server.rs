//! Stdio MCP server.
//!
//! Two tools: `analyze_text` runs the same analysis as `reprise analyze`
//! and returns the JSON report, and `get_info` describes the server. Tool
//! options left unset fall back to the `[analysis]` table of the loaded
//! configuration.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use reprise_core::{AnalysisOptions, analyze, export, ingest, markdown};

/// Parameters for the `get_info` tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// `"json"` for a JSON object; anything else gives one line of text.
    #[serde(default)]
    pub format: String,
}

#[derive(serde::Serialize)]
struct ServerDescription {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    tools: [&'static str; 2],
}

const DESCRIPTION: ServerDescription = ServerDescription {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    description: env!("CARGO_PKG_DESCRIPTION"),
    tools: ["analyze_text", "get_info"],
};

/// Parameters for the `analyze_text` tool.
///
/// Every option is optional; unset options take the server's configured
/// defaults.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Report the most frequent words.
    pub repeated_words: Option<bool>,
    /// Report repeated 3- and 4-word phrases.
    pub repeated_phrases: Option<bool>,
    /// Report repeated sentence openings (first three words).
    pub repeated_starters: Option<bool>,
    /// Report near-duplicate sentence pairs.
    pub similar_sentences: Option<bool>,
    /// Report unusually long sentences.
    pub long_sentences: Option<bool>,
    /// Drop common English words from word and phrase counts.
    pub exclude_common: Option<bool>,
    /// Maximum number of repeated words to report.
    pub max_results: Option<usize>,
    /// Focus terms whose raw counts are reported.
    pub custom_words: Option<Vec<String>>,
}

impl AnalyzeTextParams {
    /// Overlay the set fields onto `defaults`.
    fn options(&self, defaults: &AnalysisOptions) -> AnalysisOptions {
        let mut options = AnalysisOptions {
            repeated_words: self.repeated_words.unwrap_or(defaults.repeated_words),
            repeated_phrases: self.repeated_phrases.unwrap_or(defaults.repeated_phrases),
            repeated_starters: self.repeated_starters.unwrap_or(defaults.repeated_starters),
            similar_sentences: self.similar_sentences.unwrap_or(defaults.similar_sentences),
            long_sentences: self.long_sentences.unwrap_or(defaults.long_sentences),
            exclude_common: self.exclude_common.unwrap_or(defaults.exclude_common),
            max_results: self.max_results.unwrap_or(defaults.max_results),
            custom_words: defaults.custom_words.clone(),
        };
        if let Some(ref words) = self.custom_words {
            options = options.with_custom_words(words);
        }
        options
    }
}

/// Tool router plus the limits and defaults every call shares.
#[derive(Clone)]
pub struct RepriseServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input_bytes: Option<usize>,
    defaults: AnalysisOptions,
}

impl Default for RepriseServer {
    fn default() -> Self {
        Self::new(
            Some(reprise_core::DEFAULT_MAX_INPUT_BYTES),
            AnalysisOptions::default(),
        )
    }
}

#[tool_router]
impl RepriseServer {
    /// Create a new MCP server instance.
    ///
    /// `max_input_bytes` caps the size of submitted text (`None` disables the
    /// check); `defaults` fills any option a tool call leaves unset.
    pub fn new(max_input_bytes: Option<usize>, defaults: AnalysisOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input_bytes,
            defaults,
        }
    }

    /// Describe this server.
    #[tool(description = "Get the server name, version, description, and tool list")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        let d = &DESCRIPTION;
        let text = if params.format.eq_ignore_ascii_case("json") {
            serde_json::to_string_pretty(d)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!("{} {}: {} (tools: {})", d.name, d.version, d.description, d.tools.join(", "))
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Find repeated words, phrases, sentence openings, near-duplicate and
    /// long sentences.
    #[tool(
        description = "Analyze prose for repetition: most frequent words, repeated 3-4 word phrases, repeated sentence openings, near-duplicate sentence pairs, unusually long sentences, and counts of caller-supplied focus words. Returns the report as JSON."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        ingest::check_input_size(params.text.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let options = params.options(&self.defaults);
        let text = if params.strip_markdown {
            markdown::strip_to_prose(&params.text)
        } else {
            params.text
        };

        let report =
            analyze(&text, &options).map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let json = export::to_json(&report)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(
            words = report.totals.total_words,
            sentences = report.totals.total_sentences,
            strip_markdown = params.strip_markdown,
            "analyze_text done"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for RepriseServer {
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
                "{} MCP server. Call analyze_text with a draft to find repeated words, phrases, sentence openings, and near-duplicate or overlong sentences.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
