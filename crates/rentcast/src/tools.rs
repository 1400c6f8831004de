//! The RentCast catalog served as MCP tools.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::{Map, Value, json};
use tracing::{debug, error};

use crate::client::RentcastClient;
use crate::{Error, catalog};

/// Name reported in the MCP initialize result.
pub const SERVER_NAME: &str = "rentcast-mcp";

const INSTRUCTIONS: &str = "Tools for the RentCast real-estate data API: property records, \
    value and rent estimates, sale and rental listings, and market statistics. \
    Results are RentCast's JSON responses, unmodified.";

/// MCP server mapping each catalog entry to one RentCast GET.
#[derive(Debug, Clone)]
pub struct RentcastTools {
    client: RentcastClient,
}

impl RentcastTools {
    pub fn new(client: RentcastClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RentcastClient {
        &self.client
    }

    /// Every catalog entry as an MCP tool descriptor.
    pub fn tools(&self) -> Vec<Tool> {
        catalog::all().iter().map(|def| def.to_tool()).collect()
    }

    /// Run a tool, surfacing every failure as an [`Error`].
    pub async fn invoke(&self, name: &str, arguments: &Map<String, Value>) -> crate::Result<Value> {
        let def = catalog::find(name).ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        let request = def.prepare(arguments)?;
        self.client.get(&request.segments, &request.query).await
    }

    /// Run a tool and shape the outcome for MCP.
    ///
    /// Unknown tools and bad arguments are protocol errors (-32602) and
    /// never reach the vendor. Vendor and network failures come back as
    /// `isError` results carrying `{"status", "message"}`.
    pub async fn call(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, McpError> {
        match self.invoke(name, &arguments).await {
            Ok(body) => {
                debug!(tool = name, "tool call succeeded");
                Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
            }
            Err(e @ (Error::UnknownTool(_) | Error::InvalidArgument { .. })) => {
                debug!(tool = name, error = %e, "tool call rejected");
                Err(McpError::invalid_params(e.to_string(), None))
            }
            Err(e) => {
                error!(tool = name, error = %e, "RentCast request failed");
                Ok(CallToolResult::error(vec![Content::text(
                    failure_body(&e).to_string(),
                )]))
            }
        }
    }
}

/// The body returned to the model when the vendor call fails.
fn failure_body(err: &Error) -> Value {
    let message = match err {
        Error::Api { message, .. } => message.clone(),
        other => other.to_string(),
    };
    json!({
        "status": err.status(),
        "message": message,
    })
}

impl ServerHandler for RentcastTools {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.to_string();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments.unwrap_or_default())
            .await
    }
}
