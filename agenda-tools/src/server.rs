//! agenda-tools/src/server.rs
//! MCP surface: a single `getMyCalendarDataByDate` tool.

use std::sync::Arc;

use agenda_core::DateResolver;
use chrono::{DateTime, Utc};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Deserialize;
use tracing::info;

use crate::calendar::CalendarQueryAdapter;

pub const SERVER_NAME: &str = "agenda";

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CalendarDateArgs {
    /// Date string (YYYY-MM-DD), 'today' or 'tomorrow'. Defaults to today.
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Clone)]
pub struct CalendarServer {
    resolver: DateResolver,
    adapter: Arc<CalendarQueryAdapter>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CalendarServer {
    pub fn new(adapter: CalendarQueryAdapter) -> Self {
        Self {
            resolver: DateResolver::new(adapter.settings().time_zone),
            adapter: Arc::new(adapter),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "getMyCalendarDataByDate",
        description = "List the meetings on my calendar for one day. Accepts YYYY-MM-DD, 'today' or 'tomorrow'."
    )]
    async fn get_my_calendar_data_by_date(
        &self,
        Parameters(args): Parameters<CalendarDateArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.lookup(args.date.as_deref(), Utc::now()).await
    }
}

impl CalendarServer {
    /// Resolve `date` relative to `now` and query that day.
    ///
    /// An unusable date is an error result carrying usage text, and the calendar is not
    /// contacted. Everything else is a success result whose text is the pretty-printed
    /// `{"meetings": [...]}` or `{"error": "..."}` payload.
    pub async fn lookup(&self, date: Option<&str>, now: DateTime<Utc>) -> Result<CallToolResult, McpError> {
        let window = match self.resolver.resolve(date, now) {
            | Ok(window) => window,
            | Err(err) => {
                info!(input = ?date, "rejected date");
                return Ok(CallToolResult::error(vec![Content::text(err.to_string())]));
            }
        };

        let (start, end) = window.to_rfc3339();
        info!(%start, %end, "looking up calendar events");

        let result = self.adapter.events_on(&window).await;
        let body = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(body)]))
    }
}

#[tool_handler]
impl ServerHandler for CalendarServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Read-only access to one calendar. Call getMyCalendarDataByDate with a date \
                 (YYYY-MM-DD, 'today' or 'tomorrow') to list that day's meetings."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
