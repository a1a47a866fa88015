//! Stdio tool surface.
//!
//! Reads one JSON request per line from stdin and writes one JSON response
//! per line to stdout. Logs never touch stdout; the wire owns it. The
//! transport stays thin: parse, validate, call the core, serialize.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::catalog::DesignCatalog;
use crate::design::CharacterAssembler;
use crate::error::AppError;
use crate::models::{
    ArchetypeRulesParams, GenerateCharacterParams, ToolRequest, ToolResponse,
    METHOD_GENERATE_CHARACTER, METHOD_GET_ARCHETYPE_RULES,
};

/// The two-operation service over the frozen catalog.
pub struct ToolService {
    catalog: Arc<DesignCatalog>,
    assembler: CharacterAssembler,
}

impl ToolService {
    pub fn new(catalog: Arc<DesignCatalog>) -> Self {
        Self {
            assembler: CharacterAssembler::new(catalog.clone()),
            catalog,
        }
    }

    /// Dispatch one request to the core. Generation itself is total; the
    /// only rejections are malformed params and unknown archetype ids.
    pub fn dispatch(&self, request: &ToolRequest) -> Result<serde_json::Value, AppError> {
        match request.method.as_str() {
            METHOD_GENERATE_CHARACTER => {
                let params: GenerateCharacterParams =
                    serde_json::from_value(request.params.clone())?;
                params.validate()?;
                let spec = self
                    .assembler
                    .assemble(&params.user_prompt, params.design_intent.as_ref());
                Ok(serde_json::to_value(spec)?)
            }
            METHOD_GET_ARCHETYPE_RULES => {
                let params: ArchetypeRulesParams = serde_json::from_value(request.params.clone())?;
                params.validate()?;
                let rule = self.catalog.archetypes.lookup(&params.emotional_tone)?;
                Ok(serde_json::to_value(rule)?)
            }
            other => Err(AppError::Validation(format!("unknown method '{}'", other))),
        }
    }

    /// Handle one raw input line, always producing a response.
    pub fn handle_line(&self, line: &str) -> ToolResponse {
        let trace_id = Uuid::new_v4();

        match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) => {
                info!(%trace_id, method = %request.method, "request received");
                match self.dispatch(&request) {
                    Ok(result) => ToolResponse::ok(request.id, result),
                    Err(e) => {
                        warn!(%trace_id, error = %e, "request failed");
                        ToolResponse::err(request.id, e.to_string())
                    }
                }
            }
            Err(e) => {
                warn!(%trace_id, error = %e, "unparseable request line");
                ToolResponse::err(None, format!("invalid request: {}", e))
            }
        }
    }

    /// Serve until stdin closes.
    pub async fn serve(&self) -> Result<(), AppError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        info!(
            methods = %format!("{}, {}", METHOD_GENERATE_CHARACTER, METHOD_GET_ARCHETYPE_RULES),
            "tool service ready"
        );

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let response = self.handle_line(line);
            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            stdout.write_all(payload.as_bytes()).await?;
            stdout.flush().await?;
        }

        info!("stdin closed, shutting down");
        Ok(())
    }
}
