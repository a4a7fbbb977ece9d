use crate::core::credential_resolver::{ElicitAction, Elicitor};
use crate::core::services::dictionary_service::DictionaryService;
use crate::error::{CredentialError, ProtocolError};
use crate::mcp::protocol::{
    MCP_PROTOCOL_VERSION, MCP_SERVER_NAME, RpcError, error_response, request, success_response,
};
use crate::mcp::resources::{read_resource, resource_list, resource_templates};
use crate::mcp::tools::{call_tool, tool_definitions};
use crate::mcp::transport::{Incoming, Transport};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

pub struct McpServer<R, W> {
    service: DictionaryService,
    transport: Mutex<Transport<R, W>>,
    client_elicitation: AtomicBool,
    next_request_id: AtomicU64,
}

impl McpServer<BufReader<Stdin>, Stdout> {
    pub fn stdio(service: DictionaryService) -> Self {
        Self::new(
            service,
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
    }
}

impl<R, W> McpServer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(service: DictionaryService, reader: R, writer: W) -> Self {
        Self {
            service,
            transport: Mutex::new(Transport::new(reader, writer)),
            client_elicitation: AtomicBool::new(false),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Recover the output stream once the session is over.
    pub fn into_writer(self) -> W {
        self.transport.into_inner().into_writer()
    }

    /// Handle messages until the peer closes the stream.
    pub async fn serve(&self) -> Result<(), ProtocolError> {
        loop {
            let incoming = self.transport.lock().await.next_message().await?;
            let Some(incoming) = incoming else {
                break;
            };

            let response = match incoming {
                Incoming::Message(value) => self.handle_message(value).await,
                Incoming::Malformed(e) => {
                    tracing::warn!(error = %e, "unparseable MCP message");
                    Some(error_response(
                        Value::Null,
                        RpcError::parse_error(format!("Parse error: {}", e)),
                    ))
                }
            };

            if let Some(response) = response {
                self.transport.lock().await.write_message(&response).await?;
            }
        }

        tracing::debug!("MCP client closed the stream");
        Ok(())
    }

    async fn handle_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            tracing::debug!("ignoring unsolicited response");
            return None;
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        match obj.get("id").cloned() {
            Some(id) => Some(match self.handle_request(method, params).await {
                Ok(result) => success_response(id, result),
                Err(err) => error_response(id, err),
            }),
            None => {
                tracing::debug!(method, "notification");
                None
            }
        }
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => Ok(resource_list()),
            "resources/templates/list" => Ok(resource_templates()),
            "resources/read" => {
                let uri = params.get("uri").and_then(Value::as_str).ok_or_else(|| {
                    RpcError::invalid_params("resources/read requires string field 'uri'")
                })?;
                read_resource(&self.service, uri).await
            }
            "prompts/list" => Ok(json!({ "prompts": [] })),
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize(&self, params: &Value) -> Value {
        let elicitation = params
            .get("capabilities")
            .and_then(|c| c.get("elicitation"))
            .is_some();
        self.client_elicitation.store(elicitation, Ordering::SeqCst);
        tracing::debug!(elicitation, "client initialized");

        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false }
            },
            "serverInfo": {
                "name": MCP_SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let args = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            None | Some(Value::Null) => Map::new(),
            Some(_) => return Err(RpcError::invalid_params("arguments must be an object")),
        };

        if self.client_elicitation.load(Ordering::SeqCst) {
            let prompt = PeerElicitor {
                transport: &self.transport,
                id: json!(format!(
                    "stdict-elicit-{}",
                    self.next_request_id.fetch_add(1, Ordering::SeqCst)
                )),
            };
            call_tool(&self.service, name, args, Some(&prompt)).await
        } else {
            call_tool(&self.service, name, args, None).await
        }
    }
}

/// Asks the connected host to prompt its user, over the same stream.
struct PeerElicitor<'a, R, W> {
    transport: &'a Mutex<Transport<R, W>>,
    id: Value,
}

fn elicitation_request(id: Value, message: &str) -> Value {
    request(
        id,
        "elicitation/create",
        json!({
            "message": message,
            "requestedSchema": {
                "type": "object",
                "properties": { "value": { "type": "string" } },
                "required": ["value"]
            }
        }),
    )
}

fn parse_elicitation_response(response: &Value) -> Result<ElicitAction, CredentialError> {
    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(CredentialError::Elicitation(message.to_string()));
    }

    let result = response.get("result").unwrap_or(&Value::Null);
    match result.get("action").and_then(Value::as_str) {
        Some("accept") => {
            let value = match result.get("content").and_then(|c| c.get("value")) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            Ok(ElicitAction::Accept(value))
        }
        Some("decline") => Ok(ElicitAction::Decline),
        Some("cancel") => Ok(ElicitAction::Cancel),
        other => Err(CredentialError::Elicitation(format!(
            "unexpected elicitation action: {:?}",
            other
        ))),
    }
}

#[async_trait]
impl<R, W> Elicitor for PeerElicitor<'_, R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn elicit(&self, message: &str) -> Result<ElicitAction, CredentialError> {
        let mut transport = self.transport.lock().await;
        transport
            .write_message(&elicitation_request(self.id.clone(), message))
            .await
            .map_err(|e| CredentialError::Elicitation(e.to_string()))?;
        let response = transport
            .await_response(&self.id)
            .await
            .map_err(|e| CredentialError::Elicitation(e.to_string()))?;
        parse_elicitation_response(&response)
    }
}
