use crate::AppError;
use crate::api::models::EntryDocument;
use crate::core::credential_resolver::Elicitor;
use crate::core::services::dictionary_service::DictionaryService;
use crate::core::services::types::{EntryArgs, SearchArgs};
use crate::error::CliError;
use crate::mcp::protocol::{RpcError, tool_failure, tool_success};
use serde_json::{Map, Value, json};

pub const SEARCH_TOOL: &str = "stdict_search";
pub const ENTRY_TOOL: &str = "stdict_entry";

pub fn tool_definitions() -> Value {
    json!([
        {
            "name": SEARCH_TOOL,
            "description": "표준국어대사전을 검색합니다. Returns { total, start, num, items: [{target_code, word, pos, definition, link, type, resource_uri}] }",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "q": { "type": "string", "description": "검색어" },
                    "start": { "type": "integer", "default": 1, "minimum": 1, "description": "검색 시작 번호" },
                    "num": { "type": "integer", "default": 10, "minimum": 10, "maximum": 100, "description": "결과 수 (10-100)" },
                    "advanced": { "type": "string", "enum": ["n", "y"], "default": "n", "description": "자세히 찾기 여부" }
                },
                "required": ["q"]
            }
        },
        {
            "name": ENTRY_TOOL,
            "description": "target_code로 표준국어대사전 단어 항목을 JSON으로 가져옵니다. 마크다운으로 보려면 리소스 stdict://entry/{target_code}를 사용하세요.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "target_code": { "type": "integer", "description": "표제어 고유 번호" }
                },
                "required": ["target_code"]
            }
        }
    ])
}

fn parse_args<T: serde::de::DeserializeOwned>(
    tool: &str,
    args: Map<String, Value>,
) -> Result<T, RpcError> {
    serde_json::from_value(Value::Object(args))
        .map_err(|e| RpcError::invalid_params(format!("Invalid arguments for {}: {}", tool, e)))
}

fn into_tool_result<T: serde::Serialize>(result: Result<T, AppError>) -> Result<Value, RpcError> {
    match result {
        Ok(payload) => serde_json::to_value(payload)
            .map(tool_success)
            .map_err(|e| RpcError::internal(e.to_string())),
        Err(AppError::Cli(CliError::InvalidArguments(message))) => {
            Err(RpcError::invalid_params(message))
        }
        Err(e) => {
            tracing::debug!(error = %e, "tool call failed");
            Ok(tool_failure(&e.display_friendly()))
        }
    }
}

/// Run a tool. Protocol-level problems are `Err`; lookup failures are in-band.
pub async fn call_tool(
    service: &DictionaryService,
    name: &str,
    args: Map<String, Value>,
    prompt: Option<&dyn Elicitor>,
) -> Result<Value, RpcError> {
    match name {
        SEARCH_TOOL => {
            let args: SearchArgs = parse_args(name, args)?;
            into_tool_result(service.search(args, prompt).await)
        }
        ENTRY_TOOL => {
            let args: EntryArgs = parse_args(name, args)?;
            let result = service
                .entry(args.target_code, prompt)
                .await
                .map(EntryDocument::from);
            into_tool_result(result)
        }
        _ => Err(RpcError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_tool_definitions_names() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, vec![SEARCH_TOOL, ENTRY_TOOL]);
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["q"]));
    }

    #[test]
    fn test_remote_error_is_in_band() {
        let result: Result<Value, AppError> = Err(AppError::Api(ApiError::Remote(
            "[020] 등록되지 않은 키입니다. - x".to_string(),
        )));
        let value = into_tool_result(result).unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "[020] 등록되지 않은 키입니다. - x");
    }

    #[test]
    fn test_invalid_arguments_are_protocol_errors() {
        let result: Result<Value, AppError> =
            Err(AppError::Cli(CliError::InvalidArguments("bad".to_string())));
        assert_eq!(
            into_tool_result(result).unwrap_err(),
            RpcError::invalid_params("bad")
        );

        let err = parse_args::<EntryArgs>(ENTRY_TOOL, Map::new()).unwrap_err();
        assert!(err.message.starts_with("Invalid arguments for stdict_entry"));
    }
}
