use crate::core::services::dictionary_service::DictionaryService;
use crate::mcp::protocol::RpcError;
use serde_json::{Value, json};

pub const HELP_URI: &str = "stdict://help";
pub const ENTRY_URI_TEMPLATE: &str = "stdict://entry/{target_code}";
const ENTRY_URI_PREFIX: &str = "stdict://entry/";
const MARKDOWN: &str = "text/markdown";

pub const HELP_DOCUMENT: &str = "# 표준국어대사전 MCP 서버

## 사용법

### 1. 검색
stdict_search(q=\"검색어\", start=1, num=10, advanced=\"n\")

### 2. 단어 상세 조회 (JSON)
stdict_entry(target_code=숫자)

### 3. 단어 상세 조회 (마크다운)
리소스 URI: stdict://entry/{target_code}

## 인증키
STDICT_API_KEY 환경변수, ~/.stdict_mcp/config.json 의 api_key, 시스템 키체인 순서로 찾습니다.
모두 없으면 도구 호출 시 입력을 요청하고 입력된 키를 저장합니다.

## 예시
1. stdict_search(q=\"사랑\") - 사랑 관련 단어들 검색
2. stdict_entry(target_code=435977) - 특정 단어의 상세 정보 (JSON)
3. 리소스에서 stdict://entry/435977 - 특정 단어의 상세 정보 (마크다운)
";

pub fn resource_list() -> Value {
    json!({
        "resources": [
            {
                "uri": HELP_URI,
                "name": "help",
                "description": "표준국어대사전 MCP 서버 사용법",
                "mimeType": MARKDOWN
            }
        ]
    })
}

pub fn resource_templates() -> Value {
    json!({
        "resourceTemplates": [
            {
                "uriTemplate": ENTRY_URI_TEMPLATE,
                "name": "entry",
                "description": "표준국어대사전 단어 항목을 마크다운으로 제공",
                "mimeType": MARKDOWN
            }
        ]
    })
}

fn contents(uri: &str, text: String) -> Value {
    json!({
        "contents": [
            { "uri": uri, "mimeType": MARKDOWN, "text": text }
        ]
    })
}

/// Target code in `stdict://entry/<code>`, if the URI has that shape.
pub fn parse_entry_uri(uri: &str) -> Option<Result<i64, RpcError>> {
    let code = uri.strip_prefix(ENTRY_URI_PREFIX)?;
    Some(
        code.parse::<i64>()
            .map_err(|_| RpcError::invalid_params(format!("Invalid target_code in {}", uri))),
    )
}

/// Read a resource. Entry lookups never prompt for a key.
pub async fn read_resource(service: &DictionaryService, uri: &str) -> Result<Value, RpcError> {
    if uri == HELP_URI {
        return Ok(contents(uri, HELP_DOCUMENT.to_string()));
    }

    match parse_entry_uri(uri) {
        Some(code) => {
            let markdown = service
                .entry_markdown(code?)
                .await
                .map_err(|e| RpcError::internal(e.display_friendly()))?;
            Ok(contents(uri, markdown))
        }
        None => Err(RpcError::resource_not_found(uri)),
    }
}
