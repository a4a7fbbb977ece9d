//! Translation of the dictionary API's error envelope
//!
//! The API reports failures with HTTP 200 and a body of the form
//! `{"error": {"error_code": "020", "message": "..."}}`.

use serde_json::Value;

const FALLBACK_EXPLANATION: &str = "요청 중 오류가 발생했습니다.";

fn explain(code: &str) -> &'static str {
    match code {
        "020" => "등록되지 않은 키입니다.",
        "021" => "일시적으로 사용 중지된 인증 키입니다.",
        "100" => "부적절한 쿼리 요청입니다(q 누락 등).",
        "103" => "부적절한 검색 개수(num)입니다.",
        _ => FALLBACK_EXPLANATION,
    }
}

/// Whether the response is an error envelope.
pub fn has_error_envelope(raw: &Value) -> bool {
    raw.get("error").is_some()
}

/// `"[<code>] <explanation>"`, with `" - <message>"` when the API sent one.
pub fn humanize_error(raw: &Value) -> String {
    let err = raw.get("error");
    let code = match err.and_then(|e| e.get("error_code")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let message = err
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("");

    let base = explain(&code);
    if message.is_empty() {
        format!("[{}] {}", code, base)
    } else {
        format!("[{}] {} - {}", code, base, message)
    }
}
