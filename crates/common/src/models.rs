use crate::entities::certificates;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// 提交证书的请求体
///
/// 所有字段均可缺省；请求中携带的 `status` 会被忽略，新证书一律为 pending。
/// 请求体应通过 [`CreateCertificate::from_body`] 解析，它只接受 JSON 对象的字段。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCertificate {
    #[serde(default, deserialize_with = "lenient_text")]
    pub achievement: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
}

/// 请求体解析失败的原因
#[derive(Debug, Error)]
pub enum CreateBodyError {
    /// 不是合法 JSON，或顶层是标量 (400)
    #[error("malformed JSON body: {0}")]
    Malformed(String),

    /// 字段值无法转换为文本，如对象或数组 (500)
    #[error("invalid field value: {0}")]
    InvalidField(String),
}

impl CreateCertificate {
    /// 按 JSON body parser 的语义解析提交请求。
    ///
    /// 空请求体或非 JSON 的 Content-Type 视为 `{}`；顶层数组不携带任何命名字段，同样视为 `{}`。
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, CreateBodyError> {
        if !is_json_content_type(content_type) || body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: JsonValue = serde_json::from_slice(body)
            .map_err(|err| CreateBodyError::Malformed(err.to_string()))?;
        match value {
            JsonValue::Object(_) => serde_json::from_value(value)
                .map_err(|err| CreateBodyError::InvalidField(err.to_string())),
            JsonValue::Array(_) => Ok(Self::default()),
            other => Err(CreateBodyError::Malformed(format!(
                "top-level {} is not an object",
                json_kind(&other)
            ))),
        }
    }
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(raw) = content_type else {
        return false;
    };
    let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovedResponse {
    pub message: String,
    pub data: certificates::Model,
}

/// Accepts strings, numbers and booleans as text; `null` stays absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => Ok(Some(s)),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
        _ => "scalar",
    }
}
