//! 响应规范化
//!
//! 平台的 JSON 编码存在两处类型不一致：
//! - `success` 有时是字符串 `"true"` / `"false"`
//! - `ostypeid` 有时是数字
//!
//! 在结构化解码之前统一修正，所有响应类型共用同一套规则。

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{AcsError, Result};

/// 将响应体解析为信封对象
///
/// 解析失败时直接返回错误，不做部分规范化；平台错误响应转换为 `ApiError`
pub fn decode_envelope(body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AcsError::ParseError(format!("响应不是有效的 JSON: {}", e)))?;

    let envelope = unwrap_envelope(value);
    if let Some(err) = api_error(&envelope) {
        warn!("平台返回错误: {}", err);
        return Err(err);
    }

    Ok(envelope)
}

/// 去掉单键包装层
///
/// `{"destroyvirtualmachineresponse": {...}}`、`{"virtualmachine": {...}}`
/// 这类只有一个键且值为对象的结构，逐层返回内层对象
pub fn unwrap_envelope(mut value: Value) -> Value {
    loop {
        value = match value {
            Value::Object(map) if map.len() == 1 && map.values().all(Value::is_object) => map
                .into_iter()
                .next()
                .map(|(_, inner)| inner)
                .unwrap_or(Value::Null),
            other => return other,
        };
    }
}

/// 识别平台错误响应 (`errorcode` + `errortext`)
pub fn api_error(envelope: &Value) -> Option<AcsError> {
    let code = envelope.get("errorcode")?.as_u64()?;
    let text = envelope.get("errortext")?.as_str()?;
    Some(AcsError::ApiError(
        u16::try_from(code).unwrap_or(u16::MAX),
        text.to_string(),
    ))
}

/// 应用规范化规则
///
/// 作用于信封对象本身，以及其顶层数组中的每个对象（列表响应）。
/// 重复调用结果不变。
pub fn normalize(mut value: Value) -> Value {
    if let Value::Object(map) = &mut value {
        normalize_object(map);
        for field in map.values_mut() {
            if let Value::Array(items) = field {
                for item in items.iter_mut() {
                    if let Value::Object(obj) = item {
                        normalize_object(obj);
                    }
                }
            }
        }
    }
    value
}

fn normalize_object(map: &mut Map<String, Value>) {
    if let Some(success) = map.get_mut("success") {
        let coerced = match success.as_str() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };
        if let Some(b) = coerced {
            *success = Value::Bool(b);
        }
    }

    let ostypeid = match map.get("ostypeid") {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string()))
            .or_else(|| n.as_f64().map(|f| (f.trunc() as i64).to_string())),
        _ => None,
    };
    if let Some(id) = ostypeid {
        map.insert("ostypeid".to_string(), Value::String(id));
    }
}

/// 规范化后解码为目标类型
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(normalize(value))
        .map_err(|e| AcsError::ParseError(format!("响应结构不匹配: {}", e)))
}
