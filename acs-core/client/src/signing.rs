//! 请求签名
//!
//! 参数按键排序后编码，整体转为小写，使用 Secret Key 做 HMAC-SHA1，
//! 结果经 base64 编码后作为 `signature` 参数。

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{AcsError, Result};
use crate::params::Params;

type HmacSha1 = Hmac<Sha1>;

/// 计算签名
pub fn sign(params: &Params, secret_key: &str) -> Result<String> {
    let canonical = params.encode().to_lowercase();

    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())
        .map_err(|e| AcsError::ConfigError(format!("无效的 secret_key: {}", e)))?;
    mac.update(canonical.as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// 补全公共参数并签名
///
/// 返回的参数包含 `command`、`response`、`apikey` 与 `signature`
pub fn signed_params(command: &str, params: &Params, api_key: &str, secret_key: &str) -> Result<Params> {
    let mut signed = params.clone();
    signed
        .set("command", command)
        .set("response", "json")
        .set("apikey", api_key);

    let signature = sign(&signed, secret_key)?;
    signed.set("signature", signature);

    Ok(signed)
}
