//! 调用任意 API 命令

use acs_client::{Params, Verb};
use anyhow::Result;

use super::common::{cancel_on_ctrl_c, create_client, with_spinner};
use super::output::print_json;
use crate::ClientArgs;

pub async fn handle(args: &ClientArgs, command: &str, raw: &[String], write: bool) -> Result<()> {
    let params = parse_params(raw)?;
    let verb = if write { Verb::Write } else { Verb::Read };

    let client = create_client(args)?;
    let cancel = cancel_on_ctrl_c();

    let value = with_spinner(
        format!("{} {}", verb, command),
        client.execute_raw(command, &params, verb, &cancel),
    )
    .await?;

    print_json(&value)
}

/// 解析 `key=value` 参数
fn parse_params(raw: &[String]) -> Result<Params> {
    raw.iter()
        .map(|item| match item.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            _ => anyhow::bail!("参数格式应为 key=value: {}", item),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let raw = vec![
            "zoneid=z1".to_string(),
            "keyword=web=01".to_string(),
            "name=".to_string(),
        ];
        let params = parse_params(&raw).unwrap();
        assert_eq!(params.get("zoneid"), Some("z1"));
        assert_eq!(params.get("keyword"), Some("web=01"));
        assert_eq!(params.get("name"), Some(""));
    }

    #[test]
    fn test_parse_params_rejects_bad_format() {
        assert!(parse_params(&["zoneid".to_string()]).is_err());
        assert!(parse_params(&["=z1".to_string()]).is_err());
    }
}
