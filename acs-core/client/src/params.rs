//! 命令与请求参数
//!
//! 每个平台命令对应一个强类型参数结构体，实现 [`Command`]。
//! 必填参数通过构造函数传入，可选参数通过 `with_*` 方法设置，
//! 提交前统一转换为 [`Params`]。

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;

/// 请求方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// 只读命令，使用 GET
    Read,
    /// 修改状态的命令，始终使用 POST
    Write,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Read => write!(f, "GET"),
            Verb::Write => write!(f, "POST"),
        }
    }
}

/// 平台命令
pub trait Command: Send + Sync {
    /// 响应类型
    type Response: DeserializeOwned;

    /// 命令名，如 `destroyVirtualMachine`
    const NAME: &'static str;

    /// 请求方式
    const VERB: Verb;

    /// 转换为请求参数
    fn to_params(&self) -> Params;
}

/// 请求参数（按键排序）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置字符串参数
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// 设置可选字符串参数，`None` 时忽略
    pub fn set_opt(&mut self, key: &str, value: Option<&String>) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v.as_str());
        }
        self
    }

    pub fn set_bool(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v.to_string());
        }
        self
    }

    pub fn set_int(&mut self, key: &str, value: Option<i64>) -> &mut Self {
        if let Some(v) = value {
            self.set(key, v.to_string());
        }
        self
    }

    /// 列表参数，逗号拼接；空列表忽略
    pub fn set_list(&mut self, key: &str, values: &[String]) -> &mut Self {
        if !values.is_empty() {
            self.set(key, values.join(","));
        }
        self
    }

    /// 键值对参数，`name[i].key=k&name[i].value=v`（如 tags）
    pub fn set_map_entries(&mut self, key: &str, map: &BTreeMap<String, String>) -> &mut Self {
        for (i, (k, v)) in map.iter().enumerate() {
            self.set(format!("{}[{}].key", key, i), k.as_str());
            self.set(format!("{}[{}].value", key, i), v.as_str());
        }
        self
    }

    /// 键值对参数，`name[0].k=v`（如 details）
    pub fn set_map_fields(&mut self, key: &str, map: &BTreeMap<String, String>) -> &mut Self {
        for (k, v) in map {
            self.set(format!("{}[0].{}", key, k), v.as_str());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 编码为查询字符串（RFC 3986，空格编码为 `%20`）
    pub fn encode(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_values_skip_none() {
        let mut params = Params::new();
        params
            .set("id", "vm-1")
            .set_opt("hostid", None)
            .set_bool("expunge", Some(true))
            .set_bool("forced", None)
            .set_int("size", Some(20));

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("expunge"), Some("true"));
        assert_eq!(params.get("size"), Some("20"));
        assert!(!params.contains("forced"));
    }

    #[test]
    fn test_list_and_map_encoding() {
        let mut params = Params::new();
        params.set_list("ids", &["a".to_string(), "b".to_string()]);
        params.set_list("empty", &[]);

        let mut tags = BTreeMap::new();
        tags.insert("env".to_string(), "prod".to_string());
        tags.insert("app".to_string(), "web".to_string());
        params.set_map_entries("tags", &tags);

        let mut details = BTreeMap::new();
        details.insert("cpuNumber".to_string(), "2".to_string());
        params.set_map_fields("details", &details);

        assert_eq!(params.get("ids"), Some("a,b"));
        assert!(!params.contains("empty"));
        assert_eq!(params.get("tags[0].key"), Some("app"));
        assert_eq!(params.get("tags[0].value"), Some("web"));
        assert_eq!(params.get("tags[1].key"), Some("env"));
        assert_eq!(params.get("details[0].cpuNumber"), Some("2"));
    }

    #[test]
    fn test_encode_is_sorted_and_escaped() {
        let params: Params = [("name", "my pool"), ("command", "listStoragePools")]
            .into_iter()
            .collect();
        assert_eq!(params.encode(), "command=listStoragePools&name=my%20pool");
    }
}
