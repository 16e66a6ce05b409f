//! CLI 配置管理
//!
//! 配置保存在 `~/.config/acs/config.toml`，每个 profile 对应一个平台地址与密钥。

use acs_client::AcsConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// CLI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// 默认 profile
    pub default_profile: Option<String>,

    /// 配置版本
    #[serde(default = "default_version")]
    pub version: String,

    /// 平台连接配置
    #[serde(default)]
    pub profiles: BTreeMap<String, AcsConfig>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_profile: None,
            version: default_version(),
            profiles: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// 获取配置文件路径
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("无法获取用户主目录")?;
        Ok(home.join(".config").join("acs").join("config.toml"))
    }

    /// 加载配置，文件不存在时返回空配置
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;

        Self::from_toml(&content).with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 保存配置
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建配置目录失败: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("序列化配置失败")?;

        fs::write(&path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

        Ok(())
    }

    /// 添加 profile
    pub fn add_profile(&mut self, name: &str, config: AcsConfig) -> Result<()> {
        if self.profiles.contains_key(name) {
            anyhow::bail!("profile {} 已存在", name);
        }
        config
            .validate()
            .with_context(|| format!("profile {} 配置无效", name))?;

        self.profiles.insert(name.to_string(), config);

        // 第一个 profile 作为默认
        if self.default_profile.is_none() {
            self.default_profile = Some(name.to_string());
        }

        Ok(())
    }

    /// 移除 profile
    pub fn remove_profile(&mut self, name: &str) -> Result<()> {
        if self.profiles.remove(name).is_none() {
            anyhow::bail!("profile {} 不存在", name);
        }

        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }

        Ok(())
    }

    /// 设置默认 profile
    pub fn set_default_profile(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            anyhow::bail!("profile {} 不存在", name);
        }

        self.default_profile = Some(name.to_string());
        Ok(())
    }

    /// 按名称取 profile，未指定时使用默认 profile
    pub fn get_profile(&self, name: Option<&str>) -> Result<&AcsConfig> {
        let name = match name.or(self.default_profile.as_deref()) {
            Some(name) => name,
            None => anyhow::bail!("未指定 profile，请先执行 `acs profile add`"),
        };

        self.profiles
            .get(name)
            .with_context(|| format!("profile {} 不存在", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(endpoint: &str) -> AcsConfig {
        AcsConfig::new(endpoint, "key", "secret")
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.profiles.is_empty());
        assert_eq!(config.default_profile, None);
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_add_remove_profile() {
        let mut config = CliConfig::default();

        config
            .add_profile("lab", sample("http://10.0.0.1:8080/client/api"))
            .unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("lab"));

        config
            .add_profile("prod", sample("https://cloud.example.com/client/api"))
            .unwrap();
        assert_eq!(config.profiles.len(), 2);
        assert_eq!(config.default_profile.as_deref(), Some("lab"));

        config.set_default_profile("prod").unwrap();
        assert_eq!(
            config.get_profile(None).unwrap().endpoint,
            "https://cloud.example.com/client/api"
        );

        config.remove_profile("prod").unwrap();
        assert_eq!(config.default_profile, None);
        assert!(config.get_profile(None).is_err());
        assert!(config.get_profile(Some("lab")).is_ok());
    }

    #[test]
    fn test_duplicate_and_invalid_profile() {
        let mut config = CliConfig::default();
        config
            .add_profile("lab", sample("http://10.0.0.1:8080/client/api"))
            .unwrap();

        assert!(config
            .add_profile("lab", sample("http://10.0.0.2:8080/client/api"))
            .is_err());
        assert!(config.add_profile("bad", sample("not a url")).is_err());
        assert!(config.remove_profile("missing").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = CliConfig::default();
        config
            .add_profile("lab", sample("http://10.0.0.1:8080/client/api"))
            .unwrap();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = CliConfig::from_toml(&text).unwrap();

        let lab = parsed.get_profile(Some("lab")).unwrap();
        assert_eq!(lab.api_key, "key");
        assert_eq!(lab.async_options.timeout_ms, 300_000);
        assert_eq!(parsed.default_profile.as_deref(), Some("lab"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
default_profile = "lab"

[profiles.lab]
endpoint = "http://10.0.0.1:8080/client/api"
api_key = "key"
secret_key = "secret"

[profiles.lab.async_options]
timeout_ms = 60000
"#;
        let config = CliConfig::from_toml(text).unwrap();
        let lab = config.get_profile(None).unwrap();

        assert_eq!(lab.connect_timeout, 10);
        assert!(lab.verify_ssl);
        assert!(lab.async_options.async_mode);
        assert_eq!(lab.async_options.timeout_ms, 60_000);
        assert_eq!(lab.async_options.poll_interval, 1000);
    }
}
