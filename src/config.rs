use crate::error::{AiDetectError, Result};
use ai_detect_common::HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// サーバーURLの環境変数
pub const SERVER_ENV: &str = "AI_DETECT_SERVER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub history_limit: usize,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            history_limit: HISTORY_CAPACITY,
            timeout_seconds: 120, // ブラウザ自動操作を含むため長め
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AiDetectError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ai-detect").join("config.json"))
    }

    /// サーバーURLを解決（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_server_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(SERVER_ENV).ok();
        pick_server_url(flag, env.as_deref(), &self.server_url)
    }

    /// 履歴の取得件数（キャッシュ容量を上限とする）
    pub fn effective_history_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.history_limit)
            .clamp(1, HISTORY_CAPACITY)
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AiDetectError::Config(format!(
                "サーバーURLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url;
        self.save()
    }
}

/// 空白のみの値は未指定として次の候補へ
fn pick_server_url(flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
    fn given(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|s| !s.is_empty())
    }

    given(flag)
        .or_else(|| given(env))
        .unwrap_or(configured)
        .trim_end_matches('/')
        .to_string()
}
