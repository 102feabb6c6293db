//! history.jsonl 読み込み
//!
//! 解析サーバーが1行1レコードで追記する履歴ファイルを、
//! サーバーを介さずに履歴ソースとして使う。

use super::AnalysisService;
use crate::error::{AiDetectError, Result};
use crate::scanner::SelectedFile;
use ai_detect_common::ServerResponse;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct JsonlHistory {
    path: PathBuf,
}

impl JsonlHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnalysisService for JsonlHistory {
    async fn analyze(&self, _file: &SelectedFile) -> Result<ServerResponse> {
        Err(AiDetectError::UnsupportedOperation(format!(
            "{} は履歴ファイルです。解析にはサーバーを指定してください",
            self.path.display()
        )))
    }

    async fn history(&self, limit: usize) -> Result<Vec<ServerResponse>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut items = parse_jsonl(&content);
        sort_newest_first(&mut items);
        items.truncate(limit);
        Ok(items)
    }
}

/// 1行ずつパースし、空行・不正行は読み飛ばす
fn parse_jsonl(content: &str) -> Vec<ServerResponse> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match serde_json::from_str::<ServerResponse>(line.trim()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(line = i + 1, error = %e, "履歴行を読み飛ばしました");
                None
            }
        })
        .collect()
}

/// created_at の新しい順（日時なしは末尾）
fn sort_newest_first(items: &mut [ServerResponse]) {
    items.sort_by(|a, b| {
        let a_at = a.created_at.as_deref().and_then(parse_created_at);
        let b_at = b.created_at.as_deref().and_then(parse_created_at);
        b_at.cmp(&a_at)
    });
}

/// 解析日時をパース（RFC 3339 → `YYYY-MM-DD HH:MM:SS` の順に試す）
pub fn parse_created_at(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text.trim()) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
