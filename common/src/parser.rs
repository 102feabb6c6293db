//! APIレスポンスパーサー
//!
//! 解析サーバーの /analyze・/history のJSONボディを
//! ServerResponse に変換する。

use crate::error::{Error, Result};
use crate::types::ServerResponse;

/// /analyze のレスポンスボディをパース
///
/// # Arguments
/// * `body` - レスポンスボディ（JSONオブジェクト）
///
/// # Returns
/// * `Ok(ServerResponse)` - パース成功（欠落フィールドは None）
/// * `Err` - JSONでない、またはオブジェクトでない場合
pub fn parse_analyze_body(body: &str) -> Result<ServerResponse> {
    serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("解析結果 JSONパースエラー: {}", e)))
}

/// /history のレスポンスボディをパース
///
/// `null` は空の履歴として扱う。
///
/// # Examples
/// ```
/// use ai_detect_common::parse_history_body;
///
/// let items = parse_history_body(r#"[{"score": "62%"}]"#).unwrap();
/// assert_eq!(items[0].score.as_deref(), Some("62%"));
/// assert!(parse_history_body("null").unwrap().is_empty());
/// ```
pub fn parse_history_body(body: &str) -> Result<Vec<ServerResponse>> {
    let items: Option<Vec<ServerResponse>> = serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("履歴 JSONパースエラー: {}", e)))?;
    Ok(items.unwrap_or_default())
}
