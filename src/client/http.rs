//! 解析サーバーHTTPクライアント

use super::{AnalysisService, ANALYZE_PATH, HISTORY_PATH};
use crate::error::{AiDetectError, Result};
use crate::scanner::SelectedFile;
use ai_detect_common::{parse_analyze_body, parse_history_body, ServerResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// マルチパートのフィールド名
const FILE_FIELD: &str = "file";

pub struct HttpService {
    client: Client,
    base_url: String,
}

impl HttpService {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| AiDetectError::Config(format!("HTTPクライアント生成エラー: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl AnalysisService for HttpService {
    async fn analyze(&self, file: &SelectedFile) -> Result<ServerResponse> {
        let url = endpoint_url(&self.base_url, ANALYZE_PATH);
        debug!(%url, file = %file.name, size = file.size, "アップロード開始");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AiDetectError::ApiCall(format!("MIMEタイプが不正: {}", e)))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AiDetectError::ApiCall(format!("{} 送信失敗: {}", ANALYZE_PATH, e)))?;

        let body = read_success_body(response, ANALYZE_PATH).await?;
        debug!(len = body.len(), "解析レスポンス受信");

        parse_analyze_body(&body).map_err(|e| AiDetectError::ApiParse(e.to_string()))
    }

    async fn history(&self, limit: usize) -> Result<Vec<ServerResponse>> {
        let url = endpoint_url(&self.base_url, HISTORY_PATH);
        debug!(%url, limit, "履歴取得");

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| AiDetectError::ApiCall(format!("{} 送信失敗: {}", HISTORY_PATH, e)))?;

        let body = read_success_body(response, HISTORY_PATH).await?;
        parse_history_body(&body).map_err(|e| AiDetectError::ApiParse(e.to_string()))
    }
}

/// 成功時はボディを返し、非成功時はボディをエラーメッセージにする
async fn read_success_body(response: reqwest::Response, endpoint: &str) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AiDetectError::ApiCall(format!("{} 受信失敗: {}", endpoint, e)))?;

    if !status.is_success() {
        return Err(AiDetectError::ApiStatus {
            endpoint: endpoint.to_string(),
            message: status_message(status.as_u16(), &body),
        });
    }

    Ok(body)
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// 非成功レスポンスの表示文言
///
/// `{"detail": "..."}` 形式ならdetailを、空ボディなら `HTTP <code>` を使う。
fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {}", status);
    }

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
