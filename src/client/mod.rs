//! 解析サービスとの境界
//!
//! - HttpService: 解析サーバー（/analyze, /history）
//! - JsonlHistory: サーバーが書き出す history.jsonl を直接読む（履歴のみ）

mod http;
mod local;

pub use http::HttpService;
pub use local::{parse_created_at, JsonlHistory};

use crate::error::Result;
use crate::scanner::SelectedFile;
use ai_detect_common::ServerResponse;

pub const ANALYZE_PATH: &str = "/analyze";
pub const HISTORY_PATH: &str = "/history";

/// 解析サービス
///
/// どちらの呼び出しもキャンセルできない。失敗は通信エラーとして返す。
#[allow(async_fn_in_trait)]
pub trait AnalysisService {
    /// 画像を1枚アップロードして解析結果を受け取る
    async fn analyze(&self, file: &SelectedFile) -> Result<ServerResponse>;

    /// 新しい順に最大 `limit` 件の履歴を取得する
    async fn history(&self, limit: usize) -> Result<Vec<ServerResponse>>;
}

impl<T: AnalysisService> AnalysisService for &T {
    async fn analyze(&self, file: &SelectedFile) -> Result<ServerResponse> {
        (**self).analyze(file).await
    }

    async fn history(&self, limit: usize) -> Result<Vec<ServerResponse>> {
        (**self).history(limit).await
    }
}
