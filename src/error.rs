use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiDetectError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    /// 非成功ステータス。本文（なければ `HTTP <code>`）をそのまま表示する
    #[error("{endpoint} リクエストエラー: {message}")]
    ApiStatus { endpoint: String, message: String },

    #[error("APIレスポンスのパースに失敗: {0}")]
    ApiParse(String),

    #[error("解析中です。完了までお待ちください")]
    AnalyzeInProgress,

    #[error("履歴番号が範囲外です: {index}（{len}件）")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("この履歴ソースでは利用できません: {0}")]
    UnsupportedOperation(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl AiDetectError {
    /// 通信・応答系の失敗か（前の表示・履歴を保ったまま再試行できる）
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            AiDetectError::ApiCall(_) | AiDetectError::ApiStatus { .. } | AiDetectError::ApiParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AiDetectError>;
