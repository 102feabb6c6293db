//! AI Detect Common Library
//!
//! 解析結果の取り込みパイプライン（表示ライブラリ非依存）:
//! レポートパース → 正規化 → 履歴キャッシュ → 表示指示

pub mod types;
pub mod error;
pub mod report;
pub mod normalizer;
pub mod history;
pub mod view;
pub mod parser;

pub use types::{ModelTag, ReportBreakdown, ResultRecord, ServerResponse, Verdict};
pub use error::{Error, Result};
pub use report::parse_breakdown;
pub use normalizer::{classify, normalize, normalize_all, parse_percent};
pub use history::{HistoryCache, HistoryStatus, HISTORY_CAPACITY};
pub use view::{
    format_bytes, HistoryCard, HistoryView, ResultOrigin, ResultView, ScoreBar, ScoreKind,
    SummaryChip, PLACEHOLDER,
};
pub use parser::{parse_analyze_body, parse_history_body};
