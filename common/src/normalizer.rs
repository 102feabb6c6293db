//! 解析結果の正規化
//!
//! サーバーレスポンスを ResultRecord に変換し、
//! 表示用の数値化（パーセント文字列）と判定区分を提供する。
//! いずれの関数も失敗しない。欠落値はプレースホルダ・0に落とす。

use crate::types::{ResultRecord, ServerResponse, Verdict};

/// パーセント表示文字列を数値化する
///
/// `%` を除去してトリムし、浮動小数としてパースする。
/// 未指定・空・数値以外・非有限値は 0 を返す。
///
/// # Examples
/// ```
/// use ai_detect_common::parse_percent;
///
/// assert_eq!(parse_percent(Some("62%")), 62.0);
/// assert_eq!(parse_percent(Some("  7 % ")), 7.0);
/// assert_eq!(parse_percent(None), 0.0);
/// ```
pub fn parse_percent(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };

    let cleaned = text.replace('%', "");
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// サマリー文言から判定区分を決める
///
/// 小文字化した上で `deepfake` → AI生成系の語句 → それ以外 の順に判定する。
/// `ai-` は `ai-generated` も含む広い一致なので、具体的な語句より後に置く。
pub fn classify(summary: &str) -> Verdict {
    let s = summary.to_lowercase();

    if s.contains("deepfake") {
        Verdict::Deepfake
    } else if s.contains("ai-generated") || s.contains("ai generated") || s.contains("ai-") {
        Verdict::Ai
    } else {
        Verdict::NotAi
    }
}

/// サーバーレスポンスを ResultRecord に変換する
///
/// 文字列はそのまま写す。レポート本文のパースは表示時に行う。
pub fn normalize(response: ServerResponse) -> ResultRecord {
    let ServerResponse {
        id,
        summary,
        score,
        genai_percent,
        deepfake_percent,
        image_url,
        raw_text,
        created_at,
    } = response;

    ResultRecord {
        id,
        summary,
        image_url,
        score,
        genai_percent,
        deepfake_percent,
        raw_text,
        created_at,
    }
}

/// 履歴一覧をまとめて正規化
pub fn normalize_all(responses: Vec<ServerResponse>) -> Vec<ResultRecord> {
    responses.into_iter().map(normalize).collect()
}

impl From<ServerResponse> for ResultRecord {
    fn from(response: ServerResponse) -> Self {
        normalize(response)
    }
}
