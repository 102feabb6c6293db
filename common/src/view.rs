//! 表示指示の生成
//!
//! ResultRecord / HistoryCache から、描画層に渡す表示内容を組み立てる。
//! ライブ結果と履歴の再表示は同じ経路を通る。

use crate::history::{HistoryCache, HistoryStatus};
use crate::normalizer::{classify, parse_percent};
use crate::report::parse_breakdown;
use crate::types::{ModelTag, ResultRecord, Verdict};
use serde::Serialize;

/// 欠落値の表示
pub const PLACEHOLDER: &str = "–";

/// 空文字は未指定として扱う
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn display_or_placeholder(value: &Option<String>) -> String {
    present(value).unwrap_or(PLACEHOLDER).to_string()
}

/// 結果の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrigin {
    /// 今回の解析
    Live,
    /// 履歴からの再表示
    History,
}

impl ResultOrigin {
    /// ステータス行の文言
    pub fn status_message(&self) -> &'static str {
        match self {
            ResultOrigin::Live => "完了! 別の画像も解析できます",
            ResultOrigin::History => "保存済みの結果を表示しています。新しい画像もアップロードできます",
        }
    }
}

/// サマリーチップ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryChip {
    pub text: String,
    pub verdict: Verdict,
}

/// スコア種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Total,
    Genai,
    Deepfake,
}

impl ScoreKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreKind::Total => "AIスコア",
            ScoreKind::Genai => "生成AI",
            ScoreKind::Deepfake => "ディープフェイク",
        }
    }
}

/// スコアバー（幅はパーセント、上限は描画側で丸める）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBar {
    pub kind: ScoreKind,
    pub text: String,
    pub width: f64,
}

impl ScoreBar {
    fn new(kind: ScoreKind, value: &Option<String>) -> Self {
        Self {
            kind,
            text: display_or_placeholder(value),
            width: parse_percent(present(value)),
        }
    }
}

/// 結果1件分の表示内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub summary: Option<SummaryChip>,
    pub image_url: Option<String>,
    pub scores: [ScoreBar; 3],
    pub diffusion: Vec<ModelTag>,
    pub gan: Vec<ModelTag>,
    pub origin: ResultOrigin,
}

impl ResultView {
    pub fn from_record(record: &ResultRecord, origin: ResultOrigin) -> Self {
        let summary = present(&record.summary).map(|text| SummaryChip {
            text: text.to_string(),
            verdict: classify(text),
        });

        let breakdown = parse_breakdown(record.raw_text.as_deref());

        Self {
            summary,
            image_url: present(&record.image_url).map(str::to_string),
            scores: [
                ScoreBar::new(ScoreKind::Total, &record.score),
                ScoreBar::new(ScoreKind::Genai, &record.genai_percent),
                ScoreBar::new(ScoreKind::Deepfake, &record.deepfake_percent),
            ],
            diffusion: breakdown.diffusion,
            gan: breakdown.gan,
            origin,
        }
    }

    pub fn status_message(&self) -> &'static str {
        self.origin.status_message()
    }
}

/// 履歴カード
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryCard {
    pub index: usize,
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
}

impl HistoryCard {
    pub fn from_record(index: usize, record: &ResultRecord) -> Self {
        let subtitle = format!(
            "AI: {} · GenAI: {} · Face: {}",
            display_or_placeholder(&record.score),
            display_or_placeholder(&record.genai_percent),
            display_or_placeholder(&record.deepfake_percent),
        );

        Self {
            index,
            title: present(&record.summary).unwrap_or("サマリーなし").to_string(),
            subtitle,
            image_url: present(&record.image_url).map(str::to_string),
            created_at: present(&record.created_at).map(str::to_string),
        }
    }
}

/// 履歴ストリップの表示内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryView {
    pub note: String,
    pub cards: Vec<HistoryCard>,
}

impl HistoryView {
    pub fn from_cache(cache: &HistoryCache) -> Self {
        let cards: Vec<HistoryCard> = cache
            .iter()
            .enumerate()
            .map(|(i, record)| HistoryCard::from_record(i, record))
            .collect();

        let note = if cache.status() == HistoryStatus::Unavailable {
            "履歴を読み込めませんでした".to_string()
        } else if cards.is_empty() {
            "記録なし".to_string()
        } else {
            format!("記録: {}件", cards.len())
        };

        Self { note, cards }
    }
}

/// バイト数を B/KB/MB/GB 表記に変換
///
/// # Examples
/// ```
/// use ai_detect_common::format_bytes;
///
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> ResultRecord {
        ResultRecord {
            id: Some("a1".to_string()),
            summary: Some("Likely AI-generated".to_string()),
            image_url: Some("/uploads/a1.jpg".to_string()),
            score: Some("62%".to_string()),
            genai_percent: Some("58%".to_string()),
            deepfake_percent: Some("3%".to_string()),
            raw_text: Some("Diffusion\nMidjourney\n30%\nSDXL\n62%\nGAN\nStyleGAN\n10%".to_string()),
            created_at: Some("2026-10-19T08:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_result_view_full_record() {
        let view = ResultView::from_record(&full_record(), ResultOrigin::Live);

        let chip = view.summary.expect("サマリーが表示されない");
        assert_eq!(chip.verdict, Verdict::Ai);
        assert_eq!(chip.text, "Likely AI-generated");
        assert_eq!(view.image_url.as_deref(), Some("/uploads/a1.jpg"));
        assert_eq!(view.scores[0].text, "62%");
        assert_eq!(view.scores[0].width, 62.0);
        assert_eq!(view.scores[2].width, 3.0);
        assert_eq!(view.diffusion[0], ModelTag::new("SDXL", 62.0));
        assert_eq!(view.gan.len(), 1);
    }

    #[test]
    fn test_result_view_missing_fields() {
        let view = ResultView::from_record(&ResultRecord::default(), ResultOrigin::History);

        assert!(view.summary.is_none());
        assert!(view.image_url.is_none());
        for bar in &view.scores {
            assert_eq!(bar.text, PLACEHOLDER);
            assert_eq!(bar.width, 0.0);
        }
        assert!(view.diffusion.is_empty());
        assert!(view.gan.is_empty());
    }

    #[test]
    fn test_empty_strings_are_hidden() {
        let record = ResultRecord {
            summary: Some(String::new()),
            image_url: Some(String::new()),
            score: Some(String::new()),
            ..Default::default()
        };

        let view = ResultView::from_record(&record, ResultOrigin::Live);
        assert!(view.summary.is_none());
        assert!(view.image_url.is_none());
        assert_eq!(view.scores[0].text, PLACEHOLDER);
    }

    #[test]
    fn test_live_and_history_render_identically() {
        let record = full_record();
        let live = ResultView::from_record(&record, ResultOrigin::Live);
        let replay = ResultView::from_record(&record, ResultOrigin::History);

        assert_eq!(live.summary, replay.summary);
        assert_eq!(live.scores, replay.scores);
        assert_eq!(live.diffusion, replay.diffusion);
        assert_ne!(live.status_message(), replay.status_message());
    }

    #[test]
    fn test_history_card() {
        let card = HistoryCard::from_record(2, &full_record());
        assert_eq!(card.index, 2);
        assert_eq!(card.title, "Likely AI-generated");
        assert_eq!(card.subtitle, "AI: 62% · GenAI: 58% · Face: 3%");

        let empty = HistoryCard::from_record(0, &ResultRecord::default());
        assert_eq!(empty.title, "サマリーなし");
        assert_eq!(empty.subtitle, "AI: – · GenAI: – · Face: –");
    }

    #[test]
    fn test_history_view_notes() {
        let mut cache = HistoryCache::new();
        assert_eq!(HistoryView::from_cache(&cache).note, "記録なし");

        cache.push(full_record());
        let view = HistoryView::from_cache(&cache);
        assert_eq!(view.note, "記録: 1件");
        assert_eq!(view.cards.len(), 1);

        cache.mark_unavailable();
        let view = HistoryView::from_cache(&cache);
        assert_eq!(view.note, "履歴を読み込めませんでした");
        assert_eq!(view.cards.len(), 1);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.0 B");
        assert_eq!(format_bytes(512), "512.0 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024 * 1024), "3072.0 GB");
    }
}
