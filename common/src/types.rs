//! 解析結果の型定義
//!
//! CLIと表示層で共有される型:
//! - ServerResponse: 解析サーバーの生レスポンス（/analyze, /history の1件）
//! - ResultRecord: 正規化済みの解析結果（ライブ・履歴共通）
//! - ModelTag / ReportBreakdown: レポート本文から抽出したモデル別の確信度

use serde::{Deserialize, Serialize};

/// 解析サーバーのレスポンス
///
/// 全フィールドが欠落・nullになり得る。未知のキーは無視する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerResponse {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub score: Option<String>,
    pub genai_percent: Option<String>,
    pub deepfake_percent: Option<String>,
    pub image_url: Option<String>,
    pub raw_text: Option<String>,
    pub created_at: Option<String>,
}

/// 正規化済みの解析結果
///
/// サーバーが整形した表示文字列をそのまま保持する。
/// レポート本文（raw_text）は表示時に都度パースする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,        // 判定ラベル

    #[serde(default)]
    pub image_url: Option<String>,      // サーバー上の画像URL

    #[serde(default)]
    pub score: Option<String>,          // AIスコア（例: "62%"）

    #[serde(default)]
    pub genai_percent: Option<String>,  // 生成AI確率

    #[serde(default)]
    pub deepfake_percent: Option<String>, // ディープフェイク確率

    #[serde(default)]
    pub raw_text: Option<String>,       // Diffusion/GAN内訳レポート

    #[serde(default)]
    pub created_at: Option<String>,     // 解析日時（履歴のみ）
}

/// モデル別の確信度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTag {
    pub name: String,
    pub value: f64,
}

impl ModelTag {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl std::fmt::Display for ModelTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}%", self.name, self.value)
    }
}

/// Diffusion / GAN の内訳（各リストは確信度の降順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportBreakdown {
    pub diffusion: Vec<ModelTag>,
    pub gan: Vec<ModelTag>,
}

impl ReportBreakdown {
    pub fn is_empty(&self) -> bool {
        self.diffusion.is_empty() && self.gan.is_empty()
    }
}

/// サマリーの判定区分（表示スタイル用、レコードには保存しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    NotAi,
    Ai,
    Deepfake,
}

impl Verdict {
    /// スタイルクラス名
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::NotAi => "notai",
            Verdict::Ai => "ai",
            Verdict::Deepfake => "deepfake",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
