//! 表示層
//!
//! セッションは Renderer に表示指示を送るだけで、描画方法は知らない。
//! TerminalRenderer は端末向けの実装。

use crate::client::parse_created_at;
use crate::scanner::SelectedFile;
use ai_detect_common::{
    format_bytes, HistoryView, ModelTag, ReportBreakdown, ResultView, ScoreBar, Verdict,
};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 表示先
pub trait Renderer {
    /// 解析中表示の切り替え（解析ボタンの無効化を含む）
    fn set_loading(&mut self, loading: bool);

    /// 選択ファイルのプレビュー
    fn show_selected(&mut self, file: &SelectedFile);

    /// 解析結果（ライブ・履歴共通）
    fn show_result(&mut self, view: &ResultView);

    /// 履歴ストリップ
    fn show_history(&mut self, view: &HistoryView);

    /// ユーザー向けエラー
    fn show_error(&mut self, message: &str);
}

/// バー全体の文字数
const BAR_CELLS: usize = 30;

#[derive(Default)]
pub struct TerminalRenderer {
    spinner: Option<ProgressBar>,
    /// 結果・履歴を出力しない（--json 用）
    quiet: bool,
    /// 相対の画像パスを解決するサーバーURL
    base_url: Option<String>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }
}

impl Renderer for TerminalRenderer {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                spinner.set_style(style);
            }
            spinner.set_message("解析中... サーバーの応答を待っています");
            spinner.enable_steady_tick(Duration::from_millis(120));
            self.spinner = Some(spinner);
        } else if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn show_selected(&mut self, file: &SelectedFile) {
        if self.quiet {
            return;
        }
        println!("🖼  {} ({})", file.name, format_bytes(file.size));
    }

    fn show_result(&mut self, view: &ResultView) {
        if self.quiet {
            return;
        }

        println!();
        if let Some(chip) = &view.summary {
            println!("{} {}", verdict_marker(chip.verdict), chip.text);
        }

        if let Some(url) = &view.image_url {
            println!("  画像: {}", resolve_image_url(self.base_url.as_deref(), url));
        }

        for bar in &view.scores {
            println!("{}", format_score_line(bar));
        }

        print_tag_section("Diffusion", &view.diffusion);
        print_tag_section("GAN", &view.gan);

        println!("\n✔ {}", view.status_message());
    }

    fn show_history(&mut self, view: &HistoryView) {
        if self.quiet {
            return;
        }

        println!("\n履歴 ({})", view.note);
        for card in &view.cards {
            let when = card
                .created_at
                .as_deref()
                .map(format_created_at)
                .unwrap_or_default();
            println!("  [{}] {} {}", card.index, card.title, when);
            println!("      {}", card.subtitle);
        }
    }

    fn show_error(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        eprintln!("✖ {}", message);
    }
}

fn verdict_marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Deepfake => "🔴",
        Verdict::Ai => "🟠",
        Verdict::NotAi => "🟢",
    }
}

/// サーバー相対の画像パス（`/uploads/<id>.jpg`）を絶対URLにする
pub fn resolve_image_url(base_url: Option<&str>, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    match base_url {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        ),
        None => url.to_string(),
    }
}

/// `ラベル  ████░░░░  62%` 形式の1行
pub fn format_score_line(bar: &ScoreBar) -> String {
    format!("  {:<16} {} {}", bar.kind.label(), render_bar(bar.width), bar.text)
}

/// 幅（%）を文字バーに変換。描画時のみ 0〜100 に丸める
pub fn render_bar(width: f64) -> String {
    let clamped = width.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_CELLS as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

/// 内訳のみを表示（report コマンド用）
pub fn print_breakdown(breakdown: &ReportBreakdown) {
    if breakdown.is_empty() {
        println!("Diffusion / GAN の内訳は見つかりませんでした");
        return;
    }
    print_tag_section("Diffusion", &breakdown.diffusion);
    print_tag_section("GAN", &breakdown.gan);
}

fn print_tag_section(title: &str, tags: &[ModelTag]) {
    if tags.is_empty() {
        return;
    }

    let pills: Vec<String> = tags.iter().map(|t| format!("[{}]", t)).collect();
    println!("  {}: {}", title, pills.join(" "));
}

/// 解析日時をローカル時刻で表示（パースできなければそのまま）
pub fn format_created_at(text: &str) -> String {
    parse_created_at(text)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| text.to_string())
}
