//! 内訳レポートパーサー
//!
//! 解析サービスが返す行指向のテキストレポートから、
//! Diffusion / GAN 見出しごとのモデル名と確信度を抽出する。
//!
//! ```text
//! Diffusion
//! SDXL
//! 62%
//! GAN
//! StyleGAN
//! 10%
//! ```
//!
//! 見出し行でモードを切り替え、モード中は「モデル名行 + `NN%`行」の
//! 2行ペアのみをタグとして採用する。それ以外の行は読み捨てる。

use crate::types::{ModelTag, ReportBreakdown};
use regex::Regex;
use std::iter::Peekable;

const DIFFUSION_HEADER: &str = "Diffusion";
const GAN_HEADER: &str = "GAN";

/// 走査中のセクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanMode {
    None,
    Diffusion,
    Gan,
}

impl ScanMode {
    /// 見出し行なら遷移先のモードを返す
    fn from_header(line: &str) -> Option<Self> {
        match line {
            DIFFUSION_HEADER => Some(ScanMode::Diffusion),
            GAN_HEADER => Some(ScanMode::Gan),
            _ => None,
        }
    }
}

/// レポート本文を内訳に変換する
///
/// 空・未指定の入力は空の内訳を返す。失敗しない。
///
/// # Examples
/// ```
/// use ai_detect_common::parse_breakdown;
///
/// let breakdown = parse_breakdown(Some("Diffusion\nSDXL\n62%"));
/// assert_eq!(breakdown.diffusion[0].name, "SDXL");
/// assert_eq!(breakdown.diffusion[0].value, 62.0);
/// ```
pub fn parse_breakdown(text: Option<&str>) -> ReportBreakdown {
    let mut breakdown = ReportBreakdown::default();
    let Some(text) = text else {
        return breakdown;
    };

    let mut lines = report_lines(text).peekable();
    let mut mode = ScanMode::None;

    while let Some(line) = lines.next() {
        if let Some(next_mode) = ScanMode::from_header(line) {
            mode = next_mode;
            continue;
        }

        let target = match mode {
            ScanMode::None => continue,
            ScanMode::Diffusion => &mut breakdown.diffusion,
            ScanMode::Gan => &mut breakdown.gan,
        };

        // 次行が `NN%` でなければこの行は捨てる
        if let Some(value) = take_percent_line(&mut lines) {
            target.push(ModelTag::new(line, value));
        }
    }

    sort_by_value_desc(&mut breakdown.diffusion);
    sort_by_value_desc(&mut breakdown.gan);

    breakdown
}

/// CR/LFで分割し、トリム後の空行を除いた行列
fn report_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// 次行が確信度行なら消費してその値を返す
fn take_percent_line<'a, I>(lines: &mut Peekable<I>) -> Option<f64>
where
    I: Iterator<Item = &'a str>,
{
    let value = lines.peek().and_then(|next| percent_line_value(next))?;
    lines.next();
    Some(value)
}

/// `62%` 形式（数字のみ + `%`）の行を数値化
fn percent_line_value(line: &str) -> Option<f64> {
    lazy_static::lazy_static! {
        static ref PERCENT_LINE_RE: Regex = Regex::new(r"^([0-9]+)%$").unwrap();
    }

    PERCENT_LINE_RE
        .captures(line)
        .and_then(|cap| cap[1].parse::<f64>().ok())
}

fn sort_by_value_desc(tags: &mut [ModelTag]) {
    tags.sort_by(|a, b| b.value.total_cmp(&a.value));
}
