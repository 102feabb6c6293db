//! 対話式の履歴再表示

use crate::client::AnalysisService;
use crate::display::Renderer;
use crate::error::{AiDetectError, Result};
use crate::session::Session;
use ai_detect_common::{HistoryCache, HistoryView};
use dialoguer::Select;

/// 選択肢（最後の項目は終了）
pub fn menu_labels(history: &HistoryCache) -> Vec<String> {
    let view = HistoryView::from_cache(history);
    let mut labels: Vec<String> = view
        .cards
        .iter()
        .map(|card| format!("[{}] {} | {}", card.index, card.title, card.subtitle))
        .collect();
    labels.push("終了".to_string());
    labels
}

/// 履歴を選んで再表示を繰り返す
pub async fn run_browse<S, R>(session: &mut Session<S, R>) -> Result<()>
where
    S: AnalysisService,
    R: Renderer,
{
    session.load_history().await?;

    if session.history().is_empty() {
        println!("再表示できる履歴がありません");
        return Ok(());
    }

    let mut last = 0;
    loop {
        let labels = menu_labels(session.history());
        let quit_index = labels.len() - 1;

        let choice = Select::new()
            .with_prompt("再表示する結果を選択")
            .items(&labels)
            .default(last)
            .interact_opt()
            .map_err(|e| AiDetectError::CliExecution(e.to_string()))?;

        match choice {
            Some(index) if index < quit_index => {
                session.replay(index)?;
                last = index;
            }
            _ => break,
        }
    }

    Ok(())
}
