//! 解析セッション
//!
//! 表示中の結果・履歴キャッシュ・解析中フラグを保持し、
//! 解析サービスと表示層をつなぐ。状態の変更はすべて `&mut self` 経由で、
//! 履歴取得・解析完了・履歴選択の3経路からのみ行う。

use crate::client::AnalysisService;
use crate::display::Renderer;
use crate::error::{AiDetectError, Result};
use crate::scanner::SelectedFile;
use ai_detect_common::{
    normalize, normalize_all, HistoryCache, HistoryView, ResultOrigin, ResultRecord, ResultView,
    HISTORY_CAPACITY,
};
use tracing::{debug, error, info, warn};

/// 解析リクエストの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalyzeState {
    #[default]
    Idle,
    Pending,
}

pub struct Session<S, R> {
    service: S,
    renderer: R,
    history: HistoryCache,
    current: Option<ResultRecord>,
    state: AnalyzeState,
    history_limit: usize,
}

impl<S: AnalysisService, R: Renderer> Session<S, R> {
    pub fn new(service: S, renderer: R) -> Self {
        Self {
            service,
            renderer,
            history: HistoryCache::new(),
            current: None,
            state: AnalyzeState::Idle,
            history_limit: HISTORY_CAPACITY,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.clamp(1, self.history.capacity());
        self
    }

    /// 履歴を取得してキャッシュを置き換える
    ///
    /// 失敗時はキャッシュを「取得不可」表示にし、保持中の内容は残す。
    pub async fn load_history(&mut self) -> Result<usize> {
        let outcome = self.service.history(self.history_limit).await;

        let result = match outcome {
            Ok(items) => {
                let records = normalize_all(items);
                debug!(count = records.len(), "履歴を取得");
                self.history.load(records);
                Ok(self.history.len())
            }
            Err(e) => {
                error!(error = %e, "履歴の読み込みに失敗");
                self.history.mark_unavailable();
                Err(e)
            }
        };

        self.render_history();
        result
    }

    /// 選択ファイルのプレビュー
    pub fn preview(&mut self, file: &SelectedFile) {
        if !file.is_image() {
            warn!(file = %file.name, content_type = %file.content_type, "画像以外のファイルです");
        }
        self.renderer.show_selected(file);
    }

    /// 画像を解析し、結果を表示して履歴の先頭に追加する
    ///
    /// 失敗時は表示中の結果・履歴を変更せず、エラーを表示する。
    /// 完了・失敗・途中キャンセルのいずれでも解析中表示は解除される。
    pub async fn submit(&mut self, file: &SelectedFile) -> Result<&ResultRecord> {
        let outcome = {
            let _pending = PendingGuard::begin(&mut self.state, &mut self.renderer)?;
            self.service.analyze(file).await
        };

        match outcome {
            Ok(response) => {
                let record = normalize(response);
                info!(id = ?record.id, summary = ?record.summary, "解析完了");

                self.renderer
                    .show_result(&ResultView::from_record(&record, ResultOrigin::Live));
                self.history.push(record.clone());
                self.render_history();

                Ok(self.current.insert(record))
            }
            Err(e) => {
                error!(error = %e, "解析リクエスト失敗");
                self.renderer.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// 履歴のレコードを再表示（通信なし・並び替えなし）
    pub fn replay(&mut self, index: usize) -> Result<&ResultRecord> {
        let record = self
            .history
            .select(index)
            .cloned()
            .ok_or(AiDetectError::HistoryIndexOutOfRange {
                index,
                len: self.history.len(),
            })?;

        self.renderer
            .show_result(&ResultView::from_record(&record, ResultOrigin::History));

        Ok(self.current.insert(record))
    }

    fn render_history(&mut self) {
        let view = HistoryView::from_cache(&self.history);
        self.renderer.show_history(&view);
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    pub fn current(&self) -> Option<&ResultRecord> {
        self.current.as_ref()
    }

    pub fn state(&self) -> AnalyzeState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state == AnalyzeState::Pending
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

/// 解析中フラグと読み込み表示を保持するガード
///
/// drop 時に必ず Idle に戻す（future が途中で破棄された場合も含む）。
struct PendingGuard<'a, R: Renderer> {
    state: &'a mut AnalyzeState,
    renderer: &'a mut R,
}

impl<'a, R: Renderer> PendingGuard<'a, R> {
    /// 解析中なら拒否（キューには積まない）
    fn begin(state: &'a mut AnalyzeState, renderer: &'a mut R) -> Result<Self> {
        if *state == AnalyzeState::Pending {
            return Err(AiDetectError::AnalyzeInProgress);
        }
        *state = AnalyzeState::Pending;
        renderer.set_loading(true);
        Ok(Self { state, renderer })
    }
}

impl<R: Renderer> Drop for PendingGuard<'_, R> {
    fn drop(&mut self) {
        *self.state = AnalyzeState::Idle;
        self.renderer.set_loading(false);
    }
}
