//! 解析履歴キャッシュ
//!
//! 直近の解析結果を新しい順に最大 N 件保持する。
//! 変更は `load`（一括置換）と `push`（先頭追加・末尾削除）のみ。
//! `select` は並び順を変えない。

use crate::types::ResultRecord;

/// 履歴の最大件数
pub const HISTORY_CAPACITY: usize = 8;

/// 履歴の表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryStatus {
    /// 未取得
    #[default]
    NotLoaded,
    /// 取得済み（またはライブ結果を追加済み）
    Available,
    /// 取得失敗
    Unavailable,
}

/// 履歴キャッシュ
#[derive(Debug, Clone)]
pub struct HistoryCache {
    items: Vec<ResultRecord>,
    capacity: usize,
    status: HistoryStatus,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            status: HistoryStatus::NotLoaded,
        }
    }

    /// 取得した履歴で一括置換（容量を超える分は切り捨て）
    pub fn load(&mut self, records: Vec<ResultRecord>) {
        self.items = records;
        self.items.truncate(self.capacity);
        self.status = HistoryStatus::Available;
    }

    /// 取得失敗を記録（保持中の内容はそのまま）
    pub fn mark_unavailable(&mut self) {
        self.status = HistoryStatus::Unavailable;
    }

    /// 先頭に追加し、容量超過分を末尾から削除
    pub fn push(&mut self, record: ResultRecord) {
        self.items.insert(0, record);
        self.items.truncate(self.capacity);
        self.status = HistoryStatus::Available;
    }

    /// 再表示用にレコードを参照（並び順は変えない）
    pub fn select(&self, index: usize) -> Option<&ResultRecord> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[ResultRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn status(&self) -> HistoryStatus {
        self.status
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a HistoryCache {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize) -> ResultRecord {
        ResultRecord {
            id: Some(format!("rec-{}", id)),
            score: Some(format!("{}%", id * 10)),
            ..Default::default()
        }
    }

    fn ids(cache: &HistoryCache) -> Vec<String> {
        cache.iter().filter_map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = HistoryCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), HISTORY_CAPACITY);
        assert_eq!(cache.status(), HistoryStatus::NotLoaded);
    }

    #[test]
    fn test_push_nine_evicts_first() {
        let mut cache = HistoryCache::new();
        for i in 1..=9 {
            cache.push(record(i));
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(cache.select(0).and_then(|r| r.id.as_deref()), Some("rec-9"));
        assert!(cache.iter().all(|r| r.id.as_deref() != Some("rec-1")));
        assert_eq!(cache.select(7).and_then(|r| r.id.as_deref()), Some("rec-2"));
    }

    #[test]
    fn test_select_does_not_reorder() {
        let mut cache = HistoryCache::new();
        for i in 1..=5 {
            cache.push(record(i));
        }
        let before = ids(&cache);

        for i in 0..cache.len() {
            assert!(cache.select(i).is_some());
            assert_eq!(ids(&cache), before);
        }
        assert_eq!(cache.len(), 5);
        assert!(cache.select(5).is_none());
    }

    #[test]
    fn test_load_replaces_and_truncates() {
        let mut cache = HistoryCache::new();
        cache.push(record(100));

        cache.load((1..=10).map(record).collect());

        assert_eq!(cache.len(), HISTORY_CAPACITY);
        assert_eq!(ids(&cache)[0], "rec-1");
        assert!(cache.iter().all(|r| r.id.as_deref() != Some("rec-100")));
        assert_eq!(cache.status(), HistoryStatus::Available);
    }

    #[test]
    fn test_mark_unavailable_keeps_contents() {
        let mut cache = HistoryCache::new();
        cache.load(vec![record(1), record(2)]);

        cache.mark_unavailable();

        assert_eq!(cache.status(), HistoryStatus::Unavailable);
        assert_eq!(ids(&cache), vec!["rec-1", "rec-2"]);
    }

    #[test]
    fn test_push_after_unavailable_becomes_available() {
        let mut cache = HistoryCache::new();
        cache.mark_unavailable();

        cache.push(record(1));

        assert_eq!(cache.status(), HistoryStatus::Available);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_small_capacity() {
        let mut cache = HistoryCache::with_capacity(2);
        cache.push(record(1));
        cache.push(record(2));
        cache.push(record(3));
        assert_eq!(ids(&cache), vec!["rec-3", "rec-2"]);
    }
}
