//! # 拡張ポイント（フィルタチェーン）
//!
//! 送信直前に宛先・本文・件名・ヘッダーを外部コードが検査・書き換えできるようにする。
//!
//! ## 設計方針
//!
//! - **名前付き拡張ポイント**: [`ModerationFilters`] が 4 つのチェーンを持つ
//! - **純粋な変換**: 各フィルタは値とコメント ID を受け取り、新しい値を返す
//! - **登録順に適用**: 先に登録したフィルタの出力が次のフィルタの入力になる
//!
//! 外部からのカスタマイズはこのモジュールの拡張ポイントに限られる。

use std::fmt;

use crate::comment::CommentId;

type Filter<T> = Box<dyn Fn(T, CommentId) -> T + Send + Sync>;

/// 単一の拡張ポイントに登録されたフィルタの列
pub struct FilterChain<T> {
    filters: Vec<Filter<T>>,
}

impl<T> FilterChain<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// フィルタを末尾に登録する
    pub fn add(&mut self, filter: impl Fn(T, CommentId) -> T + Send + Sync + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// 登録順にすべてのフィルタを適用する
    pub fn apply(&self, value: T, comment_id: CommentId) -> T {
        self.filters
            .iter()
            .fold(value, |acc, filter| filter(acc, comment_id))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// モデレーション通知の拡張ポイント
///
/// | フィールド | 拡張ポイント名 | 値 |
/// |---|---|---|
/// | `recipients` | moderation recipients | 宛先リスト |
/// | `message_text` | moderation message text | 本文 |
/// | `subject` | moderation subject | 件名 |
/// | `headers` | moderation headers | 追加ヘッダー（`Name: value` の行） |
#[derive(Debug, Default)]
pub struct ModerationFilters {
    pub recipients:   FilterChain<Vec<String>>,
    pub message_text: FilterChain<String>,
    pub subject:      FilterChain<String>,
    pub headers:      FilterChain<String>,
}

impl ModerationFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 宛先リストのフィルタを登録する（ビルダー形式）
    pub fn with_recipients_filter(
        mut self,
        filter: impl Fn(Vec<String>, CommentId) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.recipients.add(filter);
        self
    }

    /// 本文のフィルタを登録する（ビルダー形式）
    pub fn with_message_text_filter(
        mut self,
        filter: impl Fn(String, CommentId) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message_text.add(filter);
        self
    }

    /// 件名のフィルタを登録する（ビルダー形式）
    pub fn with_subject_filter(
        mut self,
        filter: impl Fn(String, CommentId) -> String + Send + Sync + 'static,
    ) -> Self {
        self.subject.add(filter);
        self
    }

    /// ヘッダーのフィルタを登録する（ビルダー形式）
    pub fn with_headers_filter(
        mut self,
        filter: impl Fn(String, CommentId) -> String + Send + Sync + 'static,
    ) -> Self {
        self.headers.add(filter);
        self
    }
}
