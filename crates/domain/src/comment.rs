//! # コメント
//!
//! ホストプラットフォームに投稿されたコメントを表現する。
//! コメント本体の保存・取得はホストプラットフォームの責務で、
//! このクレートは取得済みのスナップショットのみを扱う。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`Comment`] | 投稿されたコメント（通常コメント / ピンバック / トラックバック） |
//! | [`CommentType`] | コメント種別。テンプレート選択に使う |
//! | [`ApprovalState`] | 承認状態。`"0"` が承認待ち |

use serde::{Deserialize, Serialize};

use crate::post::PostId;

define_numeric_id! {
    /// コメント ID
    pub struct CommentId;
}

/// コメント種別
///
/// ホストプラットフォームの `comment_type` カラムの値。
/// 空文字列と `"comment"` は通常コメントとして扱う。
/// 未知の値は [`Other`](CommentType::Other) に保持し、通常コメントのテンプレートで通知する。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommentType {
    /// 通常コメント
    #[default]
    Comment,
    /// ピンバック
    Pingback,
    /// トラックバック
    Trackback,
    /// 将来追加される種別など
    Other(String),
}

impl CommentType {
    /// DB / フォーム上の文字列表現
    pub fn as_str(&self) -> &str {
        match self {
            Self::Comment => "comment",
            Self::Pingback => "pingback",
            Self::Trackback => "trackback",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for CommentType {
    fn from(s: &str) -> Self {
        match s {
            "" | "comment" => Self::Comment,
            "pingback" => Self::Pingback,
            "trackback" => Self::Trackback,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CommentType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<CommentType> for String {
    fn from(t: CommentType) -> Self {
        t.as_str().to_string()
    }
}

/// コメントの承認状態
///
/// ホストプラットフォームの `comment_approved` カラムの値。
/// 通知の対象になるのは [`Pending`](ApprovalState::Pending)（`"0"`）のみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApprovalState {
    /// 承認待ち（`"0"`）
    Pending,
    /// 承認済み（`"1"`）
    Approved,
    /// スパム判定
    Spam,
    /// ゴミ箱
    Trash,
    /// その他の状態（`"post-trashed"` など）
    Other(String),
}

impl ApprovalState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "0",
            Self::Approved => "1",
            Self::Spam => "spam",
            Self::Trash => "trash",
            Self::Other(s) => s,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<&str> for ApprovalState {
    fn from(s: &str) -> Self {
        match s {
            "0" => Self::Pending,
            "1" => Self::Approved,
            "spam" => Self::Spam,
            "trash" => Self::Trash,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ApprovalState {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ApprovalState> for String {
    fn from(state: ApprovalState) -> Self {
        state.as_str().to_string()
    }
}

/// コメントエンティティ（読み取り専用スナップショット）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id:           CommentId,
    pub post_id:      PostId,
    pub comment_type: CommentType,
    pub author_name:  String,
    pub author_email: String,
    pub author_ip:    String,
    pub author_url:   String,
    pub content:      String,
    pub approval:     ApprovalState,
}
