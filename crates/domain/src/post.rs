//! # 投稿
//!
//! コメントが付いた投稿。通知本文のタイトル・パーマリンクと、
//! 投稿者への通知に使う。

use crate::user::UserId;

define_numeric_id! {
    /// 投稿 ID
    pub struct PostId;
}

/// 投稿エンティティ（読み取り専用スナップショット）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id:        PostId,
    pub title:     String,
    /// 投稿者。ホストプラットフォームで `0` の場合は `None`
    pub author_id: Option<UserId>,
}
