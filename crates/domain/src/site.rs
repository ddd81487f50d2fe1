//! # サイトコンテキスト
//!
//! 通知本文の組み立てに必要なサイト設定。ホストプラットフォームの
//! グローバルなオプション参照の代わりに、呼び出し時に明示的に渡す。

use serde::{Deserialize, Serialize};

use crate::{comment::CommentId, post::PostId};

/// サイト設定のスナップショット
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContext {
    /// サイト名（HTML エスケープされたまま保存されている場合がある）
    pub site_name:            String,
    /// サイト管理者のメールアドレス
    pub admin_email:          String,
    /// サイトのトップ URL（末尾スラッシュなし）
    pub home_url:             String,
    /// 管理画面の URL（末尾スラッシュなし）
    pub admin_url:            String,
    /// サイトのロケール（例: `"en_US"`, `"ja"`）
    pub locale:               String,
    /// ゴミ箱の保持日数。`0` の場合は完全削除
    pub trash_retention_days: u32,
}

impl SiteContext {
    /// ゴミ箱機能が有効か
    pub fn trash_enabled(&self) -> bool {
        self.trash_retention_days > 0
    }

    /// 投稿のパーマリンク（デフォルトのパーマリンク構造）
    pub fn permalink(&self, post_id: PostId) -> String {
        format!("{}/?p={post_id}", self.home_url)
    }

    /// 管理画面内の URL を組み立てる
    pub fn admin_link(&self, path: &str) -> String {
        format!("{}/{}", self.admin_url, path.trim_start_matches('/'))
    }

    /// コメントに対するモデレーション操作の URL
    pub fn comment_action_link(&self, action: &str, comment_id: CommentId) -> String {
        self.admin_link(&format!(
            "comment.php?action={action}&c={comment_id}#wpbody-content"
        ))
    }

    /// 承認待ちキューの URL
    pub fn moderation_queue_link(&self) -> String {
        self.admin_link("edit-comments.php?comment_status=moderated#wpbody-content")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_site(trash_retention_days: u32) -> SiteContext {
        SiteContext {
            site_name: "Example".to_string(),
            admin_email: "admin@example.com".to_string(),
            home_url: "https://example.com".to_string(),
            admin_url: "https://example.com/wp-admin".to_string(),
            locale: "en_US".to_string(),
            trash_retention_days,
        }
    }

    #[test]
    fn test_パーマリンクは投稿idのクエリ形式になる() {
        assert_eq!(
            make_site(30).permalink(PostId::new(12)),
            "https://example.com/?p=12"
        );
    }

    #[test]
    fn test_コメント操作urlにアクションとidが入る() {
        assert_eq!(
            make_site(30).comment_action_link("approve", CommentId::new(7)),
            "https://example.com/wp-admin/comment.php?action=approve&c=7#wpbody-content"
        );
    }

    #[test]
    fn test_保持日数0ではゴミ箱が無効() {
        assert!(make_site(30).trash_enabled());
        assert!(!make_site(0).trash_enabled());
    }

    #[test]
    fn test_承認待ちキューのurl() {
        assert_eq!(
            make_site(30).moderation_queue_link(),
            "https://example.com/wp-admin/edit-comments.php?comment_status=moderated#wpbody-content"
        );
    }
}
