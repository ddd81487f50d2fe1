//! # ユーザー
//!
//! ホストプラットフォームのアカウント。既定の通知先（管理者ロール）と
//! 投稿者のメールアドレス解決に使う。

define_numeric_id! {
    /// ユーザー ID
    pub struct UserId;
}

/// 管理者ロール名
pub const ADMINISTRATOR_ROLE: &str = "administrator";

/// ユーザーエンティティ（読み取り専用スナップショット）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id:    UserId,
    pub login: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl User {
    /// 指定ロールを持つか
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 通知に使えるメールアドレス（空白のみの場合は `None`）
    pub fn notification_email(&self) -> Option<&str> {
        let email = self.email.trim();
        (!email.is_empty()).then_some(email)
    }
}
