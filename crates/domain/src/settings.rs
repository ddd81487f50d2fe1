//! # 通知設定
//!
//! モデレーション通知の宛先と「投稿者にも通知する」フラグ。
//! 設定画面から保存され、通知のたびに読み出される単一レコード。
//!
//! ## 宛先の既定値
//!
//! 宛先リストが空の場合、サイト管理者のメールアドレスと、
//! 管理者ロールを持つユーザーのメールアドレスを宛先とする。
//! 管理者メールと同じアドレスのユーザーは重複させない。

use serde::{Deserialize, Serialize};

use crate::{recipient::RecipientSet, user::User};

/// 通知設定
///
/// 未保存の場合は [`Default`]（宛先なし・投稿者通知なし）として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    /// 宛先メールアドレス（入力順）
    pub recipient_emails:   Vec<String>,
    /// 投稿者にも通知するか
    pub notify_post_author: bool,
}

impl NotificationSettings {
    /// 設定画面のフォーム値から設定を作成する
    ///
    /// メールアドレスの形式は検証しない。不正なアドレスはそのまま送信に回り、
    /// 送信失敗として扱われる。
    pub fn from_form(recipient_emails_text: &str, notify_post_author: bool) -> Self {
        Self {
            recipient_emails: parse_recipient_emails(recipient_emails_text),
            notify_post_author,
        }
    }

    /// テキストエリアに表示するカンマ区切りの宛先
    pub fn recipient_emails_text(&self) -> String {
        self.recipient_emails.join(",")
    }
}

/// カンマ区切り（または改行区切り）の宛先テキストを分割する
///
/// 前後の空白を除去し、空の要素は捨てる。
pub fn parse_recipient_emails(text: &str) -> Vec<String> {
    text.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 宛先の既定値を求める
///
/// `[サイト管理者メール] ++ [管理者ロールのユーザーのメール]`。
/// ユーザーの並びはアカウント一覧の順序を保持する。
pub fn default_recipient_emails(admin_email: &str, administrators: &[User]) -> Vec<String> {
    let mut emails = RecipientSet::new();
    emails.insert(admin_email);
    emails.extend(administrators.iter().filter_map(User::notification_email));
    emails.into_vec()
}

/// 実際に使う宛先リストを求める
///
/// 設定された宛先が空でなければそれを、空なら [`default_recipient_emails`] を返す。
/// キャッシュせず、呼び出しのたびに計算する。
pub fn effective_recipient_emails(
    settings: &NotificationSettings,
    admin_email: &str,
    administrators: &[User],
) -> Vec<String> {
    if settings.recipient_emails.is_empty() {
        default_recipient_emails(admin_email, administrators)
    } else {
        settings.recipient_emails.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::user::{ADMINISTRATOR_ROLE, UserId};

    fn make_admin(id: i64, email: &str) -> User {
        User {
            id:    UserId::new(id),
            login: format!("admin{id}"),
            email: email.to_string(),
            roles: vec![ADMINISTRATOR_ROLE.to_string()],
        }
    }

    #[rstest]
    #[case("a@x.com,b@x.com", vec!["a@x.com", "b@x.com"])]
    #[case(" a@x.com , b@x.com ", vec!["a@x.com", "b@x.com"])]
    #[case("a@x.com,,b@x.com,", vec!["a@x.com", "b@x.com"])]
    #[case("a@x.com\r\nb@x.com", vec!["a@x.com", "b@x.com"])]
    #[case("not-an-email", vec!["not-an-email"])]
    #[case("", vec![])]
    fn test_宛先テキストを分割する(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse_recipient_emails(input), expected);
    }

    #[test]
    fn test_未保存の設定は宛先なしで投稿者通知なし() {
        let settings = NotificationSettings::default();

        assert!(settings.recipient_emails.is_empty());
        assert!(!settings.notify_post_author);
    }

    #[test]
    fn test_欠けたフィールドは既定値でデシリアライズされる() {
        let settings: NotificationSettings =
            serde_json::from_value(serde_json::json!({ "notify_post_author": true })).unwrap();

        assert!(settings.recipient_emails.is_empty());
        assert!(settings.notify_post_author);
    }

    #[test]
    fn test_フォーム値から設定を作成する() {
        let settings = NotificationSettings::from_form("a@x.com, b@x.com", true);

        assert_eq!(settings.recipient_emails, vec!["a@x.com", "b@x.com"]);
        assert!(settings.notify_post_author);
        assert_eq!(settings.recipient_emails_text(), "a@x.com,b@x.com");
    }

    #[test]
    fn test_管理者メールと同じアドレスの管理者は重複しない() {
        let admins = vec![make_admin(1, "admin@x.com")];

        let emails = default_recipient_emails("admin@x.com", &admins);

        assert_eq!(emails, vec!["admin@x.com"]);
    }

    #[test]
    fn test_管理者メールとの比較は大文字小文字を区別しない() {
        let admins = vec![make_admin(1, "ADMIN@x.com"), make_admin(2, "ops@x.com")];

        let emails = default_recipient_emails("admin@x.com", &admins);

        assert_eq!(emails, vec!["admin@x.com", "ops@x.com"]);
    }

    #[test]
    fn test_既定値は管理者メールの後にアカウント一覧順で並ぶ() {
        let admins = vec![
            make_admin(1, "zed@x.com"),
            make_admin(2, "amy@x.com"),
            make_admin(3, "zed@x.com"),
        ];

        let emails = default_recipient_emails("admin@x.com", &admins);

        assert_eq!(emails, vec!["admin@x.com", "zed@x.com", "amy@x.com"]);
    }

    #[test]
    fn test_宛先が設定されていればそれを使う() {
        let settings = NotificationSettings::from_form("a@x.com,b@x.com", false);
        let admins = vec![make_admin(1, "ops@x.com")];

        let emails = effective_recipient_emails(&settings, "admin@x.com", &admins);

        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_宛先が空なら既定値を使う() {
        let settings = NotificationSettings::default();
        let admins = vec![make_admin(1, "ops@x.com")];

        let emails = effective_recipient_emails(&settings, "admin@x.com", &admins);

        assert_eq!(emails, vec!["admin@x.com", "ops@x.com"]);
    }
}
