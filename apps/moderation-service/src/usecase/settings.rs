//! # 通知設定ユースケース
//!
//! 通知設定の読み出し・保存と、実際に使う宛先リストの算出を担当する。
//!
//! ## 設計方針
//!
//! - **読み出しは副作用なし**: 未保存なら既定値を返すだけで、レコードを作らない
//! - **既定の宛先は都度計算**: サイト管理者メールと管理者ロールのユーザーから毎回求める
//! - **保存は 1 レコードの上書き**: 宛先と投稿者通知フラグを同時に保存する

use std::sync::Arc;

use modnotify_domain::{
    settings::{self, NotificationSettings},
    user::{ADMINISTRATOR_ROLE, User},
};
use modnotify_infra::repository::{SettingsRepository, SiteOptionRepository, UserRepository};
use modnotify_shared::{event_log::event, log_business_event};
use serde::Serialize;

use crate::error::ServiceError;

/// 設定項目の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Textarea,
    Checkbox,
}

/// 設定項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsField {
    /// フォームのフィールド名
    pub name:  &'static str,
    pub label: &'static str,
    /// 入力欄の補足説明
    pub hint:  Option<&'static str>,
    pub kind:  FieldKind,
}

/// 設定画面の構成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsSchema {
    pub page_title:    &'static str,
    pub menu_title:    &'static str,
    pub section_title: &'static str,
    pub fields:        [SettingsField; 2],
}

/// 宛先テキストエリアのフィールド名
pub const FIELD_RECIPIENT_EMAILS: &str = "recipient_emails";
/// 投稿者通知チェックボックスのフィールド名
pub const FIELD_NOTIFY_POST_AUTHOR: &str = "notify_post_author";

/// モデレーション通知の設定画面
pub const SETTINGS_SCHEMA: SettingsSchema = SettingsSchema {
    page_title:    "WP Comment Notification",
    menu_title:    "Comment Notifs",
    section_title: "Comment Notification Setting",
    fields:        [
        SettingsField {
            name:  FIELD_RECIPIENT_EMAILS,
            label: "Notification email id(s)",
            hint:  Some("Comma-separated emails"),
            kind:  FieldKind::Textarea,
        },
        SettingsField {
            name:  FIELD_NOTIFY_POST_AUTHOR,
            label: "Notify post author",
            hint:  None,
            kind:  FieldKind::Checkbox,
        },
    ],
};

/// 設定画面に表示する値
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsFormValues {
    pub recipient_emails:   String,
    pub notify_post_author: bool,
}

/// 通知設定ユースケース
pub struct SettingsUseCase {
    settings_repo: Arc<dyn SettingsRepository>,
    user_repo:     Arc<dyn UserRepository>,
    site_repo:     Arc<dyn SiteOptionRepository>,
}

impl SettingsUseCase {
    pub fn new(
        settings_repo: Arc<dyn SettingsRepository>,
        user_repo: Arc<dyn UserRepository>,
        site_repo: Arc<dyn SiteOptionRepository>,
    ) -> Self {
        Self {
            settings_repo,
            user_repo,
            site_repo,
        }
    }

    /// 保存済みの設定を取得する。未保存なら既定値
    pub async fn get_settings(&self) -> Result<NotificationSettings, ServiceError> {
        Ok(self.settings_repo.find().await?.unwrap_or_default())
    }

    /// 実際に通知する宛先リストを求める
    ///
    /// 設定された宛先が空なら、サイト管理者メールと管理者ロールのユーザーのメールを使う。
    pub async fn effective_recipient_emails(&self) -> Result<Vec<String>, ServiceError> {
        let settings = self.get_settings().await?;
        if !settings.recipient_emails.is_empty() {
            return Ok(settings.recipient_emails);
        }
        self.default_recipient_emails().await
    }

    /// 読み出し済みの設定とサイト管理者メールから宛先リストを求める
    ///
    /// 通知パイプライン用。設定とサイト設定を呼び出し側で 1 回だけ読み出す。
    pub async fn recipient_emails_for(
        &self,
        settings: &NotificationSettings,
        admin_email: &str,
    ) -> Result<Vec<String>, ServiceError> {
        if !settings.recipient_emails.is_empty() {
            return Ok(settings.recipient_emails.clone());
        }
        let administrators = self.administrators().await?;
        Ok(settings::effective_recipient_emails(
            settings,
            admin_email,
            &administrators,
        ))
    }

    /// 既定の宛先リスト
    pub async fn default_recipient_emails(&self) -> Result<Vec<String>, ServiceError> {
        let site = self.site_repo.load_site_context().await?;
        let administrators = self.administrators().await?;
        Ok(settings::default_recipient_emails(
            &site.admin_email,
            &administrators,
        ))
    }

    /// 設定画面のフォーム値
    ///
    /// 未保存の場合、テキストエリアには既定の宛先をカンマ区切りで表示する。
    pub async fn form_values(&self) -> Result<SettingsFormValues, ServiceError> {
        match self.settings_repo.find().await? {
            Some(stored) => Ok(SettingsFormValues {
                recipient_emails:   stored.recipient_emails_text(),
                notify_post_author: stored.notify_post_author,
            }),
            None => Ok(SettingsFormValues {
                recipient_emails:   self.default_recipient_emails().await?.join(","),
                notify_post_author: false,
            }),
        }
    }

    /// 設定を保存する
    ///
    /// メールアドレスの形式は検証しない。
    pub async fn save_settings(
        &self,
        recipient_emails_text: &str,
        notify_post_author: bool,
    ) -> Result<NotificationSettings, ServiceError> {
        let settings = NotificationSettings::from_form(recipient_emails_text, notify_post_author);
        self.settings_repo.save(&settings).await?;

        log_business_event!(
            event.category = event::category::SETTINGS,
            event.action = event::action::SETTINGS_UPDATED,
            event.entity_type = event::entity_type::NOTIFICATION_SETTINGS,
            event.result = event::result::SUCCESS,
            settings.recipient_count = settings.recipient_emails.len(),
            settings.notify_post_author = settings.notify_post_author,
            "通知設定を保存"
        );

        Ok(settings)
    }

    async fn administrators(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.user_repo.find_by_role(ADMINISTRATOR_ROLE).await?)
    }
}

#[cfg(test)]
mod tests {
    use modnotify_domain::{site::SiteContext, user::UserId};
    use modnotify_infra::mock::{
        MockSettingsRepository,
        MockSiteOptionRepository,
        MockUserRepository,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_site(admin_email: &str) -> SiteContext {
        SiteContext {
            site_name:            "Example".to_string(),
            admin_email:          admin_email.to_string(),
            home_url:             "https://example.com".to_string(),
            admin_url:            "https://example.com/wp-admin".to_string(),
            locale:               "en_US".to_string(),
            trash_retention_days: 30,
        }
    }

    fn make_admin(id: i64, login: &str, email: &str) -> User {
        User {
            id:    UserId::new(id),
            login: login.to_string(),
            email: email.to_string(),
            roles: vec![ADMINISTRATOR_ROLE.to_string()],
        }
    }

    struct Fixture {
        settings_repo: MockSettingsRepository,
        user_repo:     MockUserRepository,
        usecase:       SettingsUseCase,
    }

    fn fixture(admin_email: &str) -> Fixture {
        let settings_repo = MockSettingsRepository::new();
        let user_repo = MockUserRepository::new();
        let usecase = SettingsUseCase::new(
            Arc::new(settings_repo.clone()),
            Arc::new(user_repo.clone()),
            Arc::new(MockSiteOptionRepository::new(make_site(admin_email))),
        );
        Fixture {
            settings_repo,
            user_repo,
            usecase,
        }
    }

    #[tokio::test]
    async fn test_未保存なら既定値を返し書き込まない() {
        let f = fixture("admin@x.com");

        let settings = f.usecase.get_settings().await.unwrap();

        assert_eq!(settings, NotificationSettings::default());
        assert_eq!(f.settings_repo.save_count(), 0);
        assert_eq!(f.settings_repo.stored(), None);
    }

    #[tokio::test]
    async fn test_管理者メールと同じアドレスの管理者は重複しない() {
        let f = fixture("admin@x.com");
        f.user_repo.add_user(make_admin(1, "admin", "admin@x.com"));

        let emails = f.usecase.effective_recipient_emails().await.unwrap();

        assert_eq!(emails, vec!["admin@x.com".to_string()]);
    }

    #[tokio::test]
    async fn test_既定の宛先は管理者メールの後にログイン名順の管理者が続く() {
        let f = fixture("owner@x.com");
        f.user_repo.add_user(make_admin(2, "zeta", "zeta@x.com"));
        f.user_repo.add_user(make_admin(3, "alpha", "ALPHA@x.com"));
        f.user_repo.add_user(make_admin(4, "owner", "Owner@X.com"));

        let emails = f.usecase.effective_recipient_emails().await.unwrap();

        assert_eq!(
            emails,
            vec![
                "owner@x.com".to_string(),
                "ALPHA@x.com".to_string(),
                "zeta@x.com".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_設定された宛先があればそれを使う() {
        let f = fixture("admin@x.com");
        f.user_repo.add_user(make_admin(1, "admin", "other@x.com"));
        f.settings_repo
            .save(&NotificationSettings::from_form("a@x.com, b@x.com", false))
            .await
            .unwrap();

        let emails = f.usecase.effective_recipient_emails().await.unwrap();

        assert_eq!(emails, vec!["a@x.com".to_string(), "b@x.com".to_string()]);
    }

    #[tokio::test]
    async fn test_未保存のフォームには既定の宛先を表示する() {
        let f = fixture("admin@x.com");
        f.user_repo.add_user(make_admin(1, "editor-in-chief", "chief@x.com"));

        let values = f.usecase.form_values().await.unwrap();

        assert_eq!(
            values,
            SettingsFormValues {
                recipient_emails:   "admin@x.com,chief@x.com".to_string(),
                notify_post_author: false,
            }
        );
    }

    #[tokio::test]
    async fn test_保存済みのフォームは保存値を表示する() {
        let f = fixture("admin@x.com");
        f.usecase.save_settings("", true).await.unwrap();

        let values = f.usecase.form_values().await.unwrap();

        assert_eq!(values.recipient_emails, "");
        assert!(values.notify_post_author);
    }

    #[tokio::test]
    async fn test_保存は両方の項目を1回で書き込む() {
        let f = fixture("admin@x.com");

        let saved = f
            .usecase
            .save_settings(" a@x.com ,\n b@x.com,, ", true)
            .await
            .unwrap();

        assert_eq!(f.settings_repo.save_count(), 1);
        assert_eq!(f.settings_repo.stored(), Some(saved.clone()));
        assert_eq!(saved.recipient_emails, vec!["a@x.com", "b@x.com"]);
        assert!(saved.notify_post_author);
    }

    #[tokio::test]
    async fn test_リポジトリの失敗はエラーとして返す() {
        let f = fixture("admin@x.com");
        f.settings_repo.fail_with("接続断");

        let result = f.usecase.get_settings().await;

        assert!(matches!(result, Err(ServiceError::Database(_))));
    }
}
