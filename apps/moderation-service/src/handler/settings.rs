//! # 設定画面ハンドラ
//!
//! モデレーション通知の設定画面（HTML フォーム）を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /admin/options/comment-notifs` - 設定画面
//! - `POST /admin/options/comment-notifs` - 設定の保存（`application/x-www-form-urlencoded`）
//!
//! 保存後は `?settings-updated=true` 付きの設定画面へ 303 でリダイレクトする。

use std::sync::Arc;

use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tera::{Context, Tera};

use crate::{
    error::ServiceError,
    usecase::{SETTINGS_SCHEMA, SettingsUseCase, settings::SettingsFormValues},
};

/// 設定画面のパス
pub const SETTINGS_PAGE_PATH: &str = "/admin/options/comment-notifs";

const TEMPLATE_NAME: &str = "settings_page.html";

/// 設定画面のレンダラー
///
/// `include_str!` で埋め込んだテンプレートを使う。`.html` のため自動エスケープが有効。
pub struct SettingsPage {
    engine: Tera,
}

impl SettingsPage {
    pub fn new() -> Result<Self, tera::Error> {
        let mut engine = Tera::default();
        engine.add_raw_template(
            TEMPLATE_NAME,
            include_str!("../../templates/admin/settings_page.html"),
        )?;
        Ok(Self { engine })
    }

    pub fn render(&self, values: &SettingsFormValues, saved: bool) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("schema", &SETTINGS_SCHEMA);
        context.insert("values", values);
        context.insert("saved", &saved);
        context.insert("action", SETTINGS_PAGE_PATH);
        self.engine.render(TEMPLATE_NAME, &context)
    }
}

/// 設定画面の共有状態
pub struct SettingsState {
    pub usecase: Arc<SettingsUseCase>,
    pub page:    SettingsPage,
}

/// 設定画面のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct SettingsPageQuery {
    #[serde(rename = "settings-updated")]
    pub settings_updated: Option<String>,
}

/// 設定フォームの送信値
///
/// チェックボックスは値に関わらず、フィールドが存在すれば ON。
#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub recipient_emails:   String,
    pub notify_post_author: Option<String>,
}

/// GET /admin/options/comment-notifs
#[tracing::instrument(skip_all)]
pub async fn show_settings_page(
    State(state): State<Arc<SettingsState>>,
    Query(query): Query<SettingsPageQuery>,
) -> Result<Html<String>, ServiceError> {
    let values = state.usecase.form_values().await?;
    let saved = query.settings_updated.as_deref() == Some("true");
    Ok(Html(state.page.render(&values, saved)?))
}

/// POST /admin/options/comment-notifs
#[tracing::instrument(skip_all)]
pub async fn save_settings(
    State(state): State<Arc<SettingsState>>,
    Form(form): Form<SettingsForm>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .usecase
        .save_settings(&form.recipient_emails, form.notify_post_author.is_some())
        .await?;

    Ok(Redirect::to(&format!(
        "{SETTINGS_PAGE_PATH}?settings-updated=true"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(recipient_emails: &str, notify_post_author: bool) -> SettingsFormValues {
        SettingsFormValues {
            recipient_emails: recipient_emails.to_string(),
            notify_post_author,
        }
    }

    #[test]
    fn test_設定画面に項目名と現在値を表示する() {
        let page = SettingsPage::new().unwrap();

        let html = page.render(&values("a@x.com,b@x.com", true), false).unwrap();

        assert!(html.contains("WP Comment Notification"));
        assert!(html.contains("Comment Notification Setting"));
        assert!(html.contains("Notification email id(s)"));
        assert!(html.contains("Comma-separated emails"));
        assert!(html.contains("Notify post author"));
        assert!(html.contains(">a@x.com,b@x.com</textarea>"));
        assert!(html.contains("checked=\"checked\""));
        assert!(!html.contains("Settings saved."));
    }

    #[test]
    fn test_保存後は完了メッセージを表示する() {
        let page = SettingsPage::new().unwrap();

        let html = page.render(&values("", false), true).unwrap();

        assert!(html.contains("Settings saved."));
        assert!(!html.contains("checked=\"checked\""));
    }

    #[test]
    fn test_入力値はエスケープして表示する() {
        let page = SettingsPage::new().unwrap();

        let html = page
            .render(&values("<script>alert(1)</script>", false), false)
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
