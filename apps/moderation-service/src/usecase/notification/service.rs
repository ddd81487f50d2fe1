//! # モデレーション通知サービス
//!
//! コメント投稿 1 件につき、パイプライン全体を独立に実行する。
//!
//! ```text
//! コメント取得 → 承認待ち判定 → 投稿取得 → 宛先決定
//!   → 逆引き DNS・承認待ち件数 → 本文・件名 → フィルタ → 宛先ごとに送信
//! ```
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 呼び出し元にエラーを返さない。結果は「送信を試みたか」の bool のみ
//! - **no-op 条件**: コメント・投稿が見つからない、承認待ちでない、宛先が空
//! - **ベストエフォート**: 逆引き DNS・承認待ち件数・設定の読み出しの失敗は
//!   [`BestEffort`] で明示し、既定値で続行する
//! - **宛先ごとに独立送信**: 1 件の送信失敗は残りの送信を妨げない

use std::sync::Arc;

use modnotify_domain::{
    DomainError,
    best_effort::BestEffort,
    comment::{Comment, CommentId},
    filter::ModerationFilters,
    i18n::{Localizer, Translator},
    notification::{ModerationEvent, ModerationMessage},
    post::Post,
    recipient::RecipientSet,
    settings,
    site::SiteContext,
    template::{self, MessageContext, ModerationTemplate},
};
use modnotify_infra::{
    HostnameResolver,
    MailSender,
    repository::{CommentRepository, PostRepository, SiteOptionRepository, UserRepository},
};
use modnotify_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};

use crate::usecase::settings::SettingsUseCase;

/// 通知サービスの依存コンポーネント
pub struct NotifierDeps {
    pub settings:  Arc<SettingsUseCase>,
    pub comments:  Arc<dyn CommentRepository>,
    pub posts:     Arc<dyn PostRepository>,
    pub users:     Arc<dyn UserRepository>,
    pub site:      Arc<dyn SiteOptionRepository>,
    pub resolver:  Arc<dyn HostnameResolver>,
    pub sender:    Arc<dyn MailSender>,
    pub localizer: Arc<dyn Localizer>,
    pub filters:   Arc<ModerationFilters>,
}

/// モデレーション通知サービス
///
/// 呼び出し間で可変状態を共有しない。
pub struct ModerationNotifier {
    deps: NotifierDeps,
}

impl ModerationNotifier {
    pub fn new(deps: NotifierDeps) -> Self {
        Self { deps }
    }

    /// ホストプラットフォーム標準のモデレーター通知を行うか
    ///
    /// このサービスが通知を引き受けるため、常に `false`。
    pub fn should_notify_moderator(&self, comment_id: CommentId) -> bool {
        tracing::debug!(%comment_id, "標準のモデレーター通知を抑止");
        false
    }

    /// コメント投稿時の通知パイプラインを実行する
    ///
    /// 送信を試みた場合は `true`、no-op 条件で打ち切った場合は `false`。
    /// 個々の送信の成否は戻り値に影響しない。
    #[tracing::instrument(skip_all, fields(%comment_id))]
    pub async fn on_comment_posted(&self, comment_id: CommentId) -> bool {
        let comment = match self.find_comment(comment_id).await {
            Ok(comment) => comment,
            Err(reason) => return skip(comment_id, &reason),
        };
        if !comment.approval.is_pending() {
            return skip(
                comment_id,
                &format!("承認待ちではない: {}", comment.approval.as_str()),
            );
        }

        let post = match self.find_post(&comment).await {
            Ok(post) => post,
            Err(reason) => return skip(comment_id, &reason),
        };

        let site = match self.deps.site.load_site_context().await {
            Ok(site) => site,
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::INFRASTRUCTURE,
                    error.kind = log_error::kind::DATABASE,
                    error = %e,
                    "サイト設定の読み出しに失敗"
                );
                return skip(comment_id, "サイト設定を読み出せない");
            }
        };

        let event = ModerationEvent::new(comment, &post);
        let recipients = self.assemble_recipients(&event, &site).await;
        if recipients.is_empty() {
            return skip(comment_id, "宛先が空");
        }

        let message = self.compose(&event, &site, recipients).await;
        self.dispatch(comment_id, &message).await;

        true
    }

    async fn find_comment(&self, comment_id: CommentId) -> Result<Comment, String> {
        match self.deps.comments.find_by_id(comment_id).await {
            Ok(Some(comment)) => Ok(comment),
            Ok(None) => Err(DomainError::NotFound {
                entity_type: "Comment",
                id:          comment_id.to_string(),
            }
            .to_string()),
            Err(e) => Err(format!("コメントの取得に失敗: {e}")),
        }
    }

    async fn find_post(&self, comment: &Comment) -> Result<Post, String> {
        match self.deps.posts.find_by_id(comment.post_id).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(DomainError::NotFound {
                entity_type: "Post",
                id:          comment.post_id.to_string(),
            }
            .to_string()),
            Err(e) => Err(format!("投稿の取得に失敗: {e}")),
        }
    }

    /// 宛先集合を組み立てる
    ///
    /// 設定の宛先（空なら既定の宛先）に、必要なら投稿者のメールを加える。
    async fn assemble_recipients(&self, event: &ModerationEvent, site: &SiteContext) -> RecipientSet {
        let stored = BestEffort::from_result(self.deps.settings.get_settings().await);
        warn_degraded(&stored, "通知設定を読み出せないため既定値を使用");
        let stored = stored.unwrap_or_default();

        let emails = BestEffort::from_result(
            self.deps
                .settings
                .recipient_emails_for(&stored, &site.admin_email)
                .await,
        );
        warn_degraded(&emails, "管理者一覧を取得できないためサイト管理者のみに通知");
        let mut recipients: RecipientSet = emails
            .unwrap_or_else(|| settings::default_recipient_emails(&site.admin_email, &[]))
            .into_iter()
            .collect();

        let author_email = if stored.notify_post_author {
            self.post_author_email(event).await
        } else {
            None
        };
        recipients.extend(author_email);

        recipients
    }

    async fn post_author_email(&self, event: &ModerationEvent) -> Option<String> {
        let author_id = event.post_author_id?;
        let author = BestEffort::from_result(self.deps.users.find_by_id(author_id).await);
        warn_degraded(&author, "投稿者を取得できないため投稿者には通知しない");
        author
            .unwrap_or_default()
            .and_then(|user| user.notification_email().map(str::to_string))
    }

    /// 本文・件名・ヘッダーを組み立て、フィルタを適用する
    async fn compose(
        &self,
        event: &ModerationEvent,
        site: &SiteContext,
        recipients: RecipientSet,
    ) -> ModerationMessage {
        let hostname = BestEffort::from_result(self.deps.resolver.resolve(&event.author_ip).await);
        if let Some(reason) = hostname.reason() {
            tracing::warn!(
                error.category = log_error::category::EXTERNAL_SERVICE,
                error.kind = log_error::kind::REVERSE_DNS,
                reason,
                "投稿者 IP の逆引きに失敗、ホスト名なしで続行"
            );
        }
        let hostname = hostname.unwrap_or_default();

        let pending_count = BestEffort::from_result(self.deps.comments.count_pending().await);
        warn_degraded(&pending_count, "承認待ち件数を取得できないため 0 件として続行");
        let pending_count = pending_count.unwrap_or_default();

        let ctx = MessageContext {
            event,
            site,
            author_hostname: &hostname,
            pending_count,
        };
        // ロケールはこの通知だけに束縛し、共有の Localizer は変更しない
        let translator = Translator::new(self.deps.localizer.as_ref(), &site.locale);
        let template = ModerationTemplate::for_comment_type(&event.comment_type);
        tracing::debug!(%template, pending_count, "通知本文を組み立て");

        let body = template::render_body(&ctx, &translator);
        let subject = template::render_subject(&ctx, &translator);

        let filters = &self.deps.filters;
        let comment_id = event.comment_id;
        let recipients = filters.recipients.apply(recipients.into_vec(), comment_id);
        let body = filters.message_text.apply(body, comment_id);
        let subject = filters.subject.apply(subject, comment_id);
        let headers = filters.headers.apply(String::new(), comment_id);

        ModerationMessage {
            subject: template::decode_special_chars(&subject),
            body,
            headers,
            recipients: recipients.into_iter().collect(),
        }
    }

    /// 宛先ごとに 1 通ずつ、宛先集合の順に送信する
    async fn dispatch(&self, comment_id: CommentId, message: &ModerationMessage) {
        for email in message.emails() {
            match self.deps.sender.send_email(&email).await {
                Ok(()) => {
                    log_business_event!(
                        event.category = event::category::NOTIFICATION,
                        event.action = event::action::NOTIFICATION_SENT,
                        event.entity_type = event::entity_type::COMMENT,
                        event.entity_id = %comment_id,
                        event.result = event::result::SUCCESS,
                        notification.recipient = %email.to,
                        "モデレーション通知メール送信成功"
                    );
                }
                Err(e) => {
                    log_business_event!(
                        event.category = event::category::NOTIFICATION,
                        event.action = event::action::NOTIFICATION_FAILED,
                        event.entity_type = event::entity_type::COMMENT,
                        event.entity_id = %comment_id,
                        event.result = event::result::FAILURE,
                        notification.recipient = %email.to,
                        error.category = log_error::category::EXTERNAL_SERVICE,
                        error.kind = log_error::kind::MAIL_TRANSPORT,
                        error = %e,
                        "モデレーション通知メール送信失敗"
                    );
                }
            }
        }
    }
}

fn skip(comment_id: CommentId, reason: &str) -> bool {
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_SKIPPED,
        event.entity_type = event::entity_type::COMMENT,
        event.entity_id = %comment_id,
        event.result = event::result::SKIPPED,
        reason,
        "モデレーション通知をスキップ"
    );
    false
}

fn warn_degraded<T>(result: &BestEffort<T>, message: &str) {
    if let Some(reason) = result.reason() {
        tracing::warn!(reason, "{}", message);
    }
}
