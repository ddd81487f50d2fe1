//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! modnotify-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 各モックは `fail_with` で次回以降の呼び出しを失敗させられる。

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use modnotify_domain::{
    comment::{Comment, CommentId},
    notification::{EmailMessage, NotificationError},
    post::{Post, PostId},
    settings::NotificationSettings,
    site::SiteContext,
    user::{User, UserId},
};

use crate::{
    dns::HostnameResolver,
    error::InfraError,
    notification::MailSender,
    repository::{
        CommentRepository,
        PostRepository,
        SettingsRepository,
        SiteOptionRepository,
        UserRepository,
    },
};

/// 失敗を注入するためのスイッチ
#[derive(Clone, Default)]
struct FailureSwitch(Arc<Mutex<Option<String>>>);

impl FailureSwitch {
    fn set(&self, message: impl Into<String>) {
        *self.0.lock().unwrap() = Some(message.into());
    }

    fn check(&self) -> Result<(), InfraError> {
        match self.0.lock().unwrap().as_ref() {
            Some(message) => Err(InfraError::unexpected(message.clone())),
            None => Ok(()),
        }
    }
}

// ===== MockSettingsRepository =====

#[derive(Clone, Default)]
pub struct MockSettingsRepository {
    settings: Arc<Mutex<Option<NotificationSettings>>>,
    saves:    Arc<Mutex<usize>>,
    failure:  FailureSwitch,
}

impl MockSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: NotificationSettings) -> Self {
        let repo = Self::new();
        *repo.settings.lock().unwrap() = Some(settings);
        repo
    }

    pub fn stored(&self) -> Option<NotificationSettings> {
        self.settings.lock().unwrap().clone()
    }

    /// `save` が呼ばれた回数
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

#[async_trait]
impl SettingsRepository for MockSettingsRepository {
    async fn find(&self) -> Result<Option<NotificationSettings>, InfraError> {
        self.failure.check()?;
        Ok(self.stored())
    }

    async fn save(&self, settings: &NotificationSettings) -> Result<(), InfraError> {
        self.failure.check()?;
        *self.settings.lock().unwrap() = Some(settings.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

// ===== MockCommentRepository =====

#[derive(Clone, Default)]
pub struct MockCommentRepository {
    comments: Arc<Mutex<Vec<Comment>>>,
    failure:  FailureSwitch,
}

impl MockCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_comment(&self, comment: Comment) {
        self.comments.lock().unwrap().push(comment);
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

#[async_trait]
impl CommentRepository for MockCommentRepository {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, InfraError> {
        self.failure.check()?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn count_pending(&self) -> Result<u64, InfraError> {
        self.failure.check()?;
        let count = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.approval.is_pending())
            .count();
        Ok(count as u64)
    }
}

// ===== MockPostRepository =====

#[derive(Clone, Default)]
pub struct MockPostRepository {
    posts:   Arc<Mutex<Vec<Post>>>,
    failure: FailureSwitch,
}

impl MockPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_post(&self, post: Post) {
        self.posts.lock().unwrap().push(post);
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

#[async_trait]
impl PostRepository for MockPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, InfraError> {
        self.failure.check()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:   Arc<Mutex<Vec<User>>>,
    failure: FailureSwitch,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        self.failure.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, InfraError> {
        self.failure.check()?;
        let mut users: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.has_role(role))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(users)
    }
}

// ===== MockSiteOptionRepository =====

#[derive(Clone)]
pub struct MockSiteOptionRepository {
    site:    Arc<Mutex<SiteContext>>,
    failure: FailureSwitch,
}

impl MockSiteOptionRepository {
    pub fn new(site: SiteContext) -> Self {
        Self {
            site:    Arc::new(Mutex::new(site)),
            failure: FailureSwitch::default(),
        }
    }

    pub fn fail_with(&self, message: &str) {
        self.failure.set(message);
    }
}

#[async_trait]
impl SiteOptionRepository for MockSiteOptionRepository {
    async fn load_site_context(&self) -> Result<SiteContext, InfraError> {
        self.failure.check()?;
        Ok(self.site.lock().unwrap().clone())
    }
}

// ===== MockMailSender =====

/// 送信したメールを記録するモック
///
/// `fail_for` で指定した宛先への送信は失敗する。
#[derive(Clone, Default)]
pub struct MockMailSender {
    sent:        Arc<Mutex<Vec<EmailMessage>>>,
    attempts:    Arc<Mutex<Vec<String>>>,
    failing_for: Arc<Mutex<HashSet<String>>>,
}

impl MockMailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_for(&self, to: &str) {
        self.failing_for.lock().unwrap().insert(to.to_string());
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// 送信を試みた宛先（失敗を含む、呼び出し順）
    pub fn attempted_recipients(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.attempts.lock().unwrap().push(email.to.clone());
        if self.failing_for.lock().unwrap().contains(&email.to) {
            return Err(NotificationError::SendFailed(format!(
                "モック送信失敗: {}",
                email.to
            )));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ===== MockHostnameResolver =====

/// 登録済みの IP のみ解決するモック
#[derive(Clone, Default)]
pub struct MockHostnameResolver {
    hosts: Arc<Mutex<HashMap<String, String>>>,
}

impl MockHostnameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_host(&self, ip: &str, hostname: &str) {
        self.hosts
            .lock()
            .unwrap()
            .insert(ip.to_string(), hostname.to_string());
    }
}

#[async_trait]
impl HostnameResolver for MockHostnameResolver {
    async fn resolve(&self, ip: &str) -> Result<String, InfraError> {
        self.hosts
            .lock()
            .unwrap()
            .get(ip)
            .cloned()
            .ok_or_else(|| InfraError::dns(format!("未登録の IP: {ip}")))
    }
}
