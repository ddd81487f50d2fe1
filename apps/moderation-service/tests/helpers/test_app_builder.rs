//! テスト用アプリケーションビルダー
//!
//! インメモリモックでルーター全体を組み立てる。
//! 標準的なサイト設定・投稿・コメントを用意し、テストごとに差分だけを設定する。

use std::sync::Arc;

use axum::Router;
use modnotify_domain::{
    comment::{ApprovalState, Comment, CommentId, CommentType},
    filter::ModerationFilters,
    post::{Post, PostId},
    site::SiteContext,
    user::{User, UserId},
};
use modnotify_infra::{
    CatalogLocalizer,
    mock::{
        MockCommentRepository,
        MockHostnameResolver,
        MockMailSender,
        MockPostRepository,
        MockSettingsRepository,
        MockSiteOptionRepository,
        MockUserRepository,
    },
    repository::{SiteOptionRepository, UserRepository},
};
use modnotify_service::{
    app_builder::build_router,
    handler::{CommentHookState, SettingsPage, SettingsState},
    usecase::{ModerationNotifier, NotifierDeps, SettingsUseCase},
};

pub const POST_ID: i64 = 3;
pub const AUTHOR_ID: i64 = 42;
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// テスト用アプリケーションビルダー
///
/// モックはクローンしても状態を共有するため、ルーター構築後も
/// `sender` や `settings_repo` から送信結果・保存内容を検証できる。
pub struct TestAppBuilder {
    pub settings_repo: MockSettingsRepository,
    pub comments:      MockCommentRepository,
    pub posts:         MockPostRepository,
    pub users:         MockUserRepository,
    pub resolver:      MockHostnameResolver,
    pub sender:        MockMailSender,
    site:              SiteContext,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        let builder = Self {
            settings_repo: MockSettingsRepository::new(),
            comments:      MockCommentRepository::new(),
            posts:         MockPostRepository::new(),
            users:         MockUserRepository::new(),
            resolver:      MockHostnameResolver::new(),
            sender:        MockMailSender::new(),
            site:          SiteContext {
                site_name:            "Example Blog".to_string(),
                admin_email:          ADMIN_EMAIL.to_string(),
                home_url:             "https://example.com".to_string(),
                admin_url:            "https://example.com/wp-admin".to_string(),
                locale:               "en_US".to_string(),
                trash_retention_days: 30,
            },
        };
        builder.posts.add_post(Post {
            id:        PostId::new(POST_ID),
            title:     "Hello".to_string(),
            author_id: Some(UserId::new(AUTHOR_ID)),
        });
        builder.users.add_user(User {
            id:    UserId::new(AUTHOR_ID),
            login: "author".to_string(),
            email: "author@example.com".to_string(),
            roles: vec!["author".to_string()],
        });
        builder.resolver.add_host("192.0.2.1", "host.example.net");
        builder
    }

    /// 指定した承認状態のコメントを登録する
    pub fn with_comment(self, id: i64, approval: ApprovalState) -> Self {
        self.comments.add_comment(Comment {
            id: CommentId::new(id),
            post_id: PostId::new(POST_ID),
            comment_type: CommentType::Comment,
            author_name: "Taro".to_string(),
            author_email: "taro@example.com".to_string(),
            author_ip: "192.0.2.1".to_string(),
            author_url: String::new(),
            content: "Nice post".to_string(),
            approval,
        });
        self
    }

    /// ルーターを構築する
    pub fn build(&self) -> Router {
        let users: Arc<dyn UserRepository> = Arc::new(self.users.clone());
        let site: Arc<dyn SiteOptionRepository> =
            Arc::new(MockSiteOptionRepository::new(self.site.clone()));
        let settings = Arc::new(SettingsUseCase::new(
            Arc::new(self.settings_repo.clone()),
            users.clone(),
            site.clone(),
        ));

        let notifier = Arc::new(ModerationNotifier::new(NotifierDeps {
            settings: settings.clone(),
            comments: Arc::new(self.comments.clone()),
            posts: Arc::new(self.posts.clone()),
            users,
            site,
            resolver: Arc::new(self.resolver.clone()),
            sender: Arc::new(self.sender.clone()),
            localizer: Arc::new(CatalogLocalizer::new()),
            filters: Arc::new(ModerationFilters::new()),
        }));

        build_router(
            Arc::new(SettingsState {
                usecase: settings,
                page:    SettingsPage::new().unwrap(),
            }),
            Arc::new(CommentHookState { notifier }),
        )
    }
}
