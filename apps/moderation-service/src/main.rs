//! # モデレーション通知サービス サーバー
//!
//! 承認待ちコメントのモデレーション通知メールを送る内部サービス。
//!
//! ## 役割
//!
//! - **コメント投稿フック**: ホストプラットフォームからコメント投稿を受け取り、通知を送信
//! - **標準通知の抑止**: ホストプラットフォーム標準のモデレーター通知を常に無効化
//! - **設定画面**: 宛先と投稿者通知フラグを編集する管理画面
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SERVICE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SERVICE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP サーバー（デフォルト: `localhost:1025`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元メールアドレス |
//! | `LOCALE_CATALOG_PATH` | No | 翻訳カタログ（JSON）のパス |
//! | `RUN_MIGRATIONS` | No | 起動時にマイグレーションを適用する（デフォルト: `false`） |
//! | `RUST_LOG` / `LOG_FORMAT` | No | ログレベル / `json` または `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! SERVICE_PORT=3100 DATABASE_URL=postgres://... cargo run -p modnotify-service
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use config::{MailBackend, ServiceConfig};
use modnotify_domain::{filter::ModerationFilters, i18n::Localizer};
use modnotify_infra::{
    CatalogLocalizer,
    DnsHostnameResolver,
    MailSender,
    db,
    notification::{NoopMailSender, SesMailSender, SmtpMailSender, create_ses_client},
    repository::{
        PostgresCommentRepository,
        PostgresPostRepository,
        PostgresSettingsRepository,
        PostgresSiteOptionRepository,
        PostgresUserRepository,
        SiteOptionRepository,
        UserRepository,
    },
};
use modnotify_service::{
    app_builder::build_router,
    handler::{CommentHookState, ReadinessState, SettingsPage, SettingsState, readiness_check},
    usecase::{ModerationNotifier, NotifierDeps, SettingsUseCase},
};
use modnotify_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("moderation-service");
    modnotify_shared::observability::init_tracing(tracing_config);

    // 設定読み込み
    let config = ServiceConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "モデレーション通知サービスを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .expect("マイグレーションの実行に失敗しました");
        tracing::info!("マイグレーションを適用しました");
    }

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

    // リポジトリ
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let site_repo: Arc<dyn SiteOptionRepository> =
        Arc::new(PostgresSiteOptionRepository::new(pool.clone()));
    let settings_usecase = Arc::new(SettingsUseCase::new(
        Arc::new(PostgresSettingsRepository::new(pool.clone())),
        user_repo.clone(),
        site_repo.clone(),
    ));

    // メール送信バックエンド
    let sender: Arc<dyn MailSender> = match config.notification.backend {
        MailBackend::Smtp => Arc::new(SmtpMailSender::new(
            &config.notification.smtp_host,
            config.notification.smtp_port,
            config.notification.from_address.clone(),
        )),
        MailBackend::Ses => Arc::new(SesMailSender::new(
            create_ses_client().await,
            config.notification.from_address.clone(),
        )),
        MailBackend::Noop => Arc::new(NoopMailSender),
    };
    tracing::info!(backend = %config.notification.backend, "メール送信バックエンドを選択しました");

    // 翻訳カタログ（ロケールは通知ごとにサイト設定から決まる）
    let catalog = match &config.locale_catalog_path {
        Some(path) => CatalogLocalizer::from_file(path)
            .await
            .expect("翻訳カタログの読み込みに失敗しました"),
        None => CatalogLocalizer::new(),
    };
    tracing::info!(locales = catalog.locale_count(), "翻訳カタログを読み込みました");
    let localizer: Arc<dyn Localizer> = Arc::new(catalog);

    let notifier = Arc::new(ModerationNotifier::new(NotifierDeps {
        settings: settings_usecase.clone(),
        comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
        posts: Arc::new(PostgresPostRepository::new(pool)),
        users: user_repo,
        site: site_repo,
        resolver: Arc::new(DnsHostnameResolver),
        sender,
        localizer,
        filters: Arc::new(ModerationFilters::new()),
    }));

    let settings_state = Arc::new(SettingsState {
        usecase: settings_usecase,
        page:    SettingsPage::new().expect("設定画面テンプレートの読み込みに失敗しました"),
    });
    let hook_state = Arc::new(CommentHookState { notifier });

    // ルーター構築
    let app = build_router(settings_state, hook_state).merge(
        Router::new()
            .route("/health/ready", get(readiness_check))
            .with_state(readiness_state),
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("モデレーション通知サービスが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
