//! # modnotify インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: コメント・投稿・ユーザー・サイト設定の読み取りと通知設定の保存
//! - **メール送信**: SMTP / SES / Noop
//! - **逆引き DNS**: 投稿者 IP のホスト名解決
//! - **翻訳カタログ**: JSON カタログによる [`Localizer`](modnotify_domain::i18n::Localizer) 実装
//!
//! ## 依存関係
//!
//! ```text
//! moderation-service → infra → domain
//!          ↘                    ↑
//!            ───────────────────
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`dns`] - 逆引き DNS
//! - [`error`] - インフラ層エラー定義
//! - [`i18n`] - 翻訳カタログ
//! - [`notification`] - メール送信
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use modnotify_infra::{db, repository::PostgresCommentRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/modnotify").await?;
//!     let comments = PostgresCommentRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod dns;
pub mod error;
pub mod i18n;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use dns::{DnsHostnameResolver, HostnameResolver};
pub use error::{InfraError, InfraErrorKind};
pub use i18n::CatalogLocalizer;
pub use notification::MailSender;
