//! # リポジトリ実装
//!
//! 通知に必要なホストプラットフォームのデータと、通知設定の永続化を担当する。
//!
//! ## 設計方針
//!
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計
//! - **書き込みは設定のみ**: コメント・投稿・ユーザー・サイト設定は読み取り専用

pub mod comment_repository;
pub mod post_repository;
pub mod settings_repository;
pub mod site_option_repository;
pub mod user_repository;

pub use comment_repository::{CommentRepository, PostgresCommentRepository};
pub use post_repository::{PostRepository, PostgresPostRepository};
pub use settings_repository::{PostgresSettingsRepository, SettingsRepository};
pub use site_option_repository::{PostgresSiteOptionRepository, SiteOptionRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
