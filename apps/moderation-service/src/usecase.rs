//! # ユースケース層
//!
//! モデレーション通知サービスのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・送信・逆引き・翻訳を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - [`settings`]: 通知設定の読み出し・保存と宛先の算出
//! - [`notification`]: コメント投稿時の通知パイプライン

pub mod notification;
pub mod settings;

pub use notification::{ModerationNotifier, NotifierDeps};
pub use settings::{SETTINGS_SCHEMA, SettingsSchema, SettingsUseCase};
