//! # メール送信
//!
//! モデレーション通知メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MailSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit 開発用）、SES（本番用）、Noop（テスト用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **プレーンテキストのみ**: 本文は `text/plain`。追加ヘッダーは `Name: value` 行から組み立てる

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
use modnotify_domain::notification::{EmailMessage, NotificationError};
pub use noop::NoopMailSender;
pub use ses::{SesMailSender, create_ses_client};
pub use smtp::SmtpMailSender;

/// メール送信トレイト
///
/// 宛先 1 件分のメールを送信する。SMTP / SES / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait MailSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
