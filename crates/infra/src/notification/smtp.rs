//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{
        Message,
        header::{ContentType, HeaderName, HeaderValue},
    },
};
use modnotify_domain::notification::{EmailMessage, NotificationError};

use super::MailSender;

/// SMTP メール送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// Mailpit（開発）や SMTP リレー（テスト環境）で使用する。
pub struct SmtpMailSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    /// - `from_address`: 送信元メールアドレス
    pub fn new(host: &str, port: u16, from_address: String) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self {
            transport,
            from_address,
        }
    }

    /// lettre のメッセージを組み立てる
    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        let mut builder = Message::builder()
            .from(self.from_address.parse().map_err(|e| {
                NotificationError::SendFailed(format!("送信元アドレス不正: {e}"))
            })?)
            .to(email
                .to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN);

        for (name, value) in email.extra_headers()? {
            let header_name = HeaderName::new_from_ascii(name.clone())
                .map_err(|e| NotificationError::InvalidHeader(format!("{name}: {e}")))?;
            builder = builder.raw_header(HeaderValue::new(header_name, value));
        }

        builder
            .body(email.text_body.clone())
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(())
    }
}
