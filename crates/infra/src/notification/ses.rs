//! SES メール送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    types::{Body, Content, Destination, EmailContent, Message, MessageHeader},
};
use modnotify_domain::notification::{EmailMessage, NotificationError};

use super::MailSender;

/// SES クライアントを作成する
///
/// 認証情報・リージョンは SDK のデフォルトチェーンで解決する
/// （環境変数 `AWS_REGION` / `AWS_ACCESS_KEY_ID` や IAM ロール）。
pub async fn create_ses_client() -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    Client::new(&config)
}

/// SES メール送信
///
/// `aws_sdk_sesv2::Client` をラップする。
/// 本番環境で AWS SES を通じてメールを送信する。
pub struct SesMailSender {
    client:       Client,
    from_address: String,
}

impl SesMailSender {
    /// 新しい SES 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: AWS SES v2 クライアント
    /// - `from_address`: 送信元メールアドレス（SES で検証済みであること）
    pub fn new(client: Client, from_address: String) -> Self {
        Self {
            client,
            from_address,
        }
    }
}

fn content(data: &str, part: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .build()
        .map_err(|e| NotificationError::SendFailed(format!("{part}構築失敗: {e}")))
}

fn message_headers(email: &EmailMessage) -> Result<Vec<MessageHeader>, NotificationError> {
    email
        .extra_headers()?
        .into_iter()
        .map(|(name, value)| {
            MessageHeader::builder()
                .name(&name)
                .value(value)
                .build()
                .map_err(|e| NotificationError::InvalidHeader(format!("{name}: {e}")))
        })
        .collect()
}

#[async_trait]
impl MailSender for SesMailSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let destination = Destination::builder().to_addresses(&email.to).build();

        let message = Message::builder()
            .subject(content(&email.subject, "件名")?)
            .body(
                Body::builder()
                    .text(content(&email.text_body, "テキスト本文")?)
                    .build(),
            )
            .set_headers(Some(message_headers(email)?))
            .build();

        let content = EmailContent::builder().simple(message).build();

        self.client
            .send_email()
            .from_email_address(&self.from_address)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SES 送信失敗: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SesMailSender>();
    }

    #[test]
    fn test_追加ヘッダーをsesのヘッダーに変換する() {
        let email = EmailMessage {
            to:        "mod@example.com".to_string(),
            subject:   "件名".to_string(),
            text_body: "本文".to_string(),
            headers:   "Reply-To: author@example.com".to_string(),
        };

        let headers = message_headers(&email).unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].name(), "Reply-To");
        assert_eq!(headers[0].value(), "author@example.com");
    }
}
