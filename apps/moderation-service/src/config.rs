//! # サービス設定
//!
//! 環境変数からモデレーション通知サービスの設定を読み込む。

use std::env;

use strum::EnumString;

/// サービスの設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// バインドアドレス
    pub host:                String,
    /// ポート番号
    pub port:                u16,
    /// データベース接続 URL
    pub database_url:        String,
    /// 起動時にマイグレーションを適用するか
    pub run_migrations:      bool,
    /// 翻訳カタログ（JSON）のパス。未設定なら翻訳しない
    pub locale_catalog_path: Option<String>,
    /// 通知設定
    pub notification:        NotificationConfig,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MailBackend {
    /// Mailpit（開発）/ SMTP サーバー経由で送信
    Smtp,
    /// Amazon SES v2 経由で送信（本番）
    Ses,
    /// 送信しない（ログ出力のみ）
    Noop,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える。
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub backend:      MailBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host:    String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port:    u16,
    /// 送信元メールアドレス
    pub from_address: String,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVICE_PORT")
                .expect("SERVICE_PORT が設定されていません")
                .parse()
                .expect("SERVICE_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            locale_catalog_path: env::var("LOCALE_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            notification: NotificationConfig::from_env(),
        })
    }
}

impl NotificationConfig {
    /// 環境変数から通知設定を読み込む
    fn from_env() -> Self {
        Self {
            backend:      env::var("NOTIFICATION_BACKEND")
                .unwrap_or_else(|_| "noop".to_string())
                .parse()
                .expect("NOTIFICATION_BACKEND は smtp / ses / noop のいずれかである必要があります"),
            smtp_host:    env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
            smtp_port:    env::var("SMTP_PORT")
                .unwrap_or_else(|_| "1025".to_string())
                .parse()
                .expect("SMTP_PORT は有効なポート番号である必要があります"),
            from_address: env::var("NOTIFICATION_FROM_ADDRESS")
                .unwrap_or_else(|_| "noreply@modnotify.example.com".to_string()),
        }
    }
}

/// `true` / `1` / `yes` を真とみなす
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("smtp", MailBackend::Smtp)]
    #[case("SES", MailBackend::Ses)]
    #[case("noop", MailBackend::Noop)]
    fn test_バックエンド名をパースする(#[case] input: &str, #[case] expected: MailBackend) {
        assert_eq!(input.parse::<MailBackend>().unwrap(), expected);
    }

    #[test]
    fn test_未知のバックエンド名はエラー() {
        assert!("sendmail".parse::<MailBackend>().is_err());
    }

    #[rstest]
    #[case("true", true)]
    #[case(" 1 ", true)]
    #[case("YES", true)]
    #[case("false", false)]
    #[case("", false)]
    fn test_フラグをパースする(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(parse_flag(input), expected);
    }
}
