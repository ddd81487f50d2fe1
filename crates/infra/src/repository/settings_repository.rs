//! # SettingsRepository
//!
//! モデレーション通知設定の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **単一レコード**: `notification_settings` テーブルの 1 行（キー固定）に JSONB で保存
//! - **アトミックな上書き**: 宛先と投稿者通知フラグを 1 回の UPSERT で同時に保存
//! - **未保存の区別**: レコードがない場合は `None` を返し、既定値の決定は呼び出し側に任せる

use async_trait::async_trait;
use modnotify_domain::settings::NotificationSettings;
use sqlx::PgPool;

use crate::error::InfraError;

/// 設定レコードのキー
pub const SETTINGS_KEY: &str = "moderation_notification";

/// 通知設定リポジトリトレイト
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// 保存済みの設定を取得する。未保存なら `None`
    async fn find(&self) -> Result<Option<NotificationSettings>, InfraError>;

    /// 設定を保存する（既存レコードは上書き）
    async fn save(&self, settings: &NotificationSettings) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の SettingsRepository
#[derive(Debug, Clone)]
pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find(&self) -> Result<Option<NotificationSettings>, InfraError> {
        let value: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT value FROM notification_settings WHERE setting_key = $1")
                .bind(SETTINGS_KEY)
                .fetch_optional(&self.pool)
                .await?;

        value
            .map(serde_json::from_value)
            .transpose()
            .map_err(InfraError::from)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn save(&self, settings: &NotificationSettings) -> Result<(), InfraError> {
        let value = serde_json::to_value(settings)?;

        sqlx::query(
            r#"
            INSERT INTO notification_settings (setting_key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (setting_key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
