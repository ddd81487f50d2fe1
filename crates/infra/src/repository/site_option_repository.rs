//! # SiteOptionRepository
//!
//! ホストプラットフォームのサイト設定（`site_options` テーブルのキー・値）から
//! 通知に必要な [`SiteContext`] を組み立てる。
//!
//! ## 読み取るキー
//!
//! | キー | 用途 | 未設定時 |
//! |------|------|---------|
//! | `blogname` | 件名のサイト名 | 空文字列 |
//! | `admin_email` | 既定の宛先 | 空文字列 |
//! | `home` | 投稿パーマリンクの基点 | `siteurl` |
//! | `siteurl` | 管理画面 URL の基点 | `home` |
//! | `WPLANG` | 通知のロケール | `en_US` |
//! | `empty_trash_days` | ゴミ箱の保持日数（0 でゴミ箱無効） | 30（数値でない場合も） |

use std::collections::HashMap;

use async_trait::async_trait;
use modnotify_domain::{best_effort::BestEffort, site::SiteContext};
use sqlx::PgPool;

use crate::error::InfraError;

/// 既定のロケール
pub const DEFAULT_LOCALE: &str = "en_US";

/// ゴミ箱の既定保持日数
pub const DEFAULT_TRASH_RETENTION_DAYS: u32 = 30;

const OPTION_KEYS: [&str; 6] = [
    "blogname",
    "admin_email",
    "home",
    "siteurl",
    "WPLANG",
    "empty_trash_days",
];

/// サイト設定リポジトリトレイト
#[async_trait]
pub trait SiteOptionRepository: Send + Sync {
    /// 通知に必要なサイト設定を読み出す
    async fn load_site_context(&self) -> Result<SiteContext, InfraError>;
}

/// PostgreSQL 実装の SiteOptionRepository
#[derive(Debug, Clone)]
pub struct PostgresSiteOptionRepository {
    pool: PgPool,
}

impl PostgresSiteOptionRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteOptionRepository for PostgresSiteOptionRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn load_site_context(&self) -> Result<SiteContext, InfraError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT option_name, option_value FROM site_options WHERE option_name = ANY($1)",
        )
        .bind(&OPTION_KEYS[..])
        .fetch_all(&self.pool)
        .await?;

        Ok(site_context_from_options(rows.into_iter().collect()))
    }
}

/// キー・値の組からサイト設定を組み立てる
///
/// 保持日数が数値でない場合は警告を出して既定値を使う。
pub fn site_context_from_options(mut options: HashMap<String, String>) -> SiteContext {
    let mut take = |key: &str| {
        options
            .remove(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let site_name = take("blogname").unwrap_or_default();
    let admin_email = take("admin_email").unwrap_or_default();
    let home = take("home");
    let site_url = take("siteurl");
    let locale = take("WPLANG").unwrap_or_else(|| DEFAULT_LOCALE.to_string());
    let trash_retention_days = match take("empty_trash_days") {
        Some(days) => {
            let parsed = BestEffort::from_result(days.parse::<u32>());
            if let Some(reason) = parsed.reason() {
                tracing::warn!(
                    value = %days,
                    reason,
                    default = DEFAULT_TRASH_RETENTION_DAYS,
                    "empty_trash_days が数値でないため既定値を使用"
                );
            }
            parsed.unwrap_or(DEFAULT_TRASH_RETENTION_DAYS)
        }
        None => DEFAULT_TRASH_RETENTION_DAYS,
    };

    let home_url = home
        .clone()
        .or_else(|| site_url.clone())
        .unwrap_or_default();
    let site_url = site_url.or(home).unwrap_or_default();

    SiteContext {
        site_name,
        admin_email,
        home_url: home_url.trim_end_matches('/').to_string(),
        admin_url: format!("{}/wp-admin", site_url.trim_end_matches('/')),
        locale,
        trash_retention_days,
    }
}
