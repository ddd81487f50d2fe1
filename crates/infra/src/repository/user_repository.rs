//! # UserRepository
//!
//! ホストプラットフォームのユーザーアカウントを読み取るリポジトリ。
//!
//! ## 設計方針
//!
//! - **一覧順の保持**: ロールでの検索結果はログイン名順（アカウント一覧と同じ順序）
//! - **ロールは配列カラム**: `users.roles` に保持し、`= ANY(roles)` で絞り込む

use async_trait::async_trait;
use modnotify_domain::user::{User, UserId};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ID でユーザーを検索する
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError>;

    /// 指定ロールを持つユーザーをログイン名順に取得する
    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, InfraError>;
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id:         i64,
    user_login: String,
    user_email: String,
    roles:      Vec<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id:    UserId::new(row.id),
            login: row.user_login,
            email: row.user_email,
            roles: row.roles,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, user_login, user_email, roles FROM users WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%role))]
    async fn find_by_role(&self, role: &str) -> Result<Vec<User>, InfraError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, user_login, user_email, roles
            FROM users
            WHERE $1 = ANY(roles)
            ORDER BY user_login ASC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
