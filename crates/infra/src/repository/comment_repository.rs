//! # CommentRepository
//!
//! ホストプラットフォームの `comments` テーブルを読み取るリポジトリ。
//! 通知サービスはコメントを書き換えない。

use async_trait::async_trait;
use modnotify_domain::{
    comment::{ApprovalState, Comment, CommentId},
    post::PostId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// コメントリポジトリトレイト
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// ID でコメントを検索する
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, InfraError>;

    /// 承認待ちコメントの件数を数える
    ///
    /// キャッシュせず、呼び出し時点の件数を返す。
    async fn count_pending(&self) -> Result<u64, InfraError>;
}

/// PostgreSQL 実装の CommentRepository
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id:                   i64,
    comment_post_id:      i64,
    comment_type:         String,
    comment_author:       String,
    comment_author_email: String,
    comment_author_ip:    String,
    comment_author_url:   String,
    comment_content:      String,
    comment_approved:     String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id:           CommentId::new(row.id),
            post_id:      PostId::new(row.comment_post_id),
            comment_type: row.comment_type.into(),
            author_name:  row.comment_author,
            author_email: row.comment_author_email,
            author_ip:    row.comment_author_ip,
            author_url:   row.comment_author_url,
            content:      row.comment_content,
            approval:     row.comment_approved.into(),
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, InfraError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                id,
                comment_post_id,
                comment_type,
                comment_author,
                comment_author_email,
                comment_author_ip,
                comment_author_url,
                comment_content,
                comment_approved
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Comment::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn count_pending(&self) -> Result<u64, InfraError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE comment_approved = $1")
                .bind(ApprovalState::Pending.as_str())
                .fetch_one(&self.pool)
                .await?;

        u64::try_from(count)
            .map_err(|_| InfraError::unexpected(format!("承認待ち件数が負の値: {count}")))
    }
}
