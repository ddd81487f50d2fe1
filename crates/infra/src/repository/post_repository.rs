//! # PostRepository
//!
//! ホストプラットフォームの `posts` テーブルを読み取るリポジトリ。

use async_trait::async_trait;
use modnotify_domain::{
    post::{Post, PostId},
    user::UserId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 投稿リポジトリトレイト
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// ID で投稿を検索する
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, InfraError>;
}

/// PostgreSQL 実装の PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id:          i64,
    post_title:  String,
    post_author: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id:        PostId::new(row.id),
            title:     row.post_title,
            // 0 は投稿者なし
            author_id: (row.post_author > 0).then(|| UserId::new(row.post_author)),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, InfraError> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, post_title, post_author FROM posts WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Post::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_投稿者0は投稿者なしになる() {
        let post = Post::from(PostRow {
            id:          3,
            post_title:  "Hello".to_string(),
            post_author: 0,
        });

        assert_eq!(post.author_id, None);
    }

    #[test]
    fn test_投稿者idが正なら投稿者ありになる() {
        let post = Post::from(PostRow {
            id:          3,
            post_title:  "Hello".to_string(),
            post_author: 5,
        });

        assert_eq!(post.author_id, Some(UserId::new(5)));
    }
}
