//! UserRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p modnotify-infra --test user_repository_test
//! ```

mod common;

use common::insert_user;
use modnotify_domain::user::{ADMINISTRATOR_ROLE, UserId};
use modnotify_infra::repository::{PostgresUserRepository, UserRepository};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_idでユーザーを取得できる(pool: PgPool) {
    let id = insert_user(&pool, "author", "author@example.com", &["author"]).await;
    let sut = PostgresUserRepository::new(pool);

    let user = sut.find_by_id(UserId::new(id)).await.unwrap().unwrap();

    assert_eq!(user.login, "author");
    assert_eq!(user.email, "author@example.com");
    assert_eq!(user.roles, vec!["author".to_string()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_存在しないユーザーはnoneを返す(pool: PgPool) {
    let sut = PostgresUserRepository::new(pool);

    let result = sut.find_by_id(UserId::new(999)).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_roleはロールを持つユーザーをログイン名順に返す(pool: PgPool) {
    // Arrange
    insert_user(&pool, "zed", "zed@example.com", &[ADMINISTRATOR_ROLE]).await;
    insert_user(&pool, "editor", "editor@example.com", &["editor"]).await;
    insert_user(&pool, "alice", "alice@example.com", &["editor", ADMINISTRATOR_ROLE]).await;
    let sut = PostgresUserRepository::new(pool);

    // Act
    let admins = sut.find_by_role(ADMINISTRATOR_ROLE).await.unwrap();

    // Assert
    let logins: Vec<&str> = admins.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["alice", "zed"]);
}
