//! DB コネクション管理の統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p modnotify-infra --test db_test
//! ```

use modnotify_infra::db;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_pingが接続済みプールで成功する(pool: PgPool) {
    let result = db::ping(&pool).await;

    assert!(result.is_ok());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_マイグレーションは再実行しても成功する(pool: PgPool) {
    // sqlx::test が適用済みのため、再実行はすべてスキップされる
    let result = db::run_migrations(&pool).await;

    assert!(result.is_ok());
}
