//! SiteOptionRepository 統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p modnotify-infra --test site_option_repository_test
//! ```

mod common;

use common::insert_option;
use modnotify_infra::repository::{PostgresSiteOptionRepository, SiteOptionRepository};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_サイト設定を読み出せる(pool: PgPool) {
    // Arrange
    insert_option(&pool, "blogname", "Example Blog").await;
    insert_option(&pool, "admin_email", "admin@example.com").await;
    insert_option(&pool, "home", "https://example.com/").await;
    insert_option(&pool, "siteurl", "https://example.com/cms").await;
    insert_option(&pool, "WPLANG", "ja").await;
    insert_option(&pool, "empty_trash_days", "0").await;
    insert_option(&pool, "unrelated", "ignored").await;
    let sut = PostgresSiteOptionRepository::new(pool);

    // Act
    let site = sut.load_site_context().await.unwrap();

    // Assert
    assert_eq!(site.site_name, "Example Blog");
    assert_eq!(site.admin_email, "admin@example.com");
    assert_eq!(site.home_url, "https://example.com");
    assert_eq!(site.admin_url, "https://example.com/cms/wp-admin");
    assert_eq!(site.locale, "ja");
    assert_eq!(site.trash_retention_days, 0);
    assert!(!site.trash_enabled());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_未設定の項目は既定値になる(pool: PgPool) {
    let sut = PostgresSiteOptionRepository::new(pool);

    let site = sut.load_site_context().await.unwrap();

    assert_eq!(site.locale, "en_US");
    assert_eq!(site.trash_retention_days, 30);
    assert_eq!(site.site_name, "");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_保持日数が数値でなくても読み出しは失敗しない(pool: PgPool) {
    insert_option(&pool, "admin_email", "admin@example.com").await;
    insert_option(&pool, "empty_trash_days", "abc").await;
    let sut = PostgresSiteOptionRepository::new(pool);

    let site = sut.load_site_context().await.unwrap();

    assert_eq!(site.trash_retention_days, 30);
    assert_eq!(site.admin_email, "admin@example.com");
}
