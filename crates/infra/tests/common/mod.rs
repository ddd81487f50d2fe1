//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するシードデータ投入ヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use sqlx::PgPool;

/// ユーザーを作成し、ID を返す
pub async fn insert_user(pool: &PgPool, login: &str, email: &str, roles: &[&str]) -> i64 {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    sqlx::query_scalar(
        "INSERT INTO users (user_login, user_email, roles) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(login)
    .bind(email)
    .bind(&roles)
    .fetch_one(pool)
    .await
    .expect("ユーザー作成に失敗")
}

/// 投稿を作成し、ID を返す（`post_author = 0` は投稿者なし）
pub async fn insert_post(pool: &PgPool, title: &str, author_id: i64) -> i64 {
    sqlx::query_scalar("INSERT INTO posts (post_title, post_author) VALUES ($1, $2) RETURNING id")
        .bind(title)
        .bind(author_id)
        .fetch_one(pool)
        .await
        .expect("投稿作成に失敗")
}

/// コメントを作成し、ID を返す
pub async fn insert_comment(pool: &PgPool, post_id: i64, comment_type: &str, approved: &str) -> i64 {
    sqlx::query_scalar(
        r#"
        INSERT INTO comments (
            comment_post_id, comment_type, comment_author, comment_author_email,
            comment_author_ip, comment_author_url, comment_content, comment_approved
        )
        VALUES ($1, $2, 'Taro', 'taro@example.com', '192.0.2.1', 'https://taro.example.com', 'Nice post', $3)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .bind(comment_type)
    .bind(approved)
    .fetch_one(pool)
    .await
    .expect("コメント作成に失敗")
}

/// サイト設定を登録する
pub async fn insert_option(pool: &PgPool, name: &str, value: &str) {
    sqlx::query("INSERT INTO site_options (option_name, option_value) VALUES ($1, $2)")
        .bind(name)
        .bind(value)
        .execute(pool)
        .await
        .expect("サイト設定の登録に失敗");
}
