//! 設定画面の結合テスト

mod helpers;

use axum::body::Body;
use helpers::TestAppBuilder;
use http::{Method, Request, StatusCode, header};
use modnotify_domain::settings::NotificationSettings;
use modnotify_infra::repository::SettingsRepository;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

const PAGE: &str = "/admin/options/comment-notifs";

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_未保存なら既定の宛先をフォームに表示する() {
    // Arrange
    let app = TestAppBuilder::new().build();

    // Act
    let response = app
        .oneshot(Request::builder().uri(PAGE).body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = body_text(response).await;
    assert!(html.contains(">admin@example.com</textarea>"));
    assert!(!html.contains("Settings saved."));
}

#[tokio::test]
async fn test_フォーム送信で設定を保存してリダイレクトする() {
    // Arrange
    let builder = TestAppBuilder::new();
    let app = builder.build();

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(PAGE)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "recipient_emails=a%40x.com%2C+b%40x.com&notify_post_author=on",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/admin/options/comment-notifs?settings-updated=true"
    );
    assert_eq!(
        builder.settings_repo.stored(),
        Some(NotificationSettings {
            recipient_emails:   vec!["a@x.com".to_string(), "b@x.com".to_string()],
            notify_post_author: true,
        })
    );
}

#[tokio::test]
async fn test_チェックボックスが未送信なら投稿者通知をオフで保存する() {
    // Arrange
    let builder = TestAppBuilder::new();
    let app = builder.build();

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(PAGE)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("recipient_emails="))
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        builder.settings_repo.stored(),
        Some(NotificationSettings::default())
    );
}

#[tokio::test]
async fn test_保存後の表示で完了メッセージと保存値を表示する() {
    // Arrange
    let builder = TestAppBuilder::new();
    builder
        .settings_repo
        .save(&NotificationSettings {
            recipient_emails:   vec!["mod@example.com".to_string()],
            notify_post_author: true,
        })
        .await
        .unwrap();
    let app = builder.build();

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("{PAGE}?settings-updated=true"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Settings saved."));
    assert!(html.contains(">mod@example.com</textarea>"));
    assert!(html.contains("checked=\"checked\""));
}
