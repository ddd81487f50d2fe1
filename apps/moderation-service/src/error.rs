//! # サービスエラー定義
//!
//! モデレーション通知サービス固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 通知パイプライン（コメント投稿フック）はこのエラーを返さない。
//! 設定画面とヘルスチェックなど、利用者に結果を返す経路でのみ使用する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use modnotify_domain::DomainError;
use modnotify_infra::InfraError;
use modnotify_shared::{
    ErrorResponse,
    event_log::error::{category, kind},
};
use thiserror::Error;

/// サービスで発生するエラー
#[derive(Debug, Error)]
pub enum ServiceError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// ドメインエラー
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 設定画面のレンダリングエラー
    #[error("テンプレートエラー: {0}")]
    Template(#[from] tera::Error),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = match &self {
            ServiceError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            ServiceError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            ServiceError::Domain(DomainError::Validation(msg)) => {
                ErrorResponse::bad_request(msg.clone())
            }
            ServiceError::Domain(e @ DomainError::NotFound { .. }) => {
                ErrorResponse::not_found(e.to_string())
            }
            ServiceError::Database(e) => {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::DATABASE,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
            ServiceError::Template(e) => {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::INTERNAL,
                    "テンプレートエラー: {:?}",
                    e
                );
                ErrorResponse::internal_error()
            }
            ServiceError::Internal(msg) => {
                tracing::error!(
                    error.category = category::INFRASTRUCTURE,
                    error.kind = kind::INTERNAL,
                    "内部エラー: {}",
                    msg
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn into_parts(error: ServiceError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_foundは404のproblem_jsonになる() {
        let (status, body) = into_parts(ServiceError::NotFound("コメント 7".to_string())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["type"], "https://modnotify.example.com/errors/not-found");
        assert_eq!(body["detail"], "コメント 7");
    }

    #[tokio::test]
    async fn test_バリデーションエラーは400になる() {
        let error = ServiceError::from(DomainError::Validation("不正".to_string()));

        let (status, body) = into_parts(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_データベースエラーは詳細を隠して500になる() {
        let error = ServiceError::from(InfraError::unexpected("接続断"));

        let (status, body) = into_parts(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "内部エラーが発生しました");
    }
}
