//! # アプリケーション構築
//!
//! ルーター構築を担当する。DB 接続やバックエンド選択は `main.rs` が行い、
//! ここでは組み立て済みの State を受け取ってルートを登録する。
//! 結合テストもこの関数でルーターを組み立てる。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use modnotify_shared::observability::make_request_span;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    CommentHookState,
    SETTINGS_PAGE_PATH,
    SettingsState,
    comment_posted,
    health_check,
    notify_moderator,
    save_settings,
    show_settings_page,
};

/// ルーターを構築する
///
/// Readiness Check（DB 依存）は含まない。`main.rs` で追加する。
///
/// `x-request-id` がなければ UUID を採番し、レスポンスにも同じ値を返す。
pub fn build_router(
    settings_state: Arc<SettingsState>,
    hook_state: Arc<CommentHookState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route(
                    SETTINGS_PAGE_PATH,
                    get(show_settings_page).post(save_settings),
                )
                .with_state(settings_state),
        )
        .merge(
            Router::new()
                .route("/internal/comments/{comment_id}/posted", post(comment_posted))
                .route(
                    "/internal/comments/{comment_id}/notify-moderator",
                    get(notify_moderator),
                )
                .with_state(hook_state),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
