//! # コメントライフサイクルフック
//!
//! ホストプラットフォームのコメント関連イベントを受け取る内部 API。
//!
//! ## エンドポイント
//!
//! - `POST /internal/comments/{comment_id}/posted` - 新しいコメントの投稿（通知パイプラインを実行）
//! - `GET /internal/comments/{comment_id}/notify-moderator` - 標準のモデレーター通知の要否
//!
//! 通知の失敗はコメント投稿の処理に影響させないため、どちらも常に 200 を返す。
//! `comment_id` が数値でない場合も 400 にはせず、何もしない応答を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use modnotify_domain::comment::CommentId;
use modnotify_shared::ApiResponse;
use serde::Serialize;

use crate::usecase::ModerationNotifier;

/// フック API の共有状態
pub struct CommentHookState {
    pub notifier: Arc<ModerationNotifier>,
}

/// 通知パイプラインの実行結果
#[derive(Debug, Serialize)]
pub struct CommentPostedData {
    /// 送信を試みたか
    pub dispatched: bool,
}

/// 標準のモデレーター通知の要否
#[derive(Debug, Serialize)]
pub struct NotifyModeratorData {
    pub notify: bool,
}

/// パスの `comment_id` を解釈する。数値でなければ `None`
fn parse_comment_id(raw: &str) -> Option<CommentId> {
    match raw.parse::<i64>() {
        Ok(id) => Some(CommentId::new(id)),
        Err(e) => {
            tracing::warn!(comment_id = %raw, error = %e, "コメント ID が数値でないため処理しない");
            None
        }
    }
}

/// POST /internal/comments/{comment_id}/posted
pub async fn comment_posted(
    State(state): State<Arc<CommentHookState>>,
    Path(comment_id): Path<String>,
) -> Json<ApiResponse<CommentPostedData>> {
    let dispatched = match parse_comment_id(&comment_id) {
        Some(comment_id) => state.notifier.on_comment_posted(comment_id).await,
        None => false,
    };

    Json(ApiResponse::new(CommentPostedData { dispatched }))
}

/// GET /internal/comments/{comment_id}/notify-moderator
pub async fn notify_moderator(
    State(state): State<Arc<CommentHookState>>,
    Path(comment_id): Path<String>,
) -> Json<ApiResponse<NotifyModeratorData>> {
    let notify = parse_comment_id(&comment_id)
        .is_some_and(|comment_id| state.notifier.should_notify_moderator(comment_id));

    Json(ApiResponse::new(NotifyModeratorData { notify }))
}
