//! # モデレーション通知
//!
//! 承認待ちコメントの通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 |
//! |---|------------|
//! | [`ModerationEvent`] | 通知のきっかけになったコメントと投稿の情報 |
//! | [`ModerationMessage`] | 件名・本文・ヘッダー・宛先集合。イベントごとに 1 回だけ組み立てる |
//! | [`EmailMessage`] | 宛先 1 件分のメール。`MailSender` に渡される |
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: 送信の失敗はコメント投稿の処理に影響しない
//! - **宛先ごとに独立送信**: 1 件の失敗が残りの送信を妨げない

use thiserror::Error;

use crate::{
    comment::{Comment, CommentId, CommentType},
    post::{Post, PostId},
    recipient::RecipientSet,
    user::UserId,
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// 追加ヘッダーの形式が不正
    #[error("不正なメールヘッダー: {0}")]
    InvalidHeader(String),
}

/// モデレーション通知イベント
///
/// コメント投稿ごとに組み立てる一時的な値。永続化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationEvent {
    pub comment_id:     CommentId,
    pub comment_type:   CommentType,
    pub author_name:    String,
    pub author_email:   String,
    pub author_ip:      String,
    pub author_url:     String,
    pub content:        String,
    pub post_id:        PostId,
    pub post_title:     String,
    pub post_author_id: Option<UserId>,
}

impl ModerationEvent {
    /// コメントと投稿からイベントを組み立てる
    pub fn new(comment: Comment, post: &Post) -> Self {
        Self {
            comment_id:     comment.id,
            comment_type:   comment.comment_type,
            author_name:    comment.author_name,
            author_email:   comment.author_email,
            author_ip:      comment.author_ip,
            author_url:     comment.author_url,
            content:        comment.content,
            post_id:        post.id,
            post_title:     post.title.clone(),
            post_author_id: post.author_id,
        }
    }
}

/// モデレーション通知メッセージ
///
/// フィルタ適用後の最終形。送信後に破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationMessage {
    pub subject:    String,
    pub body:       String,
    /// 追加ヘッダー（`Name: value` を改行で区切った文字列。空なら追加なし）
    pub headers:    String,
    pub recipients: RecipientSet,
}

impl ModerationMessage {
    /// 宛先ごとのメールを宛先集合の順に生成する
    pub fn emails(&self) -> impl Iterator<Item = EmailMessage> + '_ {
        self.recipients.iter().map(|to| EmailMessage {
            to:        to.clone(),
            subject:   self.subject.clone(),
            text_body: self.body.clone(),
            headers:   self.headers.clone(),
        })
    }
}

/// メールメッセージ
///
/// 本文はプレーンテキストのみ。`MailSender` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
    /// 追加ヘッダー（`Name: value` の行）
    pub headers:   String,
}

impl EmailMessage {
    /// 追加ヘッダーを `(名前, 値)` の組に分解する
    ///
    /// 空行は無視する。`:` を含まない行や名前が空の行はエラー。
    pub fn extra_headers(&self) -> Result<Vec<(String, String)>, NotificationError> {
        self.headers
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                let (name, value) = line
                    .split_once(':')
                    .ok_or_else(|| NotificationError::InvalidHeader(line.to_string()))?;
                let name = name.trim();
                if name.is_empty() {
                    return Err(NotificationError::InvalidHeader(line.to_string()));
                }
                Ok((name.to_string(), value.trim().to_string()))
            })
            .collect()
    }
}
