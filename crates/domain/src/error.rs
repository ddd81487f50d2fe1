//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 通知パイプラインはこのエラーを呼び出し元に返さない（no-op として扱う）。
/// 設定画面など、利用者に結果を返す経路でのみ HTTP レスポンスに変換される。
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Comment", "Post" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}
