//! # modnotify ドメイン層
//!
//! コメントモデレーション通知の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **I/O を持たない**: コメント・投稿・ユーザーの取得、メール送信、逆引き DNS は
//!   すべてインフラ層の責務。ドメイン層は取得済みの値だけを受け取る
//! - **明示的なコンテキスト**: サイト設定は [`site::SiteContext`]、通知設定は
//!   [`settings::NotificationSettings`] として呼び出し時に渡す
//! - **拡張ポイント**: 宛先・本文・件名・ヘッダーは [`filter::ModerationFilters`] の
//!   フィルタチェーンを通して外部から書き換え可能
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//!     ↘       ↘
//!       shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`comment`] / [`post`] / [`user`] - ホストプラットフォームのエンティティ
//! - [`site`] - サイト設定（サイト名、管理者メール、URL、ロケール）
//! - [`settings`] - 通知設定と宛先の既定値ルール
//! - [`recipient`] - 重複のない宛先集合
//! - [`notification`] - モデレーション通知イベントとメッセージ
//! - [`template`] - コメント種別ごとの本文・件名の組み立て
//! - [`filter`] - 拡張ポイント（フィルタチェーン）
//! - [`i18n`] - 翻訳とロケール（通知ごとの [`i18n::Translator`]）
//! - [`best_effort`] - 失敗しても処理を継続する外部呼び出しの結果型

#[macro_use]
mod macros;

pub mod best_effort;
pub mod comment;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod notification;
pub mod post;
pub mod recipient;
pub mod settings;
pub mod site;
pub mod template;
pub mod user;

pub use error::DomainError;
