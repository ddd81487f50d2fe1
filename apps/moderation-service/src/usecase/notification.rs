//! # モデレーション通知ユースケース
//!
//! 承認待ちコメントの投稿をきっかけに、宛先の決定・本文の組み立て・メール送信を行う。
//!
//! ## モジュール構成
//!
//! - [`service`] - 通知パイプライン（宛先決定 → 本文組み立て → フィルタ → 送信）

pub mod service;

pub use service::{ModerationNotifier, NotifierDeps};
