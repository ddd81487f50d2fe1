//! # モデレーション通知サービス ライブラリ
//!
//! ハンドラ・ユースケース・ルーター構築を公開する。
//! `main.rs` と結合テストの両方から利用する。

pub mod app_builder;
pub mod error;
pub mod handler;
pub mod usecase;
