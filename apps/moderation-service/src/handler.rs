//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲

pub mod comment_hook;
pub mod health;
pub mod settings;

pub use comment_hook::{CommentHookState, comment_posted, notify_moderator};
pub use health::{ReadinessState, health_check, readiness_check};
pub use settings::{
    SETTINGS_PAGE_PATH,
    SettingsPage,
    SettingsState,
    save_settings,
    show_settings_page,
};
