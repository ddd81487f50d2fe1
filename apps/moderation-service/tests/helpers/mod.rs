//! 結合テスト用ヘルパー

#![allow(dead_code)]

mod test_app_builder;

pub use test_app_builder::TestAppBuilder;
