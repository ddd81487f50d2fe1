//! # 逆引き DNS
//!
//! コメント投稿者の IP アドレスからホスト名を解決する。
//!
//! ## 設計方針
//!
//! - **ブロッキング呼び出しの隔離**: システムのリゾルバは同期 API のため `spawn_blocking` で実行
//! - **失敗は呼び出し側で吸収**: 解決できない場合はエラーを返し、通知は空のホスト名で続行する

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::InfraError;

/// ホスト名解決トレイト
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// IP アドレス文字列からホスト名を解決する
    async fn resolve(&self, ip: &str) -> Result<String, InfraError>;
}

/// システムのリゾルバを使う HostnameResolver
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsHostnameResolver;

#[async_trait]
impl HostnameResolver for DnsHostnameResolver {
    #[tracing::instrument(skip_all, level = "debug", fields(%ip))]
    async fn resolve(&self, ip: &str) -> Result<String, InfraError> {
        let addr: IpAddr = ip
            .trim()
            .parse()
            .map_err(|e| InfraError::dns(format!("IP アドレスとして解釈できない: {ip} ({e})")))?;

        tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&addr))
            .await
            .map_err(|e| InfraError::unexpected(format!("逆引きタスクの実行に失敗: {e}")))?
            .map_err(|e| InfraError::dns(format!("{addr}: {e}")))
    }
}
