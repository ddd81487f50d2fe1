//! # ベストエフォート呼び出し
//!
//! 逆引き DNS やメール送信など、失敗しても通知パイプラインを止めない外部呼び出しの結果型。
//! 失敗を握りつぶす代わりに [`BestEffort::Degraded`] として明示し、
//! 呼び出し側は既定値で処理を継続する。

use std::fmt;

/// 失敗しても処理を継続する外部呼び出しの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort<T> {
    /// 成功
    Done(T),
    /// 失敗したが処理は継続する
    Degraded {
        /// 失敗理由（ログ出力用）
        reason: String,
    },
}

impl<T> BestEffort<T> {
    /// `Result` から変換する。エラーは文字列化して理由として保持する
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Done(value),
            Err(e) => Self::Degraded {
                reason: e.to_string(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// 失敗理由（成功時は `None`）
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Done(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }

    /// 成功時は値、失敗時は `fallback` を返す
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Done(value) => value,
            Self::Degraded { .. } => fallback,
        }
    }

    /// 成功時は値、失敗時は `fallback` の結果を返す
    pub fn unwrap_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Done(value) => value,
            Self::Degraded { .. } => fallback(),
        }
    }
}

impl<T: Default> BestEffort<T> {
    /// 成功時は値、失敗時は `T::default()` を返す
    pub fn unwrap_or_default(self) -> T {
        self.unwrap_or_else(T::default)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_okはdoneになる() {
        let result: Result<String, String> = Ok("host.example.com".to_string());

        let outcome = BestEffort::from_result(result);

        assert!(!outcome.is_degraded());
        assert_eq!(outcome.unwrap_or_default(), "host.example.com");
    }

    #[test]
    fn test_errは理由を保持してdegradedになる() {
        let result: Result<String, String> = Err("NXDOMAIN".to_string());

        let outcome = BestEffort::from_result(result);

        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason(), Some("NXDOMAIN"));
        assert_eq!(outcome.unwrap_or_default(), "");
    }

    #[test]
    fn test_unwrap_or_elseは失敗時だけ代替値を計算する() {
        let done: BestEffort<u64> = BestEffort::Done(3);
        let degraded: BestEffort<u64> = BestEffort::Degraded {
            reason: "timeout".to_string(),
        };

        assert_eq!(done.unwrap_or_else(|| unreachable!()), 3);
        assert_eq!(degraded.unwrap_or_else(|| 1), 1);
    }
}
