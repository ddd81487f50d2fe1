//! # 宛先集合
//!
//! 1 回のモデレーション通知で送信するメールアドレスの集合。
//!
//! ## 不変条件
//!
//! - 同じアドレスを二度含まない（大文字小文字を区別しない比較）
//! - 空文字列を含まない
//! - 追加順を保持する（送信はこの順で行う）

use std::slice;

/// 重複のない宛先集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientSet {
    emails: Vec<String>,
}

impl RecipientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// アドレスを追加する
    ///
    /// 前後の空白は除去する。空文字列、または既に含まれるアドレスの場合は
    /// 追加せず `false` を返す。
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        let email = email.trim();
        if email.is_empty() || self.contains(email) {
            return false;
        }
        self.emails.push(email.to_string());
        true
    }

    /// 大文字小文字を区別せずにアドレスが含まれるか判定する
    pub fn contains(&self, email: &str) -> bool {
        let needle = email.trim().to_lowercase();
        self.emails.iter().any(|e| e.to_lowercase() == needle)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.emails.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.emails
    }
}

impl<S: Into<String>> FromIterator<S> for RecipientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for RecipientSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for email in iter {
            self.insert(email);
        }
    }
}

impl IntoIterator for RecipientSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.emails.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecipientSet {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.emails.iter()
    }
}
