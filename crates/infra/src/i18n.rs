//! # 翻訳カタログ
//!
//! JSON の翻訳カタログを読み込み、[`Localizer`] を実装する。
//!
//! ## カタログ形式
//!
//! ```json
//! {
//!   "ja": {
//!     "Approve it: {url}": "承認する: {url}",
//!     "Currently {count} comment is waiting for approval. Please visit the moderation panel:": [
//!       "現在 {count} 件のコメントが承認待ちです。モデレーション画面を確認してください:"
//!     ]
//!   }
//! }
//! ```
//!
//! 値が配列の場合は複数形の候補（単数形, 複数形, ...）。キーは単数形のメッセージ ID。
//! 訳が見つからない場合は原文を返す。
//!
//! 読み込み後のカタログは不変。ロケールは呼び出しごとに引数で受け取るため、
//! 1 つのインスタンスを全リクエストで共有できる。

use std::{borrow::Cow, collections::HashMap, path::Path};

use modnotify_domain::i18n::Localizer;
use serde::Deserialize;

use crate::error::InfraError;

/// カタログの 1 エントリ
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    /// 単一の訳
    Single(String),
    /// 複数形の候補
    Plural(Vec<String>),
}

/// ロケール → メッセージ ID → 訳
pub type Catalog = HashMap<String, HashMap<String, CatalogEntry>>;

/// JSON カタログを使う [`Localizer`]
#[derive(Debug, Clone, Default)]
pub struct CatalogLocalizer {
    catalog: Catalog,
}

impl CatalogLocalizer {
    /// 空のカタログで作成する（常に原文を返す）
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// JSON 文字列からカタログを読み込む
    pub fn from_json(json: &str) -> Result<Self, InfraError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        Ok(Self::with_catalog(catalog))
    }

    /// JSON ファイルからカタログを読み込む
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, InfraError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    /// カタログに含まれるロケール数
    pub fn locale_count(&self) -> usize {
        self.catalog.len()
    }

    fn lookup(&self, locale: &str, msgid: &str) -> Option<&CatalogEntry> {
        self.catalog.get(locale)?.get(msgid)
    }
}

impl Localizer for CatalogLocalizer {
    fn translate<'a>(&self, locale: &str, msgid: &'a str) -> Cow<'a, str> {
        match self.lookup(locale, msgid) {
            Some(CatalogEntry::Single(msgstr)) => Cow::Owned(msgstr.clone()),
            Some(CatalogEntry::Plural(forms)) => forms
                .first()
                .map_or(Cow::Borrowed(msgid), |s| Cow::Owned(s.clone())),
            None => Cow::Borrowed(msgid),
        }
    }

    fn translate_plural<'a>(
        &self,
        locale: &str,
        singular: &'a str,
        plural: &'a str,
        n: u64,
    ) -> Cow<'a, str> {
        let index = usize::from(n != 1);
        match self.lookup(locale, singular) {
            Some(CatalogEntry::Plural(forms)) if !forms.is_empty() => {
                Cow::Owned(forms[index.min(forms.len() - 1)].clone())
            }
            Some(CatalogEntry::Single(msgstr)) => Cow::Owned(msgstr.clone()),
            _ => Cow::Borrowed(if n == 1 { singular } else { plural }),
        }
    }
}
