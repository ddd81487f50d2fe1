//! # 翻訳とロケール
//!
//! 通知本文の文言は [`Localizer`] から取得する。メッセージ ID は英語の原文で、
//! 埋め込み値は `{post_title}` のような名前付きプレースホルダで表す。
//!
//! [`Localizer`] は共有される読み取り専用のカタログで、ロケールを状態として持たない。
//! 通知 1 件ごとにサイトのロケールを束縛した [`Translator`] を作り、本文の組み立てに渡す。
//! 同時に処理される通知同士がロケールを奪い合うことはない。

use std::borrow::Cow;

/// 翻訳・複数形・数値整形を提供するトレイト
///
/// すべての操作はロケールを引数で受け取る。
pub trait Localizer: Send + Sync {
    /// 指定ロケールで翻訳する。訳がなければ原文を返す
    fn translate<'a>(&self, locale: &str, msgid: &'a str) -> Cow<'a, str>;

    /// 件数に応じた複数形を指定ロケールで翻訳する
    fn translate_plural<'a>(
        &self,
        locale: &str,
        singular: &'a str,
        plural: &'a str,
        n: u64,
    ) -> Cow<'a, str>;

    /// 件数を表示用に整形する（桁区切り）
    fn format_number(&self, _locale: &str, n: u64) -> String {
        group_thousands(n, ',')
    }
}

/// ロケールを束縛した翻訳ハンドル
///
/// 通知 1 件の組み立ての間だけ使う値。共有状態を変更しない。
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    localizer: &'a dyn Localizer,
    locale:    &'a str,
}

impl<'a> Translator<'a> {
    pub fn new(localizer: &'a dyn Localizer, locale: &'a str) -> Self {
        Self { localizer, locale }
    }

    pub fn locale(&self) -> &str {
        self.locale
    }

    pub fn translate<'m>(&self, msgid: &'m str) -> Cow<'m, str> {
        self.localizer.translate(self.locale, msgid)
    }

    pub fn translate_plural<'m>(&self, singular: &'m str, plural: &'m str, n: u64) -> Cow<'m, str> {
        self.localizer
            .translate_plural(self.locale, singular, plural, n)
    }

    pub fn format_number(&self, n: u64) -> String {
        self.localizer.format_number(self.locale, n)
    }
}

/// 翻訳しない [`Localizer`]（英語の原文をそのまま返す）
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceLocalizer;

impl Localizer for SourceLocalizer {
    fn translate<'a>(&self, _locale: &str, msgid: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(msgid)
    }

    fn translate_plural<'a>(
        &self,
        _locale: &str,
        singular: &'a str,
        plural: &'a str,
        n: u64,
    ) -> Cow<'a, str> {
        Cow::Borrowed(if n == 1 { singular } else { plural })
    }
}

/// 名前付きプレースホルダ `{name}` を値で置き換える
///
/// 置換は 1 パスで行い、埋め込んだ値の中の `{...}` は展開しない。
/// 未知のプレースホルダはそのまま残す。
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match args.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// 3 桁ごとに区切り文字を入れる
pub fn group_thousands(n: u64, separator: char) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
