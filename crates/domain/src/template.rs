//! # 通知本文・件名の組み立て
//!
//! コメント種別ごとに文言を選び、プレーンテキストの本文を組み立てる。
//! 行区切りは CRLF。テンプレートエンジンは使わず、翻訳済みの文言に
//! 名前付きプレースホルダを埋め込む。
//!
//! | コメント種別 | テンプレート |
//! |---|---|
//! | `trackback` | [`ModerationTemplate::Trackback`] |
//! | `pingback` | [`ModerationTemplate::Pingback`] |
//! | それ以外（未知の種別を含む） | [`ModerationTemplate::Comment`] |
//!
//! どのテンプレートにも、承認・削除（またはゴミ箱）・スパム操作のリンクと
//! 承認待ち件数を含むフッターが付く。

use strum::IntoStaticStr;

use crate::{
    comment::CommentType,
    i18n::{Translator, fill},
    notification::ModerationEvent,
    site::SiteContext,
};

const CRLF: &str = "\r\n";

mod msgid {
    pub const NEW_TRACKBACK: &str =
        "A new trackback on the post \"{post_title}\" is waiting for your approval";
    pub const NEW_PINGBACK: &str =
        "A new pingback on the post \"{post_title}\" is waiting for your approval";
    pub const NEW_COMMENT: &str =
        "A new comment on the post \"{post_title}\" is waiting for your approval:";
    pub const WEBSITE: &str = "Website: {author} (IP: {ip}, {hostname})";
    pub const AUTHOR: &str = "Author: {author} (IP: {ip}, {hostname})";
    pub const EMAIL: &str = "Email: {email}";
    pub const URL: &str = "URL: {url}";
    pub const TRACKBACK_EXCERPT: &str = "Trackback excerpt: ";
    pub const PINGBACK_EXCERPT: &str = "Pingback excerpt: ";
    pub const COMMENT: &str = "Comment: {content}";
    pub const APPROVE: &str = "Approve it: {url}";
    pub const TRASH: &str = "Trash it: {url}";
    pub const DELETE: &str = "Delete it: {url}";
    pub const SPAM: &str = "Spam it: {url}";
    pub const PENDING_ONE: &str =
        "Currently {count} comment is waiting for approval. Please visit the moderation panel:";
    pub const PENDING_MANY: &str =
        "Currently {count} comments are waiting for approval. Please visit the moderation panel:";
    pub const SUBJECT: &str = "[{site_name}] Please moderate: \"{post_title}\"";
}

/// コメント種別から選ばれる本文テンプレート
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ModerationTemplate {
    Comment,
    Pingback,
    Trackback,
}

impl ModerationTemplate {
    pub fn for_comment_type(comment_type: &CommentType) -> Self {
        match comment_type {
            CommentType::Trackback => Self::Trackback,
            CommentType::Pingback => Self::Pingback,
            CommentType::Comment | CommentType::Other(_) => Self::Comment,
        }
    }
}

/// 本文の組み立てに必要な値
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    pub event:           &'a ModerationEvent,
    pub site:            &'a SiteContext,
    /// 投稿者 IP の逆引き結果（解決できなければ空文字列）
    pub author_hostname: &'a str,
    /// 送信時点の承認待ちコメント数（今回のコメントを含む）
    pub pending_count:   u64,
}

/// 本文を組み立てる
pub fn render_body(ctx: &MessageContext<'_>, translator: &Translator<'_>) -> String {
    let event = ctx.event;
    let content = decode_special_chars_keep_quotes(&event.content);
    let permalink = ctx.site.permalink(event.post_id);
    let t = |msgid: &'static str, args: &[(&str, &str)]| fill(&translator.translate(msgid), args);

    let mut body = String::new();
    let mut push = |text: String, line_breaks: usize| {
        body.push_str(&text);
        body.push_str(&CRLF.repeat(line_breaks));
    };

    let template = ModerationTemplate::for_comment_type(&event.comment_type);
    match template {
        ModerationTemplate::Trackback | ModerationTemplate::Pingback => {
            let (headline, excerpt) = if template == ModerationTemplate::Trackback {
                (msgid::NEW_TRACKBACK, msgid::TRACKBACK_EXCERPT)
            } else {
                (msgid::NEW_PINGBACK, msgid::PINGBACK_EXCERPT)
            };
            push(t(headline, &[("post_title", &event.post_title)]), 1);
            push(permalink, 2);
            push(
                t(
                    msgid::WEBSITE,
                    &[
                        ("author", &event.author_name),
                        ("ip", &event.author_ip),
                        ("hostname", ctx.author_hostname),
                    ],
                ),
                1,
            );
            push(t(msgid::URL, &[("url", &event.author_url)]), 2);
            push(t(excerpt, &[]), 1);
            push(content, 2);
        }
        ModerationTemplate::Comment => {
            push(t(msgid::NEW_COMMENT, &[("post_title", &event.post_title)]), 1);
            push(permalink, 2);
            push(
                t(
                    msgid::AUTHOR,
                    &[
                        ("author", &event.author_name),
                        ("ip", &event.author_ip),
                        ("hostname", ctx.author_hostname),
                    ],
                ),
                1,
            );
            push(t(msgid::EMAIL, &[("email", &event.author_email)]), 2);
            push(t(msgid::URL, &[("url", &event.author_url)]), 2);
            push(
                t(msgid::COMMENT, &[("content", &format!("{CRLF}{content}"))]),
                2,
            );
        }
    }

    let site = ctx.site;
    let comment_id = event.comment_id;
    push(
        t(
            msgid::APPROVE,
            &[("url", &site.comment_action_link("approve", comment_id))],
        ),
        1,
    );
    let remove_line = if site.trash_enabled() {
        t(
            msgid::TRASH,
            &[("url", &site.comment_action_link("trash", comment_id))],
        )
    } else {
        t(
            msgid::DELETE,
            &[("url", &site.comment_action_link("delete", comment_id))],
        )
    };
    push(remove_line, 1);
    push(
        t(
            msgid::SPAM,
            &[("url", &site.comment_action_link("spam", comment_id))],
        ),
        1,
    );
    let pending = translator.translate_plural(
        msgid::PENDING_ONE,
        msgid::PENDING_MANY,
        ctx.pending_count,
    );
    push(
        fill(
            &pending,
            &[("count", &translator.format_number(ctx.pending_count))],
        ),
        1,
    );
    push(site.moderation_queue_link(), 1);

    body
}

/// 件名を組み立てる
///
/// `[<サイト名>] Please moderate: "<投稿タイトル>"`
pub fn render_subject(ctx: &MessageContext<'_>, translator: &Translator<'_>) -> String {
    fill(
        &translator.translate(msgid::SUBJECT),
        &[
            ("site_name", &decode_special_chars(&ctx.site.site_name)),
            ("post_title", &ctx.event.post_title),
        ],
    )
}

/// HTML の特殊文字エンティティをプレーンテキストに戻す
///
/// 対象は `&lt; &gt; &quot; &#039; &#39; &amp;`。`&amp;` は最後に戻すため、
/// `&amp;lt;` は `&lt;` になる（二重にデコードしない）。
/// サイト名と件名に使う。
pub fn decode_special_chars(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    decode_amp_last(
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#039;", "'")
            .replace("&#39;", "'"),
    )
}

/// 引用符のエンティティ（`&quot; &#039;`）を残してデコードする
///
/// コメント本文に使う。対象は `&lt; &gt; &amp;` のみ。
pub fn decode_special_chars_keep_quotes(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    decode_amp_last(s.replace("&lt;", "<").replace("&gt;", ">"))
}

fn decode_amp_last(s: String) -> String {
    s.replace("&amp;", "&")
}
