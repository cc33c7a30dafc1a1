//! WXR Formatter
//!
//! WordPress eXtended RSS 1.2 形式の文書を`quick-xml`で書き出すモジュール。
//!
//! 文書はヘッダー（XML宣言、`rss`、`channel`の固定要素）、エントリーごとの
//! `item`、フッター（`</channel></rss>`）の3部構成です。各要素の後には改行を
//! 1つ入れ、WordPressのエクスポートファイルに近い見た目にしています。

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::PostDates;
use crate::builder::ExportConfig;
use crate::config::AuthorSettings;
use crate::error::SheetPressError;
use crate::types::Entry;

const WXR_VERSION: &str = "1.2";

const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:excerpt", "http://wordpress.org/export/1.2/excerpt/"),
    ("xmlns:content", "http://purl.org/rss/1.0/modules/content/"),
    ("xmlns:wfw", "http://wellformedweb.org/CommentAPI/"),
    ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
    ("xmlns:wp", "http://wordpress.org/export/1.2/"),
];

/// WXR形式のフォーマッター
#[derive(Debug, Clone, Copy)]
pub(crate) struct WxrFormatter;

impl WxrFormatter {
    pub fn render<W: Write>(
        &self,
        entries: &[(u64, &Entry)],
        config: &ExportConfig,
        dates: &PostDates,
        writer: &mut W,
    ) -> Result<(), SheetPressError> {
        let mut xml = WxrWriter::new(writer);

        write_header(&mut xml, config, dates)?;
        for &(id, entry) in entries {
            write_item(&mut xml, id, entry, config, dates)?;
        }
        write_footer(&mut xml)
    }
}

fn write_header<W: Write>(
    xml: &mut WxrWriter<W>,
    config: &ExportConfig,
    dates: &PostDates,
) -> Result<(), SheetPressError> {
    let site = &config.site;

    xml.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.newline()?;

    let rss = BytesStart::new("rss")
        .with_attributes(std::iter::once(("version", "2.0")).chain(NAMESPACES));
    xml.event(Event::Start(rss))?;
    xml.newline()?;

    xml.open_line("channel")?;
    xml.text_line("title", &site.title)?;
    xml.text_line("link", &site.url)?;
    xml.text_line("description", &site.description)?;
    xml.text_line("pubDate", &dates.channel_pub_date())?;
    xml.text_line("language", &site.language)?;
    xml.text_line("wp:wxr_version", WXR_VERSION)?;
    xml.text_line("wp:base_site_url", &site.base_site_url)?;
    xml.text_line("wp:base_blog_url", &site.url)?;

    if let Some(author) = &config.author {
        write_author(xml, author)?;
    }

    xml.text_line("generator", &site.generator)
}

/// `wp:author`ブロック（1行にまとめて出力）
fn write_author<W: Write>(
    xml: &mut WxrWriter<W>,
    author: &AuthorSettings,
) -> Result<(), SheetPressError> {
    xml.open("wp:author")?;
    xml.text("wp:author_id", &author.id.to_string())?;
    xml.cdata("wp:author_login", &author.login)?;
    xml.cdata("wp:author_email", &author.email)?;
    xml.cdata("wp:author_display_name", &author.display_name)?;
    xml.cdata("wp:author_first_name", &author.first_name)?;
    xml.cdata("wp:author_last_name", &author.last_name)?;
    xml.close("wp:author")?;
    xml.newline()
}

fn write_item<W: Write>(
    xml: &mut WxrWriter<W>,
    id: u64,
    entry: &Entry,
    config: &ExportConfig,
    dates: &PostDates,
) -> Result<(), SheetPressError> {
    let site = &config.site;
    let post = &config.post;

    xml.open_line("item")?;
    xml.text_line("title", &entry.title)?;
    xml.text_line("link", &site.post_url(&entry.slug))?;
    xml.text_line("pubDate", &dates.pub_date())?;
    xml.cdata_line("dc:creator", &post.creator)?;

    let guid = BytesStart::new("guid").with_attributes([("isPermaLink", "false")]);
    xml.event(Event::Start(guid))?;
    xml.event(Event::Text(BytesText::new(&site.guid(id))))?;
    xml.close("guid")?;
    xml.newline()?;

    xml.text_line("description", "")?;
    xml.cdata_line("content:encoded", &entry.body)?;
    xml.cdata_line("excerpt:encoded", "")?;
    xml.text_line("wp:post_id", &id.to_string())?;
    xml.cdata_line("wp:post_date", &dates.post_date())?;
    xml.cdata_line("wp:post_date_gmt", &dates.post_date_gmt())?;
    xml.cdata_line("wp:comment_status", &post.comment_status)?;
    xml.cdata_line("wp:ping_status", &post.ping_status)?;
    xml.cdata_line("wp:post_name", &entry.slug)?;
    xml.cdata_line("wp:status", &post.status)?;
    xml.text_line("wp:post_parent", "0")?;
    xml.text_line("wp:menu_order", "0")?;
    xml.cdata_line("wp:post_type", &post.post_type)?;
    xml.cdata_line("wp:post_password", "")?;
    xml.text_line("wp:is_sticky", "0")?;

    if let Some(category) = &post.category {
        xml.category("category", &category.slug, &category.name)?;
    }
    for tag in &entry.tags {
        xml.category("post_tag", &tag.slug, &tag.name)?;
    }

    for (key, value) in &post.meta {
        xml.open_line("wp:postmeta")?;
        xml.cdata_line("wp:meta_key", key)?;
        xml.cdata_line("wp:meta_value", value)?;
        xml.close_line("wp:postmeta")?;
    }

    xml.close_line("item")
}

fn write_footer<W: Write>(xml: &mut WxrWriter<W>) -> Result<(), SheetPressError> {
    xml.close_line("channel")?;
    xml.close_line("rss")
}

/// `quick_xml::Writer`の薄いラッパー
///
/// `*_line`系のメソッドは要素の後に改行を1つ出力します。
struct WxrWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> WxrWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), SheetPressError> {
        self.writer.write_event(event)?;
        Ok(())
    }

    fn newline(&mut self) -> Result<(), SheetPressError> {
        self.event(Event::Text(BytesText::new("\n")))
    }

    fn open(&mut self, name: &str) -> Result<(), SheetPressError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result<(), SheetPressError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn open_line(&mut self, name: &str) -> Result<(), SheetPressError> {
        self.open(name)?;
        self.newline()
    }

    fn close_line(&mut self, name: &str) -> Result<(), SheetPressError> {
        self.close(name)?;
        self.newline()
    }

    /// `<name>text</name>`（テキストはエスケープされる）
    fn text(&mut self, name: &str, text: &str) -> Result<(), SheetPressError> {
        self.open(name)?;
        if !text.is_empty() {
            self.event(Event::Text(BytesText::new(text)))?;
        }
        self.close(name)
    }

    fn text_line(&mut self, name: &str, text: &str) -> Result<(), SheetPressError> {
        self.text(name, text)?;
        self.newline()
    }

    /// `<name><![CDATA[text]]></name>`
    fn cdata(&mut self, name: &str, text: &str) -> Result<(), SheetPressError> {
        self.open(name)?;
        for section in cdata_sections(text) {
            self.event(Event::CData(BytesCData::new(section)))?;
        }
        self.close(name)
    }

    fn cdata_line(&mut self, name: &str, text: &str) -> Result<(), SheetPressError> {
        self.cdata(name, text)?;
        self.newline()
    }

    /// `<category domain=".." nicename=".."><![CDATA[name]]></category>`
    fn category(&mut self, domain: &str, nicename: &str, name: &str) -> Result<(), SheetPressError> {
        let start = BytesStart::new("category")
            .with_attributes([("domain", domain), ("nicename", nicename)]);
        self.event(Event::Start(start))?;
        for section in cdata_sections(name) {
            self.event(Event::CData(BytesCData::new(section)))?;
        }
        self.close("category")?;
        self.newline()
    }
}

/// CDATAセクションの分割
///
/// `]]>`はCDATAセクションを終わらせてしまうため、`]]`と`>`の間でセクションを
/// 区切ります（`a]]>b` → `<![CDATA[a]]]]><![CDATA[>b]]>`）。
/// `]]>`を含まない場合は元の文字列1つだけを返します。
fn cdata_sections(text: &str) -> Vec<String> {
    let parts: Vec<&str> = text.split("]]>").collect();
    let last = parts.len() - 1;

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let mut section = String::with_capacity(part.len() + 3);
            if i > 0 {
                section.push('>');
            }
            section.push_str(part);
            if i < last {
                section.push_str("]]");
            }
            section
        })
        .collect()
}
