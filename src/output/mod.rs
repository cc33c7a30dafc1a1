//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。
//!
//! エントリーへのIDの割り当て（`start_id`から1ずつ、入力順）はこのモジュールで行い、
//! 各フォーマッターはIDとエントリーの組を受け取って書き出すだけです。

mod json;
mod wxr;

use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};

use crate::api::OutputFormat;
use crate::builder::ExportConfig;
use crate::config::PostSettings;
use crate::error::SheetPressError;
use crate::types::Entry;

pub(crate) use json::JsonFormatter;
pub(crate) use wxr::WxrFormatter;

/// WordPressの日時カラムの書式
const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 出力フォーマッター（Strategy Pattern）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormatter {
    Wxr,
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Wxr => OutputFormatter::Wxr,
            OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// エントリー列を指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `entries` - 出力するエントリー（この順にIDを割り当てる）
    /// * `config` - エクスポート設定（`start_id`、サイト情報など）
    /// * `dates` - 検証済みの投稿日時
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(SheetPressError)` - エラーが発生した場合
    pub fn render<W: Write>(
        &self,
        entries: &[Entry],
        config: &ExportConfig,
        dates: &PostDates,
        writer: &mut W,
    ) -> Result<(), SheetPressError> {
        let numbered = number_entries(entries, config.start_id);

        match self {
            OutputFormatter::Wxr => WxrFormatter.render(&numbered, config, dates, writer),
            OutputFormatter::Json => JsonFormatter.render(&numbered, writer),
        }
    }
}

/// 入力順に`start_id`から連番を割り当てる
fn number_entries(entries: &[Entry], start_id: u64) -> Vec<(u64, &Entry)> {
    (start_id..).zip(entries).collect()
}

/// 投稿日時（設定のRFC 3339文字列を検証済みの値）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostDates {
    published: DateTime<FixedOffset>,
    channel_published: DateTime<FixedOffset>,
}

impl PostDates {
    /// `[post]`設定の日時文字列を解析する
    ///
    /// # 戻り値
    ///
    /// * `Ok(PostDates)` - 両方の日時が解析できた場合
    /// * `Err(SheetPressError::Config)` - RFC 3339形式でない場合
    pub fn parse(post: &PostSettings) -> Result<Self, SheetPressError> {
        Ok(Self {
            published: parse_timestamp("published_at", &post.published_at)?,
            channel_published: parse_timestamp(
                "channel_published_at",
                &post.channel_published_at,
            )?,
        })
    }

    /// 各投稿の`pubDate`（RFC 2822）
    pub fn pub_date(&self) -> String {
        self.published.to_rfc2822()
    }

    /// チャンネルの`pubDate`（RFC 2822）
    pub fn channel_pub_date(&self) -> String {
        self.channel_published.to_rfc2822()
    }

    /// `wp:post_date`（設定したオフセットでの現地時刻）
    pub fn post_date(&self) -> String {
        self.published.format(POST_DATE_FORMAT).to_string()
    }

    /// `wp:post_date_gmt`
    pub fn post_date_gmt(&self) -> String {
        self.published
            .with_timezone(&Utc)
            .format(POST_DATE_FORMAT)
            .to_string()
    }
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>, SheetPressError> {
    DateTime::parse_from_rfc3339(value).map_err(|e| {
        SheetPressError::Config(format!(
            "Invalid {} '{}' (expected RFC 3339, e.g. 2020-11-15T10:00:00-05:00): {}",
            field, value, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tag;

    fn entry(slug: &str) -> Entry {
        Entry {
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            body: String::new(),
            tags: vec![Tag::new("Echoes", "echoes")],
        }
    }

    #[test]
    fn test_from_format() {
        assert_eq!(OutputFormatter::from_format(OutputFormat::Wxr), OutputFormatter::Wxr);
        assert_eq!(OutputFormatter::from_format(OutputFormat::Json), OutputFormatter::Json);
    }

    #[test]
    fn test_number_entries_in_input_order() {
        let entries = vec![entry("b"), entry("a"), entry("c")];
        let numbered = number_entries(&entries, 250);
        let ids: Vec<(u64, &str)> = numbered.iter().map(|(id, e)| (*id, e.slug.as_str())).collect();
        assert_eq!(ids, vec![(250, "b"), (251, "a"), (252, "c")]);
    }

    #[test]
    fn test_post_dates_default() {
        let dates = PostDates::parse(&PostSettings::default()).unwrap();
        assert_eq!(dates.pub_date(), "Sun, 15 Nov 2020 10:00:00 -0500");
        assert_eq!(dates.channel_pub_date(), "Thu, 19 Nov 2020 10:00:00 +0000");
        assert_eq!(dates.post_date(), "2020-11-15 10:00:00");
        assert_eq!(dates.post_date_gmt(), "2020-11-15 15:00:00");
    }

    #[test]
    fn test_post_dates_invalid() {
        let post = PostSettings {
            published_at: "2020-11-15 10:00".to_string(),
            ..Default::default()
        };
        match PostDates::parse(&post) {
            Err(SheetPressError::Config(msg)) => assert!(msg.contains("published_at")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_json_dispatch() {
        let config = ExportConfig::default();
        let dates = PostDates::parse(&config.post).unwrap();
        let mut buffer = Vec::new();
        OutputFormatter::Json
            .render(&[entry("jlin")], &config, &dates, &mut buffer)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["id"], 250);
        assert_eq!(value[0]["slug"], "jlin");
    }
}
