//! Configuration Module
//!
//! 実行設定（TOMLファイル）の読み込みを提供するモジュール。
//!
//! すべての項目にデフォルト値があり、設定ファイルでは変更したい項目だけを
//! 書けば十分です。CLIフラグは設定ファイルの値を、設定ファイルの値はデフォルトを
//! 上書きします。
//!
//! ```toml
//! [source]
//! path = "responses.xlsx"
//! range = "Bios!A2:R35"
//!
//! [output]
//! path = "output/bio_posts.xml"
//! write_mode = "truncate"
//!
//! [entries]
//! start_id = 250
//! name_style = "parenthesized"
//!
//! [images]
//! "jlin@example.com" = "jlin.jpg"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{AmpersandPolicy, NameStyle, OutputFormat, RowErrorPolicy, TagSchema, WriteMode};
use crate::builder::ExporterBuilder;
use crate::error::SheetPressError;
use crate::source::WorkbookSource;

/// 設定ファイル全体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// `[source]` 行データの取得元
    #[serde(default)]
    pub source: SourceSettings,

    /// `[output]` 出力先
    #[serde(default)]
    pub output: OutputSettings,

    /// `[entries]` エントリーの組み立て
    #[serde(default)]
    pub entries: EntrySettings,

    /// `[site]` サイト情報
    #[serde(default)]
    pub site: SiteSettings,

    /// `[author]` 投稿者（省略時は`wp:author`を出力しない）
    #[serde(default)]
    pub author: Option<AuthorSettings>,

    /// `[post]` 投稿の固定メタデータ
    #[serde(default)]
    pub post: PostSettings,

    /// `[images]` メールアドレス → アップロード済み画像ファイル名
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

impl FileConfig {
    /// 設定ファイルを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(FileConfig)` - 読み込みに成功した場合
    /// * `Err(SheetPressError::Io)` - ファイルを読めない場合
    /// * `Err(SheetPressError::ConfigFile)` - TOMLとして不正な場合
    pub fn load(path: &Path) -> Result<Self, SheetPressError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// TOML文字列から設定を読み込む
    pub fn from_toml(content: &str) -> Result<Self, SheetPressError> {
        Ok(toml::from_str(content)?)
    }

    /// 設定ファイルの値を反映したビルダーを生成する
    pub fn to_builder(&self) -> ExporterBuilder {
        let mut builder = ExporterBuilder::new()
            .with_start_id(self.entries.start_id)
            .with_name_style(self.entries.name_style)
            .with_ampersand_policy(self.entries.ampersand)
            .with_tag_schema(self.entries.tag_schema)
            .with_row_error_policy(self.entries.row_errors)
            .with_write_mode(self.output.write_mode)
            .with_output_format(self.output.format)
            .with_site(self.site.clone())
            .with_post_settings(self.post.clone())
            .with_images(self.images.clone());

        if let Some(author) = &self.author {
            builder = builder.with_author(author.clone());
        }

        builder
    }

    /// `[source]`に対応する行ソースを生成する
    pub fn workbook_source(&self) -> WorkbookSource {
        WorkbookSource::open(&self.source.path, &self.source.range)
    }
}

/// `[source]` セクション
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// スプレッドシートファイル（xlsx / xls / ods）
    #[serde(default = "default_source_path")]
    pub path: PathBuf,

    /// A1記法の取得範囲（例: `Bios!A2:R35`）
    #[serde(default = "default_range")]
    pub range: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            range: default_range(),
        }
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from("responses.xlsx")
}
fn default_range() -> String {
    "Bios!A2:R35".into()
}

/// `[output]` セクション
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// 出力ファイル
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// 既存ファイルの扱い
    #[serde(default)]
    pub write_mode: WriteMode,

    /// 出力フォーマット
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            write_mode: WriteMode::default(),
            format: OutputFormat::default(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output/bio_posts.xml")
}

/// `[entries]` セクション
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySettings {
    /// 最初のエントリーの投稿ID（以降1ずつ増加）
    #[serde(default = "default_start_id")]
    pub start_id: u64,

    #[serde(default)]
    pub name_style: NameStyle,

    #[serde(default)]
    pub ampersand: AmpersandPolicy,

    #[serde(default)]
    pub tag_schema: TagSchema,

    #[serde(default)]
    pub row_errors: RowErrorPolicy,
}

impl Default for EntrySettings {
    fn default() -> Self {
        Self {
            start_id: default_start_id(),
            name_style: NameStyle::default(),
            ampersand: AmpersandPolicy::default(),
            tag_schema: TagSchema::default(),
            row_errors: RowErrorPolicy::default(),
        }
    }
}

fn default_start_id() -> u64 {
    250
}

/// `[site]` セクション
///
/// チャンネルヘッダーと、投稿・作品ページ・画像のURL組み立てに使用します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// ブログのURL（末尾の`/`なし）
    #[serde(default = "default_site_url")]
    pub url: String,

    #[serde(default = "default_site_title")]
    pub title: String,

    #[serde(default = "default_site_description")]
    pub description: String,

    #[serde(default = "default_language")]
    pub language: String,

    /// マルチサイトのベースURL（`wp:base_site_url`）
    #[serde(default = "default_base_site_url")]
    pub base_site_url: String,

    /// 投稿のパーマリンクに使うパス（`{url}/{post_path}/{slug}/`）
    #[serde(default = "default_post_path")]
    pub post_path: String,

    /// 作品ページのパス（`{url}/{projects_path}/{slug}/`）
    #[serde(default = "default_projects_path")]
    pub projects_path: String,

    /// 画像ファイル名の前に付けるURL
    #[serde(default = "default_uploads_url")]
    pub uploads_url: String,

    #[serde(default = "default_generator")]
    pub generator: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: default_site_url(),
            title: default_site_title(),
            description: default_site_description(),
            language: default_language(),
            base_site_url: default_base_site_url(),
            post_path: default_post_path(),
            projects_path: default_projects_path(),
            uploads_url: default_uploads_url(),
            generator: default_generator(),
        }
    }
}

impl SiteSettings {
    fn base(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// 投稿のパーマリンク
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/{}/{}/", self.base(), self.post_path, slug)
    }

    /// 作品ページのURL
    pub fn project_url(&self, slug: &str) -> String {
        format!("{}/{}/{}/", self.base(), self.projects_path, slug)
    }

    /// 投稿IDから作るGUID（`{url}/?p={id}`）
    pub fn guid(&self, id: u64) -> String {
        format!("{}/?p={}", self.base(), id)
    }
}

fn default_site_url() -> String {
    "https://sophia.smith.edu/theamplifier".into()
}
fn default_site_title() -> String {
    "The Amplifier Project".into()
}
fn default_site_description() -> String {
    "Presented by the Smith College Department of Theatre".into()
}
fn default_language() -> String {
    "en-US".into()
}
fn default_base_site_url() -> String {
    "http://sophia.smith.edu/".into()
}
fn default_post_path() -> String {
    "contributors".into()
}
fn default_projects_path() -> String {
    "projects".into()
}
fn default_uploads_url() -> String {
    "https://sophia.smith.edu/theamplifier/wp-content/uploads/sites/605/2020/11/".into()
}
fn default_generator() -> String {
    "https://wordpress.org/?v=5.2.2".into()
}

/// `[author]` セクション（`wp:author`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSettings {
    pub id: u64,
    pub login: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// 投稿に付けるカテゴリ（`domain="category"`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    pub name: String,
    pub slug: String,
}

/// `[post]` セクション
///
/// すべての投稿に共通の固定値です。日時はRFC 3339形式の文字列で指定し、
/// `ExporterBuilder::build()`時に検証されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSettings {
    /// `dc:creator`（投稿者のログイン名）
    #[serde(default = "default_creator")]
    pub creator: String,

    /// 投稿日時（例: `2020-11-15T10:00:00-05:00`）
    #[serde(default = "default_published_at")]
    pub published_at: String,

    /// チャンネルの`pubDate`
    #[serde(default = "default_channel_published_at")]
    pub channel_published_at: String,

    #[serde(default = "default_closed")]
    pub comment_status: String,

    #[serde(default = "default_open")]
    pub ping_status: String,

    #[serde(default = "default_status")]
    pub status: String,

    #[serde(default = "default_post_type")]
    pub post_type: String,

    /// すべての投稿に付けるカテゴリ。`None`の場合はタグのみ
    #[serde(default = "default_category")]
    pub category: Option<CategorySettings>,

    /// `wp:postmeta`（キー順に出力）
    #[serde(default = "default_meta")]
    pub meta: BTreeMap<String, String>,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            creator: default_creator(),
            published_at: default_published_at(),
            channel_published_at: default_channel_published_at(),
            comment_status: default_closed(),
            ping_status: default_open(),
            status: default_status(),
            post_type: default_post_type(),
            category: default_category(),
            meta: default_meta(),
        }
    }
}

fn default_creator() -> String {
    "admin".into()
}
fn default_published_at() -> String {
    "2020-11-15T10:00:00-05:00".into()
}
fn default_channel_published_at() -> String {
    "2020-11-19T10:00:00+00:00".into()
}
fn default_closed() -> String {
    "closed".into()
}
fn default_open() -> String {
    "open".into()
}
fn default_status() -> String {
    "publish".into()
}
fn default_post_type() -> String {
    "post".into()
}
fn default_category() -> Option<CategorySettings> {
    Some(CategorySettings {
        name: "Contributors".into(),
        slug: "contributors".into(),
    })
}
fn default_meta() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("_edit_last".to_string(), "3977".to_string()),
        ("_wp_page_template".to_string(), "default".to_string()),
    ])
}
