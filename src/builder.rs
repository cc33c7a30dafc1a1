//! Builder Module
//!
//! Fluent Builder APIを提供し、`Exporter`インスタンスを段階的に構築する。

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::api::{AmpersandPolicy, NameStyle, OutputFormat, RowErrorPolicy, TagSchema, WriteMode};
use crate::config::{AuthorSettings, PostSettings, SiteSettings};
use crate::error::SheetPressError;
use crate::formatter::ContentFormatter;
use crate::output::{OutputFormatter, PostDates};
use crate::row::RowFields;
use crate::source::RowSource;
use crate::tags::collect_tags;
use crate::types::{Entry, Row};

/// エクスポート処理の設定を保持する内部構造体
///
/// 実行開始時に一度だけ組み立てられ、以降は読み取り専用で各処理に渡されます。
#[derive(Debug, Clone)]
pub(crate) struct ExportConfig {
    /// 最初のエントリーの投稿ID
    pub start_id: u64,

    /// 名前行のスタイル
    pub name_style: NameStyle,

    /// スラッグ生成時の`&`の扱い
    pub ampersand: AmpersandPolicy,

    /// タグの収集スキーマ
    pub tag_schema: TagSchema,

    /// 不正な行の扱い
    pub row_errors: RowErrorPolicy,

    /// 出力ファイルが既に存在する場合の動作
    pub write_mode: WriteMode,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// サイト情報
    pub site: SiteSettings,

    /// 投稿者（`None`の場合は`wp:author`を出力しない）
    pub author: Option<AuthorSettings>,

    /// 投稿の固定メタデータ
    pub post: PostSettings,

    /// メールアドレス → 画像ファイル名
    pub images: BTreeMap<String, String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            start_id: 250,
            name_style: NameStyle::default(),
            ampersand: AmpersandPolicy::default(),
            tag_schema: TagSchema::default(),
            row_errors: RowErrorPolicy::default(),
            write_mode: WriteMode::default(),
            output_format: OutputFormat::default(),
            site: SiteSettings::default(),
            author: None,
            post: PostSettings::default(),
            images: BTreeMap::new(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Exporter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetpress::{ExporterBuilder, NameStyle, RowErrorPolicy};
///
/// # fn main() -> Result<(), sheetpress::SheetPressError> {
/// let exporter = ExporterBuilder::new()
///     .with_start_id(201)
///     .with_name_style(NameStyle::Comma)
///     .with_row_error_policy(RowErrorPolicy::Skip)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExporterBuilder {
    /// 内部設定（構築中）
    config: ExportConfig,
}

impl Default for ExporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExporterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 開始ID: 250
    /// - 名前行: `<b>Name (pronoun)</b>`
    /// - `&`: `and`に置換
    /// - タグ: 作品 + 別名
    /// - 不正な行: 実行を失敗させる
    /// - 出力: WXR、既存ファイルは上書き
    pub fn new() -> Self {
        Self {
            config: ExportConfig::default(),
        }
    }

    /// 最初のエントリーの投稿IDを指定する
    ///
    /// 以降のエントリーには入力順に1ずつ増えるIDが割り当てられます。
    pub fn with_start_id(mut self, start_id: u64) -> Self {
        self.config.start_id = start_id;
        self
    }

    /// 名前行のスタイルを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetpress::{ExporterBuilder, NameStyle};
    ///
    /// // <b>Jo Lin, she/her</b>
    /// let builder = ExporterBuilder::new().with_name_style(NameStyle::Comma);
    /// ```
    pub fn with_name_style(mut self, style: NameStyle) -> Self {
        self.config.name_style = style;
        self
    }

    /// スラッグ生成時の`&`の扱いを指定する
    pub fn with_ampersand_policy(mut self, policy: AmpersandPolicy) -> Self {
        self.config.ampersand = policy;
        self
    }

    /// タグの収集スキーマを指定する
    pub fn with_tag_schema(mut self, schema: TagSchema) -> Self {
        self.config.tag_schema = schema;
        self
    }

    /// 不正な行の扱いを指定する
    pub fn with_row_error_policy(mut self, policy: RowErrorPolicy) -> Self {
        self.config.row_errors = policy;
        self
    }

    /// 出力ファイルが既に存在する場合の動作を指定する
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// サイト情報をまとめて指定する
    pub fn with_site(mut self, site: SiteSettings) -> Self {
        self.config.site = site;
        self
    }

    /// ブログのURLのみを変更する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetpress::ExporterBuilder;
    ///
    /// let builder = ExporterBuilder::new().with_site_url("https://example.org/festival");
    /// ```
    pub fn with_site_url(mut self, url: &str) -> Self {
        self.config.site.url = url.to_string();
        self
    }

    /// 投稿者（`wp:author`）を指定する
    pub fn with_author(mut self, author: AuthorSettings) -> Self {
        self.config.author = Some(author);
        self
    }

    /// 投稿の固定メタデータを指定する
    pub fn with_post_settings(mut self, post: PostSettings) -> Self {
        self.config.post = post;
        self
    }

    /// 画像を1件登録する
    ///
    /// # 引数
    ///
    /// * `email` - 参加者のメールアドレス（1列目と完全一致）
    /// * `image` - アップロード済みの画像ファイル名
    pub fn with_image(mut self, email: impl Into<String>, image: impl Into<String>) -> Self {
        self.config.images.insert(email.into(), image.into());
        self
    }

    /// 画像マップを置き換える
    pub fn with_images(mut self, images: BTreeMap<String, String>) -> Self {
        self.config.images = images;
        self
    }

    /// 設定を検証し、`Exporter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Exporter)` - 設定が有効な場合
    /// * `Err(SheetPressError::Config)` - URLが空、または日時がRFC 3339形式でない場合
    pub fn build(self) -> Result<Exporter, SheetPressError> {
        // 1. URLの検証
        if self.config.site.url.trim().is_empty() {
            return Err(SheetPressError::Config("Site URL must not be empty".to_string()));
        }

        // 2. 日時の検証
        let dates = PostDates::parse(&self.config.post)?;

        Ok(Exporter::new(self.config, dates))
    }
}

/// エクスポートの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// 出力したエントリー数
    pub entries: usize,
    /// `RowErrorPolicy::Skip`でスキップした行数
    pub skipped: usize,
    /// 最初のエントリーの投稿ID（エントリーがない場合は`None`）
    pub first_id: Option<u64>,
    /// 出力ファイルを書き込んだか（行ソースが空の場合は`false`）
    pub written: bool,
}

/// 行データをWordPressの投稿エントリーに変換し、文書として書き出す構造体
///
/// `ExporterBuilder::build()`で生成します。
#[derive(Debug)]
pub struct Exporter {
    /// 検証済みの設定
    config: ExportConfig,

    /// 検証済みの投稿日時
    dates: PostDates,

    /// 投稿本文フォーマッター
    formatter: ContentFormatter,
}

impl Exporter {
    pub(crate) fn new(config: ExportConfig, dates: PostDates) -> Self {
        Self {
            config,
            dates,
            formatter: ContentFormatter::new(),
        }
    }

    /// 1行分のエントリーを組み立てる
    ///
    /// # 引数
    ///
    /// * `row` - 1行分のセル値
    /// * `row_number` - 1始まりの行番号（エラーメッセージに使用）
    pub fn build_entry(&self, row: &[String], row_number: usize) -> Result<Entry, SheetPressError> {
        let fields = RowFields::from_row(row, row_number)?;
        let slug = fields.slug()?.to_string();

        Ok(Entry {
            title: fields.name.clone(),
            body: self.formatter.format_body(&fields, &self.config),
            tags: collect_tags(&fields, self.config.tag_schema, self.config.ampersand),
            slug,
        })
    }

    /// すべての行のエントリーを組み立てる
    ///
    /// 不正な行は`RowErrorPolicy`に従って扱います。スキップされた行にはIDが
    /// 割り当てられないため、出力のIDは連番のままです。
    ///
    /// # 戻り値
    ///
    /// * `Ok((entries, skipped))` - エントリーとスキップした行数
    /// * `Err(SheetPressError)` - `RowErrorPolicy::Fail`で不正な行があった場合
    pub fn build_entries(&self, rows: &[Row]) -> Result<(Vec<Entry>, usize), SheetPressError> {
        let mut entries = Vec::with_capacity(rows.len());
        let mut skipped = 0;

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;
            match self.build_entry(row, row_number) {
                Ok(entry) => {
                    debug!(row = row_number, slug = %entry.slug, tags = entry.tags.len(), "built entry");
                    entries.push(entry);
                }
                Err(err) if err.is_row_error() && self.config.row_errors == RowErrorPolicy::Skip => {
                    warn!(row = row_number, reason = %err, "skipping row");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        Ok((entries, skipped))
    }

    /// エントリーを文書として書き出す
    ///
    /// IDは`start_id`から入力順に割り当てます。
    pub fn write_document<W: Write>(
        &self,
        entries: &[Entry],
        mut writer: W,
    ) -> Result<(), SheetPressError> {
        let formatter = OutputFormatter::from_format(self.config.output_format);
        formatter.render(entries, &self.config, &self.dates, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// 行データを変換して書き出す
    ///
    /// 行が空の場合も、ヘッダーとフッターだけの文書を書き出します。
    pub fn export_rows<W: Write>(
        &self,
        rows: &[Row],
        writer: W,
    ) -> Result<ExportSummary, SheetPressError> {
        let (entries, skipped) = self.build_entries(rows)?;
        self.write_document(&entries, writer)?;
        Ok(self.summary(&entries, skipped, true))
    }

    /// 行データを変換して文字列として返す
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetpress::ExporterBuilder;
    ///
    /// # fn main() -> Result<(), sheetpress::SheetPressError> {
    /// let exporter = ExporterBuilder::new().build()?;
    /// let row: Vec<String> = ["jlin@example.com", "", "Jo Lin", "", "Bio.", "", "", "Director"]
    ///     .iter()
    ///     .map(|s| s.to_string())
    ///     .collect();
    ///
    /// let xml = exporter.export_to_string(&[row])?;
    /// assert!(xml.contains("<wp:post_name><![CDATA[jlin]]></wp:post_name>"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn export_to_string(&self, rows: &[Row]) -> Result<String, SheetPressError> {
        let mut buffer = Vec::new();
        self.export_rows(rows, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            SheetPressError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// 行ソースから行を取得し、出力ファイルに書き出す
    ///
    /// 1. 行ソースから全行を取得（空の場合はファイルを作らずに終了）
    /// 2. 全エントリーを組み立てる（ファイルを開く前に行の不正を検出する）
    /// 3. `WriteMode`に従ってファイルを開き、文書を書き出す
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExportSummary)` - 成功した場合（行ソースが空の場合を含む）
    /// * `Err(SheetPressError::OutputExists)` - `WriteMode::FailIfExists`でファイルが存在する場合
    /// * `Err(SheetPressError)` - その他のエラー
    pub fn run<S: RowSource + ?Sized>(
        &self,
        source: &S,
        path: &Path,
    ) -> Result<ExportSummary, SheetPressError> {
        let rows = source.fetch_rows()?;
        if rows.is_empty() {
            info!("No data found");
            return Ok(self.summary(&[], 0, false));
        }
        info!(rows = rows.len(), "fetched rows");

        let (entries, skipped) = self.build_entries(&rows)?;

        let file = self.open_output(path)?;
        self.write_document(&entries, BufWriter::new(file))?;

        let summary = self.summary(&entries, skipped, true);
        info!(
            path = %path.display(),
            entries = summary.entries,
            skipped = summary.skipped,
            "wrote document"
        );
        Ok(summary)
    }

    /// `WriteMode`に従って出力ファイルを開く（親ディレクトリは必要に応じて作成）
    fn open_output(&self, path: &Path) -> Result<File, SheetPressError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = match self.config.write_mode {
            WriteMode::Truncate => File::create(path)?,
            WriteMode::FailIfExists => OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => SheetPressError::OutputExists(path.to_path_buf()),
                    _ => SheetPressError::Io(e),
                })?,
            WriteMode::Append => {
                if path.exists() {
                    warn!(path = %path.display(), "appending to an existing document");
                }
                OpenOptions::new().append(true).create(true).open(path)?
            }
        };

        Ok(file)
    }

    fn summary(&self, entries: &[Entry], skipped: usize, written: bool) -> ExportSummary {
        ExportSummary {
            entries: entries.len(),
            skipped,
            first_id: (!entries.is_empty()).then_some(self.config.start_id),
            written,
        }
    }
}
