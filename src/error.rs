//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// sheetpressクレート全体で使用するエラー型
///
/// 行データの取得、エントリーの組み立て、WXR文書の書き出し中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io` / `Parse` / `Xml` / `Json` / `ConfigFile`: 下位ライブラリ由来のエラー
/// - `Config`: ビルダー設定の検証に失敗したエラー
/// - `Source`: 行ソース（シート名、セル範囲など）のエラー
/// - `ShortRow` / `OddTrailingColumns` / `InvalidEmail`: 行データの不正
/// - `OutputExists`: 出力ファイルが既に存在する（`WriteMode::FailIfExists`）
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetpress::SheetPressError;
/// use std::fs::File;
///
/// fn open_export(path: &str) -> Result<(), SheetPressError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum SheetPressError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの読み込み中に発生したエラー（calamine由来）
    #[error("Failed to read spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// XML書き出し中に発生したエラー（quick-xml由来）
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSONプレビューの書き出しエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定ファイル（TOML）の解析エラー
    #[error("Failed to parse config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExporterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、URLが空の場合などです。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use sheetpress::{ExporterBuilder, SheetPressError};
    ///
    /// let result = ExporterBuilder::new()
    ///     .with_site_url("")
    ///     .build();
    ///
    /// match result {
    ///     Err(SheetPressError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 行ソースのエラー
    ///
    /// シートが見つからない、セル範囲の書式が不正、などの場合に発生します。
    #[error("Row source error: {0}")]
    Source(String),

    /// 固定列（8列）に満たない行
    #[error("Row {row} has {len} fields, at least 8 are required")]
    ShortRow {
        /// 1始まりの行番号（データ内の位置）
        row: usize,
        /// 実際のフィールド数
        len: usize,
    },

    /// 9列目以降が(作品名, 役割)のペアになっていない行
    #[error("Row {row} has an odd number of project/role columns ({len} after the fixed fields)")]
    OddTrailingColumns {
        /// 1始まりの行番号
        row: usize,
        /// 9列目以降のフィールド数
        len: usize,
    },

    /// `@`を含まないメールアドレス（スラッグを導出できない）
    #[error("Row {row} has an email without '@': '{email}'")]
    InvalidEmail {
        /// 1始まりの行番号
        row: usize,
        /// 問題のメールアドレス
        email: String,
    },

    /// 出力先ファイルが既に存在する
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
}

impl SheetPressError {
    /// 行データ起因のエラーかどうか
    ///
    /// `RowErrorPolicy::Skip`の場合、このエラーの行のみスキップされます。
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            SheetPressError::ShortRow { .. }
                | SheetPressError::OddTrailingColumns { .. }
                | SheetPressError::InvalidEmail { .. }
        )
    }
}
