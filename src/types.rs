//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::Serialize;

use crate::error::SheetPressError;

/// 1行分のセル値（左から順に、空セルは空文字列）
pub type Row = Vec<String>;

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }

    /// A1形式のセル参照を解析する
    ///
    /// 列のみ（例: `"R"`）の参照も受け付け、その場合の行は`None`になります。
    /// `$`による絶対参照記号は無視します。
    ///
    /// # 戻り値
    ///
    /// * `Some((col, Option<row>))` - 解析に成功した場合
    /// * `None` - 書式が不正な場合
    fn parse_a1(reference: &str) -> Option<(u32, Option<u32>)> {
        let reference = reference.replace('$', "");
        let split = reference
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(reference.len());
        let (letters, digits) = reference.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        // "A" = 1, "Z" = 26, "AA" = 27 として計算し、最後に0始まりへ
        let mut col: u32 = 0;
        for c in letters.chars() {
            let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
        }

        let row = if digits.is_empty() {
            None
        } else {
            let row: u32 = digits.parse().ok()?;
            if row == 0 {
                return None;
            }
            Some(row - 1)
        };

        Some((col - 1, row))
    }
}

/// シート名付きのセル範囲（例: `Bios!A2:R35`）
///
/// Google Sheets APIと同じA1記法で、取得対象のシートと範囲を指定します。
/// 終了行を省略した場合（例: `Bios!A2:R`）、データの最終行までを対象とします。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetRange {
    /// シート名
    pub sheet: String,
    /// 開始セル
    pub start: CellCoord,
    /// 終了列（0始まり、この列を含む）
    pub end_col: u32,
    /// 終了行（0始まり、この行を含む）。`None`の場合はデータの最終行まで
    pub end_row: Option<u32>,
}

impl SheetRange {
    /// A1記法の範囲文字列を解析する
    ///
    /// # 引数
    ///
    /// * `range` - `Sheet!A2:R35`形式の文字列。シート名は`'My Sheet'!A1:B2`のように
    ///   シングルクォートで囲むこともできます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetRange)` - 解析に成功した場合
    /// * `Err(SheetPressError::Source)` - 書式が不正な場合
    pub fn parse(range: &str) -> Result<Self, SheetPressError> {
        let invalid = |reason: &str| {
            SheetPressError::Source(format!("Invalid range '{}': {}", range, reason))
        };

        let (sheet, cells) = range
            .rsplit_once('!')
            .ok_or_else(|| invalid("expected 'Sheet!A1:B2'"))?;

        let sheet = sheet
            .strip_prefix('\'')
            .and_then(|s| s.strip_suffix('\''))
            .map(|s| s.replace("''", "'"))
            .unwrap_or_else(|| sheet.to_string());
        if sheet.is_empty() {
            return Err(invalid("sheet name is empty"));
        }

        let (start, end) = cells
            .split_once(':')
            .ok_or_else(|| invalid("expected a start and an end cell"))?;

        let (start_col, start_row) =
            CellCoord::parse_a1(start).ok_or_else(|| invalid("bad start cell"))?;
        let (end_col, end_row) =
            CellCoord::parse_a1(end).ok_or_else(|| invalid("bad end cell"))?;
        let start_row = start_row.unwrap_or(0);

        if start_col > end_col {
            return Err(invalid("start column is after end column"));
        }
        if let Some(end_row) = end_row {
            if start_row > end_row {
                return Err(invalid("start row is after end row"));
            }
        }

        Ok(Self {
            sheet,
            start: CellCoord::new(start_row, start_col),
            end_col,
            end_row,
        })
    }
}

/// タクソノミー（WordPressの`post_tag`）1件
///
/// 作品名または別名と、そのスラッグの組です。エントリー間で重複排除はしません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    /// 表示名
    pub name: String,
    /// スラッグ（nicename）
    pub slug: String,
}

impl Tag {
    /// 新しいタグを生成
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// 参加者1人分の投稿エントリー
///
/// 行データから一度だけ組み立てられ、文書の書き出しで一度だけ消費されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// 投稿タイトル（表示名）
    pub title: String,
    /// 投稿スラッグ（メールアドレスの`@`より前）
    pub slug: String,
    /// 投稿本文（HTML断片）
    pub body: String,
    /// 付与するタグ
    pub tags: Vec<Tag>,
}
