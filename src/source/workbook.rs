//! Workbook Source
//!
//! calamineを使用して、ローカルのスプレッドシート（xlsx / xls / ods）から
//! 行データを取得する行ソース。
//!
//! - 固定列（8列）は範囲内であれば空セルも空文字列として返す
//! - 作品ペアの列は、末尾の空ペアを切り詰め、役割の欠けたペアは空文字列で補う
//! - すべて空の行は返さない
//! - 数値などの値は表示用の文字列に変換する

use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use tracing::debug;

use super::RowSource;
use crate::error::SheetPressError;
use crate::row::FIXED_COLUMNS;
use crate::types::{CellCoord, Row, SheetRange};

#[derive(Debug, Clone)]
enum WorkbookInput {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// スプレッドシートの指定範囲を読み込む行ソース
///
/// ファイルは`fetch_rows()`のたびに開き直します。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetpress::{RowSource, WorkbookSource};
///
/// # fn main() -> Result<(), sheetpress::SheetPressError> {
/// let source = WorkbookSource::open("responses.xlsx", "Bios!A2:R35");
/// let rows = source.fetch_rows()?;
/// println!("{} rows", rows.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkbookSource {
    input: WorkbookInput,
    range: String,
}

impl WorkbookSource {
    /// ファイルパスから行ソースを生成する
    ///
    /// # 引数
    ///
    /// * `path` - スプレッドシートファイル
    /// * `range` - A1記法の範囲（例: `Bios!A2:R35`、`'Form Responses 1'!A2:Z`）
    pub fn open(path: impl AsRef<Path>, range: &str) -> Self {
        Self {
            input: WorkbookInput::Path(path.as_ref().to_path_buf()),
            range: range.to_string(),
        }
    }

    /// メモリ上のファイル内容から行ソースを生成する
    pub fn from_bytes(bytes: Vec<u8>, range: &str) -> Self {
        Self {
            input: WorkbookInput::Bytes(bytes),
            range: range.to_string(),
        }
    }
}

impl RowSource for WorkbookSource {
    fn fetch_rows(&self) -> Result<Vec<Row>, SheetPressError> {
        let range = SheetRange::parse(&self.range)?;

        match &self.input {
            WorkbookInput::Path(path) => {
                debug!(path = %path.display(), range = %self.range, "opening workbook");
                let mut workbook = open_workbook_auto(path)?;
                read_range(&mut workbook, &range)
            }
            WorkbookInput::Bytes(bytes) => {
                let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.clone()))?;
                read_range(&mut workbook, &range)
            }
        }
    }
}

/// ワークブックから範囲内の行を読み出す
fn read_range<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    range: &SheetRange,
) -> Result<Vec<Row>, SheetPressError> {
    if !workbook.sheet_names().iter().any(|name| name == &range.sheet) {
        return Err(SheetPressError::Source(format!(
            "Sheet '{}' not found",
            range.sheet
        )));
    }

    let data = workbook.worksheet_range(&range.sheet)?;

    // データが1セルもないシート
    let Some((last_row, last_col)) = data.end() else {
        return Ok(Vec::new());
    };
    let end_row = range.end_row.map_or(last_row, |row| row.min(last_row));
    let end_col = range.end_col.min(last_col);
    let width = (range.end_col - range.start.col) as usize + 1;

    let mut rows = Vec::new();
    for row_idx in range.start.row..=end_row {
        let row: Row = (range.start.col..=end_col)
            .map(|col| data.get_value((row_idx, col)).map(cell_text).unwrap_or_default())
            .collect();

        if row.iter().all(|cell| cell.is_empty()) {
            debug!(
                cell = %CellCoord::new(row_idx, range.start.col).to_a1_notation(),
                "skipping empty row"
            );
            continue;
        }
        rows.push(fit_row(row, width));
    }

    debug!(
        sheet = %range.sheet,
        from = %range.start.to_a1_notation(),
        rows = rows.len(),
        "read range"
    );

    Ok(rows)
}

/// 行を固定列と作品ペアの形に揃える
///
/// # 引数
///
/// * `row` - 範囲の先頭列から読み出したセル値
/// * `width` - 範囲の列数（これを超えて補うことはない）
fn fit_row(mut row: Row, width: usize) -> Row {
    while row.len() > FIXED_COLUMNS && row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }

    let mut len = row.len().max(FIXED_COLUMNS);
    if (len - FIXED_COLUMNS) % 2 == 1 {
        len += 1;
    }
    row.resize(len.min(width), String::new());
    row
}

/// セル値を表示用の文字列に変換する（空セルは空文字列）
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
