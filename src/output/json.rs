//! JSON Formatter
//!
//! インポート前の確認用に、エントリーをIDつきのJSON配列として出力する。

use std::io::Write;

use serde::Serialize;

use crate::error::SheetPressError;
use crate::types::Entry;

/// JSON配列の要素（エントリーのフィールドを平坦化してIDを先頭に付ける）
#[derive(Serialize)]
struct JsonEntry<'a> {
    id: u64,
    #[serde(flatten)]
    entry: &'a Entry,
}

/// JSON形式のフォーマッター
#[derive(Debug, Clone, Copy)]
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        entries: &[(u64, &Entry)],
        writer: &mut W,
    ) -> Result<(), SheetPressError> {
        let items: Vec<JsonEntry<'_>> = entries
            .iter()
            .map(|&(id, entry)| JsonEntry { id, entry })
            .collect();

        serde_json::to_writer_pretty(&mut *writer, &items)?;
        writeln!(writer)?;

        Ok(())
    }
}
