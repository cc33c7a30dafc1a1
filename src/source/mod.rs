//! Row Source Module
//!
//! エントリーの元になる行データの取得元を抽象化するモジュール。
//!
//! 行ソースは「行の一覧を返すか、失敗する」だけの処理です。認証やリトライは
//! 行ソースの実装側の責務で、エクスポート処理からは見えません。

mod workbook;

use crate::error::SheetPressError;
use crate::types::Row;

pub use workbook::WorkbookSource;

/// 行データの取得元
///
/// `Fn() -> Result<Vec<Row>, SheetPressError>`を満たすクロージャも行ソースとして使えます。
///
/// # 使用例
///
/// ```rust
/// use sheetpress::{Row, RowSource, SheetPressError};
///
/// let source = || -> Result<Vec<Row>, SheetPressError> { Ok(Vec::new()) };
/// assert!(source.fetch_rows().unwrap().is_empty());
/// ```
pub trait RowSource {
    /// 全行を取得する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<Row>)` - 取得した行（0行の場合を含む）
    /// * `Err(SheetPressError)` - 取得に失敗した場合
    fn fetch_rows(&self) -> Result<Vec<Row>, SheetPressError>;
}

impl<F> RowSource for F
where
    F: Fn() -> Result<Vec<Row>, SheetPressError>,
{
    fn fetch_rows(&self) -> Result<Vec<Row>, SheetPressError> {
        self()
    }
}

/// メモリ上の行データをそのまま返す行ソース
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecSource {
    rows: Vec<Row>,
}

impl VecSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl From<Vec<Row>> for VecSource {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl RowSource for VecSource {
    fn fetch_rows(&self) -> Result<Vec<Row>, SheetPressError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source() {
        let rows = vec![vec!["a@b.com".to_string()]];
        let source = VecSource::from(rows.clone());
        assert_eq!(source.fetch_rows().unwrap(), rows);
        // 何度呼んでも同じ行を返す
        assert_eq!(source.fetch_rows().unwrap(), rows);
    }

    #[test]
    fn test_closure_source_error() {
        let source = || -> Result<Vec<Row>, SheetPressError> {
            Err(SheetPressError::Source("unavailable".to_string()))
        };
        assert!(matches!(
            source.fetch_rows(),
            Err(SheetPressError::Source(ref msg)) if msg == "unavailable"
        ));
    }

    #[test]
    fn test_trait_object() {
        let sources: Vec<Box<dyn RowSource>> = vec![
            Box::new(VecSource::default()),
            Box::new(|| -> Result<Vec<Row>, SheetPressError> { Ok(vec![Vec::new()]) }),
        ];
        let counts: Vec<usize> = sources
            .iter()
            .map(|s| s.fetch_rows().unwrap().len())
            .collect();
        assert_eq!(counts, vec![0, 1]);
    }
}
