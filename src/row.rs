//! Row Module
//!
//! 位置ベースの行データを、名前付きフィールドを持つ構造体に変換するモジュール。
//!
//! | 列 | 内容 |
//! | --- | --- |
//! | 0 | メールアドレス |
//! | 1 | 別名（`, `区切り） |
//! | 2 | 表示名 |
//! | 3 | 代名詞 |
//! | 4 | プロフィール |
//! | 5 | （未使用） |
//! | 6 | ウェブサイト |
//! | 7 | 役割（作品に依らないもの） |
//! | 8〜 | (作品名, 役割) の繰り返し |

use crate::error::SheetPressError;

const COL_EMAIL: usize = 0;
const COL_ALIASES: usize = 1;
const COL_NAME: usize = 2;
const COL_PRONOUN: usize = 3;
const COL_BIO: usize = 4;
const COL_WEBSITE: usize = 6;
const COL_GENERIC_ROLE: usize = 7;

/// 固定列の数。9列目（インデックス8）以降は作品ペア
pub(crate) const FIXED_COLUMNS: usize = 8;

/// 作品名と、その作品での役割
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RolePair {
    /// 作品名（空の場合はリンク・タグとも出力しない）
    pub title: String,
    /// 役割（例: `Lighting Designer`）
    pub role: String,
}

/// 1行分の名前付きフィールド
///
/// 空のセルは空文字列として保持します（「空」と「列がない」は区別されます）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowFields {
    pub email: String,
    pub aliases: String,
    pub name: String,
    pub pronoun: String,
    pub bio: String,
    pub website: String,
    pub generic_role: String,
    pub pairs: Vec<RolePair>,
    /// 1始まりの行番号（エラーメッセージ用）
    pub row_number: usize,
}

impl RowFields {
    /// 行データからフィールドを抽出する
    ///
    /// # 引数
    ///
    /// * `row` - 1行分のセル値
    /// * `row_number` - 1始まりの行番号（エラーメッセージに使用）
    ///
    /// # 戻り値
    ///
    /// * `Ok(RowFields)` - 抽出に成功した場合
    /// * `Err(SheetPressError::ShortRow)` - 8列に満たない場合
    /// * `Err(SheetPressError::OddTrailingColumns)` - 9列目以降が奇数個の場合
    pub fn from_row(row: &[String], row_number: usize) -> Result<Self, SheetPressError> {
        if row.len() < FIXED_COLUMNS {
            return Err(SheetPressError::ShortRow {
                row: row_number,
                len: row.len(),
            });
        }

        let trailing = &row[FIXED_COLUMNS..];
        if trailing.len() % 2 != 0 {
            return Err(SheetPressError::OddTrailingColumns {
                row: row_number,
                len: trailing.len(),
            });
        }

        let pairs = trailing
            .chunks_exact(2)
            .map(|pair| RolePair {
                title: pair[0].clone(),
                role: pair[1].clone(),
            })
            .collect();

        Ok(Self {
            email: row[COL_EMAIL].clone(),
            aliases: row[COL_ALIASES].clone(),
            name: row[COL_NAME].clone(),
            pronoun: row[COL_PRONOUN].clone(),
            bio: row[COL_BIO].clone(),
            website: row[COL_WEBSITE].clone(),
            generic_role: row[COL_GENERIC_ROLE].clone(),
            pairs,
            row_number,
        })
    }

    /// 作品名が入力されている作品ペアのみを返す
    pub fn titled_pairs(&self) -> impl Iterator<Item = &RolePair> {
        self.pairs.iter().filter(|pair| !pair.title.is_empty())
    }

    /// 投稿スラッグ（メールアドレスの`@`より前の部分）
    ///
    /// # 戻り値
    ///
    /// * `Ok(&str)` - メールアドレスに`@`が含まれる場合
    /// * `Err(SheetPressError::InvalidEmail)` - `@`が含まれない場合
    pub fn slug(&self) -> Result<&str, SheetPressError> {
        self.email
            .split_once('@')
            .map(|(local, _)| local)
            .ok_or_else(|| SheetPressError::InvalidEmail {
                row: self.row_number,
                email: self.email.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_row_fixed_fields() {
        let fields = RowFields::from_row(
            &row(&[
                "jlin@example.com",
                "JL, Jojo",
                "Jo Lin",
                "she/her",
                "Loves theatre.",
                "ignored",
                "https://jolin.example",
                "Director",
            ]),
            1,
        )
        .unwrap();

        assert_eq!(fields.email, "jlin@example.com");
        assert_eq!(fields.aliases, "JL, Jojo");
        assert_eq!(fields.name, "Jo Lin");
        assert_eq!(fields.pronoun, "she/her");
        assert_eq!(fields.bio, "Loves theatre.");
        assert_eq!(fields.website, "https://jolin.example");
        assert_eq!(fields.generic_role, "Director");
        assert!(fields.pairs.is_empty());
    }

    #[test]
    fn test_from_row_blank_columns_are_empty_strings() {
        let fields =
            RowFields::from_row(&row(&["a@b.com", "", "Jo Lin", "", "", "", "", ""]), 1).unwrap();
        assert_eq!(fields.pronoun, "");
        assert_eq!(fields.bio, "");
        assert_eq!(fields.website, "");
        assert_eq!(fields.generic_role, "");
    }

    #[test]
    fn test_from_row_pairs() {
        let fields = RowFields::from_row(
            &row(&[
                "a@b.com", "", "Jo Lin", "", "", "", "", "",
                "Echoes", "Lighting Designer", "Waves", "Sound",
            ]),
            1,
        )
        .unwrap();

        assert_eq!(
            fields.pairs,
            vec![
                RolePair {
                    title: "Echoes".to_string(),
                    role: "Lighting Designer".to_string()
                },
                RolePair {
                    title: "Waves".to_string(),
                    role: "Sound".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_from_row_ten_fields_one_pair() {
        let fields = RowFields::from_row(
            &row(&["a@b.com", "", "Jo", "", "", "", "", "", "Echoes", "Actor"]),
            1,
        )
        .unwrap();
        assert_eq!(fields.titled_pairs().count(), 1);
    }

    #[test]
    fn test_titled_pairs_skips_blank_titles() {
        let fields = RowFields::from_row(
            &row(&[
                "a@b.com", "", "Jo", "", "", "", "", "",
                "", "Actor", "Waves", "Sound",
            ]),
            1,
        )
        .unwrap();
        let titles: Vec<&str> = fields.titled_pairs().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Waves"]);
    }

    #[test]
    fn test_from_row_short() {
        let result = RowFields::from_row(&row(&["a@b.com", "", "Jo"]), 4);
        match result {
            Err(SheetPressError::ShortRow { row, len }) => {
                assert_eq!(row, 4);
                assert_eq!(len, 3);
            }
            other => panic!("Expected ShortRow error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_row_odd_trailing() {
        let result = RowFields::from_row(
            &row(&["a@b.com", "", "Jo", "", "", "", "", "", "Echoes"]),
            2,
        );
        match result {
            Err(SheetPressError::OddTrailingColumns { row, len }) => {
                assert_eq!(row, 2);
                assert_eq!(len, 1);
            }
            other => panic!("Expected OddTrailingColumns error, got {:?}", other),
        }
    }

    #[test]
    fn test_slug() {
        let fields = RowFields::from_row(
            &row(&["jlin@example.com", "", "Jo", "", "", "", "", ""]),
            1,
        )
        .unwrap();
        assert_eq!(fields.slug().unwrap(), "jlin");
    }

    #[test]
    fn test_slug_without_at() {
        let fields =
            RowFields::from_row(&row(&["jlin", "", "Jo", "", "", "", "", ""]), 7).unwrap();
        match fields.slug() {
            Err(SheetPressError::InvalidEmail { row, email }) => {
                assert_eq!(row, 7);
                assert_eq!(email, "jlin");
            }
            other => panic!("Expected InvalidEmail error, got {:?}", other),
        }
    }
}
