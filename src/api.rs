//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。
//! すべて`serde`でTOML設定ファイルから読み込めます（値はkebab-case）。

use serde::{Deserialize, Serialize};

/// スラッグ生成時の`&`の扱い
///
/// 作品名などからスラッグ（nicename）を生成する際に、`&`をどう扱うかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum AmpersandPolicy {
    /// `&`を`and`に置換する（デフォルト）
    ///
    /// 例: `Rain & Shine` → `rain-and-shine`
    #[default]
    Expand,

    /// `&`を他の記号と同様に削除する
    ///
    /// 例: `Rain & Shine` → `rain--shine`
    Drop,
}

/// 名前行のスタイル
///
/// 代名詞（pronoun）が入力されている場合の名前行の書式を指定します。
/// 代名詞が空の場合は、どちらのスタイルでも `<b>{name}</b>` になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum NameStyle {
    /// `<b>Jo Lin (she/her)</b>`（デフォルト）
    #[default]
    Parenthesized,

    /// `<b>Jo Lin, she/her</b>`
    Comma,
}

/// タグの収集スキーマ
///
/// 各エントリーに付与する`post_tag`カテゴリの収集方法を指定します。
/// 2つのスキーマが自動的に統合されることはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum TagSchema {
    /// 作品列（9列目以降のタイトル）のみ
    Projects,

    /// 作品タグの後に、別名列（2列目）の別名タグを続ける（デフォルト）
    #[default]
    ProjectsAndAliases,
}

/// 出力ファイルが既に存在する場合の動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum WriteMode {
    /// 既存の内容を破棄して書き直す（デフォルト）
    #[default]
    Truncate,

    /// 既存ファイルがあればエラー（`SheetPressError::OutputExists`）
    FailIfExists,

    /// 既存の内容の後ろに追記する
    ///
    /// 既存の文書がある場合、ヘッダーが重複した不正なXMLになります。
    /// 旧スクリプトとの互換のためだけに残しています。
    Append,
}

/// 不正な行（列不足、奇数個の作品列、`@`のないメールアドレス）の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum RowErrorPolicy {
    /// 実行全体を失敗させる（デフォルト）
    #[default]
    Fail,

    /// 警告ログを出して行をスキップする
    ///
    /// スキップされた行にはIDが割り当てられないため、IDは連番のままです。
    Skip,
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum OutputFormat {
    /// WordPress eXtended RSS（デフォルト）
    ///
    /// WordPressの「ツール → インポート」でそのまま読み込める形式です。
    #[default]
    Wxr,

    /// エントリーのJSON配列
    ///
    /// インポート前の確認用です。
    ///
    /// ```json
    /// [
    ///   {
    ///     "id": 250,
    ///     "title": "Jo Lin",
    ///     "slug": "jlin",
    ///     "body": "<b>Jo Lin</b>\n\n...",
    ///     "tags": [{"name": "Echoes", "slug": "echoes"}]
    ///   }
    /// ]
    /// ```
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        ampersand: AmpersandPolicy,
        name_style: NameStyle,
        tag_schema: TagSchema,
        write_mode: WriteMode,
        row_errors: RowErrorPolicy,
        format: OutputFormat,
    }

    #[test]
    fn test_kebab_case_values() {
        let holder: Holder = toml::from_str(
            r#"
            ampersand = "drop"
            name_style = "comma"
            tag_schema = "projects"
            write_mode = "fail-if-exists"
            row_errors = "skip"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(holder.ampersand, AmpersandPolicy::Drop);
        assert_eq!(holder.name_style, NameStyle::Comma);
        assert_eq!(holder.tag_schema, TagSchema::Projects);
        assert_eq!(holder.write_mode, WriteMode::FailIfExists);
        assert_eq!(holder.row_errors, RowErrorPolicy::Skip);
        assert_eq!(holder.format, OutputFormat::Json);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(AmpersandPolicy::default(), AmpersandPolicy::Expand);
        assert_eq!(NameStyle::default(), NameStyle::Parenthesized);
        assert_eq!(TagSchema::default(), TagSchema::ProjectsAndAliases);
        assert_eq!(WriteMode::default(), WriteMode::Truncate);
        assert_eq!(RowErrorPolicy::default(), RowErrorPolicy::Fail);
        assert_eq!(OutputFormat::default(), OutputFormat::Wxr);
    }
}
