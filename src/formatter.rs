//! Formatter Module
//!
//! 行データから投稿本文（HTML断片）を組み立てるモジュール。
//!
//! 本文の構成:
//!
//! ```text
//! [画像ブロック] + 名前行 + プロフィール + "\n\nRoles: " + 役割行 + [ウェブサイト行]
//! ```
//!
//! 改行の数（1つか2つか）はWordPress上の段落に直結するため、変更しないこと。

use crate::api::NameStyle;
use crate::builder::ExportConfig;
use crate::row::RowFields;
use crate::slug::slugify;

/// 投稿本文フォーマッター
#[derive(Debug, Default)]
pub(crate) struct ContentFormatter;

impl ContentFormatter {
    /// 新しいContentFormatterインスタンスを生成
    pub fn new() -> Self {
        Self
    }

    /// 投稿本文を組み立てる
    ///
    /// # 引数
    ///
    /// * `fields` - 抽出済みの行フィールド
    /// * `config` - エクスポート設定（名前行スタイル、URL、画像マップ）
    ///
    /// # 戻り値
    ///
    /// 投稿本文の文字列
    pub fn format_body(&self, fields: &RowFields, config: &ExportConfig) -> String {
        let mut body = String::new();

        body.push_str(&self.image_block(fields, config));
        body.push_str(&self.name_line(fields, config.name_style));
        body.push_str(&fields.bio);
        body.push_str("\n\nRoles: ");
        body.push_str(&self.roles_line(fields, config));

        if !fields.website.is_empty() {
            body.push_str(&format!(
                "\n\n<a href=\"{}\">{}</a>",
                fields.website, fields.website
            ));
        }

        body
    }

    /// 画像ブロック（画像マップにメールアドレスがない場合は空文字列）
    fn image_block(&self, fields: &RowFields, config: &ExportConfig) -> String {
        match config.images.get(&fields.email) {
            Some(image) if !image.is_empty() => format!(
                "<img class=\"alignleft size-medium\" src=\"{}{}\" alt=\"{}\" width=\"300\" height=\"300\" />\n\n",
                config.site.uploads_url, image, fields.name
            ),
            _ => String::new(),
        }
    }

    /// 名前行（太字の表示名。代名詞があればスタイルに応じて付加）
    fn name_line(&self, fields: &RowFields, style: NameStyle) -> String {
        if fields.pronoun.is_empty() {
            return format!("<b>{}</b>\n\n", fields.name);
        }

        match style {
            NameStyle::Parenthesized => format!("<b>{} ({})</b>\n\n", fields.name, fields.pronoun),
            NameStyle::Comma => format!("<b>{}, {}</b>\n\n", fields.name, fields.pronoun),
        }
    }

    /// 役割行
    ///
    /// 作品に依らない役割から始め、作品ごとにリンクと役割を`, `区切りで追加します。
    /// 最初の作品の前の`, `は、作品に依らない役割が空でない場合のみ付きます。
    fn roles_line(&self, fields: &RowFields, config: &ExportConfig) -> String {
        let mut roles = fields.generic_role.clone();

        for pair in fields.titled_pairs() {
            if !roles.is_empty() {
                roles.push_str(", ");
            }
            let slug = slugify(&pair.title, config.ampersand);
            roles.push_str(&format!(
                "<a href=\"{}\"><em>{}</em></a> ({})",
                config.site.project_url(&slug),
                pair.title,
                pair.role
            ));
        }

        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AmpersandPolicy;

    fn fields(row: &[&str]) -> RowFields {
        let row: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        RowFields::from_row(&row, 1).unwrap()
    }

    fn config() -> ExportConfig {
        ExportConfig::default()
    }

    #[test]
    fn test_body_minimal() {
        let formatter = ContentFormatter::new();
        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo Lin", "", "Loves theatre.", "", "", "Director"]),
            &config(),
        );
        assert_eq!(body, "<b>Jo Lin</b>\n\nLoves theatre.\n\nRoles: Director");
    }

    #[test]
    fn test_name_line_parenthesized() {
        let formatter = ContentFormatter::new();
        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo Lin", "she/her", "Bio.", "", "", ""]),
            &config(),
        );
        assert!(body.starts_with("<b>Jo Lin (she/her)</b>\n\n"));
    }

    #[test]
    fn test_name_line_comma() {
        let formatter = ContentFormatter::new();
        let config = ExportConfig {
            name_style: NameStyle::Comma,
            ..Default::default()
        };
        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo Lin", "she/her", "Bio.", "", "", ""]),
            &config,
        );
        assert!(body.starts_with("<b>Jo Lin, she/her</b>\n\n"));
    }

    #[test]
    fn test_name_line_comma_without_pronoun() {
        let formatter = ContentFormatter::new();
        let config = ExportConfig {
            name_style: NameStyle::Comma,
            ..Default::default()
        };
        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo Lin", "", "Bio.", "", "", ""]),
            &config,
        );
        assert!(body.starts_with("<b>Jo Lin</b>\n\nBio."));
    }

    #[test]
    fn test_roles_with_generic_role_and_projects() {
        let formatter = ContentFormatter::new();
        let config = config();
        let body = formatter.format_body(
            &fields(&[
                "a@b.com", "", "Jo", "", "Bio.", "", "", "Director",
                "Echoes", "Lighting Designer", "Rain & Shine", "Sound",
            ]),
            &config,
        );

        let echoes = config.site.project_url("echoes");
        let rain = config.site.project_url("rain-and-shine");
        assert_eq!(
            body,
            format!(
                "<b>Jo</b>\n\nBio.\n\nRoles: Director, \
                 <a href=\"{}\"><em>Echoes</em></a> (Lighting Designer), \
                 <a href=\"{}\"><em>Rain & Shine</em></a> (Sound)",
                echoes, rain
            )
        );
    }

    #[test]
    fn test_roles_without_generic_role() {
        let formatter = ContentFormatter::new();
        let config = config();
        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo", "", "Bio.", "", "", "", "Echoes", "Actor"]),
            &config,
        );
        assert!(body.ends_with(&format!(
            "Roles: <a href=\"{}\"><em>Echoes</em></a> (Actor)",
            config.site.project_url("echoes")
        )));
    }

    #[test]
    fn test_roles_blank_title_first_pair() {
        // 最初のペアの作品名が空でも、先頭に", "が付かないこと
        let formatter = ContentFormatter::new();
        let config = config();
        let body = formatter.format_body(
            &fields(&[
                "a@b.com", "", "Jo", "", "Bio.", "", "", "",
                "", "Usher", "Waves", "Sound",
            ]),
            &config,
        );
        assert!(body.ends_with(&format!(
            "Roles: <a href=\"{}\"><em>Waves</em></a> (Sound)",
            config.site.project_url("waves")
        )));
    }

    #[test]
    fn test_roles_slug_follows_ampersand_policy() {
        let formatter = ContentFormatter::new();
        let config = ExportConfig {
            ampersand: AmpersandPolicy::Drop,
            ..Default::default()
        };
        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo", "", "", "", "", "", "Rain & Shine", "Sound"]),
            &config,
        );
        assert!(body.contains(&config.site.project_url("rain--shine")));
    }

    #[test]
    fn test_website_line() {
        let formatter = ContentFormatter::new();
        let body = formatter.format_body(
            &fields(&[
                "a@b.com", "", "Jo", "", "Bio.", "", "https://jo.example", "Director",
            ]),
            &config(),
        );
        assert!(body.ends_with(
            "Roles: Director\n\n<a href=\"https://jo.example\">https://jo.example</a>"
        ));
    }

    #[test]
    fn test_image_block() {
        let formatter = ContentFormatter::new();
        let mut config = config();
        config
            .images
            .insert("a@b.com".to_string(), "jo.jpg".to_string());

        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo", "", "Bio.", "", "", ""]),
            &config,
        );
        assert_eq!(
            body,
            format!(
                "<img class=\"alignleft size-medium\" src=\"{}jo.jpg\" alt=\"Jo\" width=\"300\" height=\"300\" />\n\n\
                 <b>Jo</b>\n\nBio.\n\nRoles: ",
                config.site.uploads_url
            )
        );
    }

    #[test]
    fn test_image_block_empty_reference_is_omitted() {
        let formatter = ContentFormatter::new();
        let mut config = config();
        config.images.insert("a@b.com".to_string(), String::new());

        let body = formatter.format_body(
            &fields(&["a@b.com", "", "Jo", "", "Bio.", "", "", ""]),
            &config,
        );
        assert!(body.starts_with("<b>Jo</b>"));
    }
}
