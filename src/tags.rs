//! Tags Module
//!
//! 行データからWordPressの`post_tag`（作品名・別名）を収集するモジュール。

use crate::api::{AmpersandPolicy, TagSchema};
use crate::row::RowFields;
use crate::slug::slugify;
use crate::types::Tag;

/// 別名列の区切り文字列（`, `で完全一致。`,`のみでは区切らない）
const ALIAS_SEPARATOR: &str = ", ";

/// エントリーのタグを収集する
///
/// 作品タグは行内の順序のまま並び、`TagSchema::ProjectsAndAliases`の場合は
/// その後ろに別名タグが続きます。重複は排除しません。
pub(crate) fn collect_tags(
    fields: &RowFields,
    schema: TagSchema,
    ampersand: AmpersandPolicy,
) -> Vec<Tag> {
    let mut tags: Vec<Tag> = fields
        .titled_pairs()
        .map(|pair| Tag::new(pair.title.as_str(), slugify(&pair.title, ampersand)))
        .collect();

    if schema == TagSchema::ProjectsAndAliases {
        tags.extend(alias_tags(&fields.aliases, ampersand));
    }

    tags
}

fn alias_tags(column: &str, ampersand: AmpersandPolicy) -> Vec<Tag> {
    if column.is_empty() {
        return Vec::new();
    }

    column
        .split(ALIAS_SEPARATOR)
        .filter(|alias| !alias.is_empty())
        .map(|alias| Tag::new(alias, slugify(alias, ampersand)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(row: &[&str]) -> RowFields {
        let row: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        RowFields::from_row(&row, 1).unwrap()
    }

    #[test]
    fn test_project_tags_in_order() {
        let tags = collect_tags(
            &fields(&[
                "a@b.com", "", "Jo", "", "", "", "", "",
                "Echoes", "Lighting Designer", "Waves", "Sound",
            ]),
            TagSchema::Projects,
            AmpersandPolicy::Expand,
        );
        assert_eq!(
            tags,
            vec![Tag::new("Echoes", "echoes"), Tag::new("Waves", "waves")]
        );
    }

    #[test]
    fn test_no_pairs_no_tags() {
        let tags = collect_tags(
            &fields(&["a@b.com", "JL", "Jo", "", "", "", "", ""]),
            TagSchema::Projects,
            AmpersandPolicy::Expand,
        );
        assert!(tags.is_empty());
    }

    #[test]
    fn test_blank_titles_skipped() {
        let tags = collect_tags(
            &fields(&[
                "a@b.com", "", "Jo", "", "", "", "", "",
                "", "Usher", "Waves", "",
            ]),
            TagSchema::Projects,
            AmpersandPolicy::Expand,
        );
        assert_eq!(tags, vec![Tag::new("Waves", "waves")]);
    }

    #[test]
    fn test_aliases_after_projects() {
        let tags = collect_tags(
            &fields(&[
                "a@b.com", "Jojo, The Lin Crew", "Jo", "", "", "", "", "",
                "Echoes", "Actor",
            ]),
            TagSchema::ProjectsAndAliases,
            AmpersandPolicy::Expand,
        );
        assert_eq!(
            tags,
            vec![
                Tag::new("Echoes", "echoes"),
                Tag::new("Jojo", "jojo"),
                Tag::new("The Lin Crew", "the-lin-crew"),
            ]
        );
    }

    #[test]
    fn test_aliases_ignored_for_projects_schema() {
        let tags = collect_tags(
            &fields(&["a@b.com", "Jojo", "Jo", "", "", "", "", ""]),
            TagSchema::Projects,
            AmpersandPolicy::Expand,
        );
        assert!(tags.is_empty());
    }

    #[test]
    fn test_alias_split_is_literal() {
        // ","のみ（空白なし）では区切らない
        let tags = alias_tags("Jo,Lin, Crew", AmpersandPolicy::Expand);
        assert_eq!(
            tags,
            vec![Tag::new("Jo,Lin", "jolin"), Tag::new("Crew", "crew")]
        );
    }

    #[test]
    fn test_alias_empty_pieces_dropped() {
        assert!(alias_tags("", AmpersandPolicy::Expand).is_empty());
        assert_eq!(
            alias_tags("Jojo, ", AmpersandPolicy::Expand),
            vec![Tag::new("Jojo", "jojo")]
        );
    }

    #[test]
    fn test_tags_not_deduplicated() {
        let tags = collect_tags(
            &fields(&[
                "a@b.com", "Echoes", "Jo", "", "", "", "", "",
                "Echoes", "Actor",
            ]),
            TagSchema::ProjectsAndAliases,
            AmpersandPolicy::Expand,
        );
        assert_eq!(
            tags,
            vec![Tag::new("Echoes", "echoes"), Tag::new("Echoes", "echoes")]
        );
    }
}
