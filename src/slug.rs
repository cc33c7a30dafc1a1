//! Slug Module
//!
//! 表示名からURLパスに使えるスラッグ（WordPressのnicename）を生成するモジュール。

use crate::api::AmpersandPolicy;

/// 表示名をスラッグに正規化する
///
/// 1. 全体を小文字化
/// 2. `AmpersandPolicy::Expand`の場合、`&`を`and`に置換
/// 3. 空白を`-`に置換
/// 4. `-`以外のASCII記号を削除
///
/// 既存の`-`は残すため、正規化済みのスラッグに再適用しても変化しません。
///
/// # 使用例
///
/// ```rust
/// use sheetpress::{slugify, AmpersandPolicy};
///
/// assert_eq!(slugify("Rain & Shine", AmpersandPolicy::Expand), "rain-and-shine");
/// assert_eq!(slugify("Stage Crew", AmpersandPolicy::Drop), "stage-crew");
/// ```
pub fn slugify(label: &str, ampersand: AmpersandPolicy) -> String {
    let lowered = label.to_lowercase();
    let lowered = match ampersand {
        AmpersandPolicy::Expand => lowered.replace('&', "and"),
        AmpersandPolicy::Drop => lowered,
    };

    lowered
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' => Some('-'),
            c if c.is_ascii_punctuation() => None,
            c => Some(c),
        })
        .collect()
}
