use std::sync::LazyLock;

use regex::Regex;

/// シェル引用を壊す引用符（" ' `）
static QUOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'`]"#).expect("quote pattern is valid"));

/// 絵文字（Emoji表示形と拡張絵文字記号）
static EMOJI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Emoji_Presentation}\p{Extended_Pictographic}]")
        .expect("emoji pattern is valid")
});

/// コミットメッセージをシェルセーフな文字列に変換する
///
/// 常に引用符（" ' `）を削除する。`allow_emojis`がfalseの場合は
/// 絵文字も削除する。それ以外の文字（あらゆる文字種・数字・空白・記号）は
/// 先頭末尾の空白も含めてそのまま保持される。冪等。
pub fn sanitize_commit_message(message: &str, allow_emojis: bool) -> String {
    let sanitized = QUOTE_PATTERN.replace_all(message, "");

    if allow_emojis {
        sanitized.into_owned()
    } else {
        EMOJI_PATTERN.replace_all(&sanitized, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ============================================================
    // 引用符除去のテスト
    // ============================================================

    #[test]
    fn test_empty_message() {
        assert_eq!(sanitize_commit_message("", true), "");
    }

    #[test]
    fn test_removes_quote_characters() {
        assert_eq!(
            sanitize_commit_message("fix: \"bug\" with 'quotes' and `backticks`", true),
            "fix: bug with quotes and backticks"
        );
    }

    #[test]
    fn test_preserves_other_special_characters() {
        assert_eq!(
            sanitize_commit_message("fix: bug!@#$%^&*()_+=[]{}|;,?", true),
            "fix: bug!@#$%^&*()_+=[]{}|;,?"
        );
    }

    #[test]
    fn test_preserves_japanese_and_chinese() {
        assert_eq!(
            sanitize_commit_message("修正: バグ修正 測試 測驗", true),
            "修正: バグ修正 測試 測驗"
        );
    }

    #[test]
    fn test_preserves_numbers_spaces_and_paths() {
        assert_eq!(
            sanitize_commit_message("feat: add 1234 /path/to/file - update.", true),
            "feat: add 1234 /path/to/file - update."
        );
    }

    #[test]
    fn test_preserves_leading_and_trailing_whitespace() {
        assert_eq!(
            sanitize_commit_message("   chore: update dependencies   ", true),
            "   chore: update dependencies   "
        );
    }

    #[test]
    fn test_long_message_is_not_truncated() {
        let long_msg = "a".repeat(120);
        assert_eq!(sanitize_commit_message(&long_msg, true), long_msg);
    }

    #[rstest]
    #[case("feat(auth): add login feature")]
    #[case("feat!: breaking API change")]
    #[case("fix: resolve issue #123")]
    fn test_preserves_conventional_commit_syntax(#[case] message: &str) {
        assert_eq!(sanitize_commit_message(message, true), message);
    }

    // ============================================================
    // 絵文字トグルのテスト
    // ============================================================

    #[test]
    fn test_allows_emojis_when_enabled() {
        assert_eq!(
            sanitize_commit_message("fix: bug 🐛🔥💥", true),
            "fix: bug 🐛🔥💥"
        );
        assert_eq!(sanitize_commit_message("fix: bug 🐛🔥", true), "fix: bug 🐛🔥");
    }

    #[test]
    fn test_strips_emojis_when_disabled() {
        // 絵文字の前の空白はそのまま残る
        assert_eq!(sanitize_commit_message("fix: bug 🐛🔥", false), "fix: bug ");
    }

    #[test]
    fn test_strips_only_emojis_not_text() {
        assert_eq!(
            sanitize_commit_message("✨ feat: sparkle ✨", false),
            " feat: sparkle "
        );
    }

    #[test]
    fn test_emoji_disabled_preserves_digits_and_punctuation() {
        assert_eq!(
            sanitize_commit_message("fix: resolve issue #123 (v2.0)", false),
            "fix: resolve issue #123 (v2.0)"
        );
    }

    #[test]
    fn test_mixed_quotes_and_emojis() {
        assert_eq!(
            sanitize_commit_message("feat(scope)!: add \"dark mode\" for issue #42 🎨", true),
            "feat(scope)!: add dark mode for issue #42 🎨"
        );
        assert_eq!(
            sanitize_commit_message("feat(scope)!: add \"dark mode\" for issue #42 🎨", false),
            "feat(scope)!: add dark mode for issue #42 "
        );
    }

    // ============================================================
    // 冪等性のテスト
    // ============================================================

    #[rstest]
    #[case("fix: \"bug\" with 'quotes'", true)]
    #[case("fix: \"bug\" with 'quotes'", false)]
    #[case("fix: bug 🐛🔥", true)]
    #[case("fix: bug 🐛🔥", false)]
    #[case("   修正: バグ `quoted` 🐛   ", false)]
    #[case("plain message without anything special", true)]
    fn test_sanitize_is_idempotent(#[case] message: &str, #[case] allow_emojis: bool) {
        let once = sanitize_commit_message(message, allow_emojis);
        let twice = sanitize_commit_message(&once, allow_emojis);
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case("fix: \"bug\"")]
    #[case("it's a 'test' with `code`")]
    #[case("\"'`\"'`")]
    #[case("nothing to remove")]
    fn test_output_never_contains_quotes(#[case] message: &str) {
        let sanitized = sanitize_commit_message(message, true);
        assert!(!sanitized.contains('"'));
        assert!(!sanitized.contains('\''));
        assert!(!sanitized.contains('`'));
    }
}
