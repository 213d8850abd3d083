use super::Theme;
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::as_24_bit_terminal_escaped;

const RESET: &str = "\u{1b}[0m";

struct HighlightAssets {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

static HIGHLIGHT_ASSETS: OnceLock<HighlightAssets> = OnceLock::new();

fn highlight_assets() -> &'static HighlightAssets {
    HIGHLIGHT_ASSETS.get_or_init(|| HighlightAssets {
        syntax_set: SyntaxSet::load_defaults_newlines(),
        theme_set: ThemeSet::load_defaults(),
    })
}

fn theme_name(theme: Theme) -> Option<&'static str> {
    match theme {
        Theme::Dark => Some("base16-ocean.dark"),
        Theme::Light => Some("InspiredGitHub"),
        Theme::None => None,
    }
}

/// Highlights code for a fence language tag, one escaped string per line.
///
/// Returns `Ok(None)` when highlighting is off or the theme is unavailable;
/// the caller then prints the code plain.
pub fn highlight_code(
    theme: Theme,
    language: Option<&str>,
    code: &str,
) -> anyhow::Result<Option<Vec<String>>> {
    let Some(name) = theme_name(theme) else {
        return Ok(None);
    };
    let assets = highlight_assets();
    let Some(theme) = assets.theme_set.themes.get(name) else {
        return Ok(None);
    };

    let syntax = syntax_for_language(&assets.syntax_set, language);
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in code.split('\n') {
        let with_newline = format!("{line}\n");
        let ranges = highlighter.highlight_line(&with_newline, &assets.syntax_set)?;
        let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
        let escaped = escaped.trim_end_matches('\n');
        lines.push(format!("{escaped}{RESET}"));
    }
    Ok(Some(lines))
}

fn aliases(token: &str) -> Vec<String> {
    let lower = token.trim().to_ascii_lowercase();
    let extra: &[&str] = match lower.as_str() {
        "shell" | "console" | "zsh" => &["sh", "bash"],
        "ts" | "typescript" | "tsx" | "jsx" | "mjs" | "cjs" => &["js", "javascript"],
        "yml" => &["yaml"],
        "golang" => &["go"],
        "rust" => &["rs"],
        "patch" => &["diff"],
        "py" => &["python"],
        _ => &[],
    };
    std::iter::once(lower.clone())
        .chain(extra.iter().map(|s| s.to_string()))
        .collect()
}

fn syntax_for_language<'a>(syntax_set: &'a SyntaxSet, language: Option<&str>) -> &'a SyntaxReference {
    let Some(token) = language.map(str::trim).filter(|t| !t.is_empty()) else {
        return syntax_set.find_syntax_plain_text();
    };

    for candidate in aliases(token) {
        if let Some(syntax) = syntax_set.find_syntax_by_token(&candidate) {
            return syntax;
        }
        if let Some(syntax) = syntax_set.find_syntax_by_extension(&candidate) {
            return syntax;
        }
    }
    syntax_set.find_syntax_plain_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_theme_disables_highlighting() {
        assert!(highlight_code(Theme::None, Some("rs"), "fn main() {}").unwrap().is_none());
    }

    #[test]
    fn highlights_one_string_per_line() {
        let lines = highlight_code(Theme::Dark, Some("rust"), "fn main() {\n}")
            .unwrap()
            .expect("highlighted");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("main"));
        assert!(lines[0].contains('\u{1b}'));
    }

    #[test]
    fn shell_alias_resolves() {
        let assets = highlight_assets();
        let syntax = syntax_for_language(&assets.syntax_set, Some("shell"));
        assert_ne!(syntax.name, "Plain Text");
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text() {
        let assets = highlight_assets();
        let syntax = syntax_for_language(&assets.syntax_set, Some("no-such-lang"));
        assert_eq!(syntax.name, "Plain Text");
    }
}
