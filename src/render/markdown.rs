use super::highlight::highlight_code;
use super::{ColorScheme, MarkdownRender, Theme};
use markdown::{mdast, to_mdast, ParseOptions};
use unicode_width::UnicodeWidthChar;

const CODE_INDENT: &str = "  ";

/// ANSI terminal markdown renderer (GFM).
#[derive(Debug, Clone)]
pub struct TerminalMarkdown {
    width: usize,
    theme: Theme,
    colors: ColorScheme,
}

impl TerminalMarkdown {
    pub fn new(width: usize, theme: Theme, colors: ColorScheme) -> Self {
        Self {
            width: width.max(20),
            // Highlighting is all escape codes, so it follows the color switch.
            theme: if colors.enabled() { theme } else { Theme::None },
            colors,
        }
    }

    fn render_blocks(&self, nodes: &[mdast::Node], width: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            let block = self.render_block(node, width)?;
            if block.is_empty() {
                continue;
            }
            if i > 0 && !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(block);
        }
        Ok(lines)
    }

    fn render_block(&self, node: &mdast::Node, width: usize) -> anyhow::Result<Vec<String>> {
        let cs = &self.colors;
        Ok(match node {
            mdast::Node::Heading(heading) => {
                let text = self.render_inline(&heading.children);
                let styled = match heading.depth {
                    1 => cs.accent(&cs.bold(&cs.underline(&text))),
                    2 => cs.accent(&cs.bold(&text)),
                    depth => cs.accent(&cs.bold(&format!("{} {text}", "#".repeat(depth as usize)))),
                };
                wrap(&styled, width)
            }
            mdast::Node::Paragraph(paragraph) => {
                wrap(&self.render_inline(&paragraph.children), width)
            }
            mdast::Node::Code(code) => self.render_code(code.lang.as_deref(), &code.value)?,
            mdast::Node::List(list) => self.render_list(list, width)?,
            mdast::Node::Blockquote(quote) => {
                let inner = self.render_blocks(&quote.children, width.saturating_sub(2).max(10))?;
                let bar = cs.muted("│");
                inner
                    .into_iter()
                    .map(|line| format!("{bar} {}", cs.italic(&line)))
                    .collect()
            }
            mdast::Node::ThematicBreak(_) => vec![cs.muted(&"─".repeat(width.min(80)))],
            mdast::Node::Table(table) => self.render_table(table),
            mdast::Node::Html(html) => html.value.lines().map(str::to_string).collect(),
            other => {
                let text = self.render_inline(std::slice::from_ref(other));
                if text.is_empty() {
                    Vec::new()
                } else {
                    wrap(&text, width)
                }
            }
        })
    }

    fn render_code(&self, lang: Option<&str>, code: &str) -> anyhow::Result<Vec<String>> {
        let lines = match highlight_code(self.theme, lang, code)? {
            Some(highlighted) => highlighted,
            None => code.split('\n').map(str::to_string).collect(),
        };
        Ok(lines
            .into_iter()
            .map(|line| format!("{CODE_INDENT}{line}"))
            .collect())
    }

    fn render_list(&self, list: &mdast::List, width: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        let start = list.start.unwrap_or(1);
        for (i, item) in list.children.iter().enumerate() {
            let mdast::Node::ListItem(item) = item else {
                continue;
            };
            let marker = if list.ordered {
                format!("{}. ", start as usize + i)
            } else {
                "• ".to_string()
            };
            let marker = match item.checked {
                Some(true) => format!("{marker}[x] "),
                Some(false) => format!("{marker}[ ] "),
                None => marker,
            };
            let hang = " ".repeat(visible_width(&marker));
            let inner_width = width.saturating_sub(hang.len()).max(10);

            let mut first = true;
            for child in &item.children {
                let block = match child {
                    mdast::Node::Paragraph(p) => {
                        wrap(&self.render_inline(&p.children), inner_width)
                    }
                    other => self.render_block(other, inner_width)?,
                };
                for line in block {
                    if first {
                        lines.push(format!("{}{line}", self.colors.muted(&marker)));
                        first = false;
                    } else {
                        lines.push(format!("{hang}{line}"));
                    }
                }
            }
            if first {
                lines.push(self.colors.muted(marker.trim_end()));
            }
        }
        Ok(lines)
    }

    fn render_table(&self, table: &mdast::Table) -> Vec<String> {
        let rows: Vec<Vec<String>> = table
            .children
            .iter()
            .filter_map(|row| match row {
                mdast::Node::TableRow(row) => Some(
                    row.children
                        .iter()
                        .map(|cell| match cell {
                            mdast::Node::TableCell(cell) => self.render_inline(&cell.children),
                            _ => String::new(),
                        })
                        .collect(),
                ),
                _ => None,
            })
            .collect();

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(visible_width(cell));
            }
        }

        let sep = self.colors.muted(" │ ");
        let mut lines = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            let cells: Vec<String> = (0..columns)
                .map(|i| {
                    let cell = row.get(i).map(String::as_str).unwrap_or("");
                    let pad = widths[i].saturating_sub(visible_width(cell));
                    let cell = if r == 0 { self.colors.bold(cell) } else { cell.to_string() };
                    format!("{cell}{}", " ".repeat(pad))
                })
                .collect();
            lines.push(cells.join(&sep).trim_end().to_string());
            if r == 0 {
                let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                lines.push(self.colors.muted(&rule.join("─┼─")));
            }
        }
        lines
    }

    fn render_inline(&self, nodes: &[mdast::Node]) -> String {
        let cs = &self.colors;
        let mut out = String::new();
        for node in nodes {
            match node {
                // Soft line breaks reflow; hard breaks are `Break` nodes.
                mdast::Node::Text(text) => out.push_str(&text.value.replace('\n', " ")),
                mdast::Node::Strong(strong) => out.push_str(&cs.bold(&self.render_inline(&strong.children))),
                mdast::Node::Emphasis(em) => out.push_str(&cs.italic(&self.render_inline(&em.children))),
                mdast::Node::Delete(del) => {
                    out.push_str(&cs.strikethrough(&self.render_inline(&del.children)))
                }
                mdast::Node::InlineCode(code) => out.push_str(&cs.accent(&code.value)),
                mdast::Node::Link(link) => {
                    let text = self.render_inline(&link.children);
                    out.push_str(&cs.underline(&text));
                    if text != link.url {
                        out.push_str(&cs.muted(&format!(" ({})", link.url)));
                    }
                }
                mdast::Node::Image(image) => {
                    let alt = if image.alt.is_empty() { &image.url } else { &image.alt };
                    out.push_str(&cs.muted(&format!("[image: {alt}]")));
                }
                mdast::Node::Break(_) => out.push('\n'),
                mdast::Node::Html(html) => out.push_str(&html.value),
                mdast::Node::Paragraph(p) => out.push_str(&self.render_inline(&p.children)),
                _ => {}
            }
        }
        out
    }
}

impl MarkdownRender for TerminalMarkdown {
    fn render(&self, text: &str) -> anyhow::Result<String> {
        let normalized = text.replace('\t', "    ");
        let root = to_mdast(&normalized, &ParseOptions::gfm())
            .map_err(|e| anyhow::anyhow!("failed to parse markdown: {e}"))?;
        let nodes = match root {
            mdast::Node::Root(root) => root.children,
            other => vec![other],
        };

        let mut out = String::new();
        if matches!(nodes.first(), Some(mdast::Node::Code(_))) {
            out.push('\n');
        }
        for line in self.render_blocks(&nodes, self.width)? {
            out.push_str(line.trim_end_matches(' '));
            out.push('\n');
        }
        if out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }
}

/// Terminal columns occupied by `s`, ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI: ESC [ params final-byte
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            continue;
        }
        width += c.width().unwrap_or(0);
    }
    width
}

/// Greedy word wrap that keeps escape sequences attached to their words.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for hard_line in text.split('\n') {
        let mut line = String::new();
        let mut used = 0;
        for word in hard_line.split(' ').filter(|w| !w.is_empty()) {
            let w = visible_width(word);
            if used > 0 && used + 1 + w > width {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            if used > 0 {
                line.push(' ');
                used += 1;
            }
            line.push_str(word);
            used += w;
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(width: usize) -> TerminalMarkdown {
        TerminalMarkdown::new(width, Theme::None, ColorScheme::new(false))
    }

    #[test]
    fn paragraphs_are_separated_by_blank_lines() {
        let out = plain(80).render("Hello\n\nWorld").unwrap();
        assert_eq!(out, "Hello\n\nWorld\n");
    }

    #[test]
    fn fenced_only_document_starts_with_blank_line() {
        let out = plain(80).render("```go\npackage x\n```").unwrap();
        assert_eq!(out, "\n  package x\n");
    }

    #[test]
    fn wraps_to_width() {
        let out = plain(20).render("one two three four five six seven eight").unwrap();
        for line in out.lines() {
            assert!(visible_width(line) <= 20, "line too wide: {line:?}");
        }
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn lists_get_markers() {
        let out = plain(80).render("- a\n- b\n\n1. x\n2. y").unwrap();
        assert!(out.contains("• a\n• b"));
        assert!(out.contains("1. x\n2. y"));
    }

    #[test]
    fn headings_and_inline_code_keep_text() {
        let out = plain(80).render("### Notes\nrun `cargo fmt` now").unwrap();
        assert!(out.contains("### Notes"));
        assert!(out.contains("run cargo fmt now"));
    }

    #[test]
    fn links_show_url() {
        let out = plain(80).render("[docs](https://example.com)").unwrap();
        assert_eq!(out, "docs (https://example.com)\n");
    }

    #[test]
    fn autolinks_do_not_repeat_url() {
        let out = plain(80).render("<https://example.com>").unwrap();
        assert_eq!(out, "https://example.com\n");
    }

    #[test]
    fn tables_align_columns() {
        let out = plain(80).render("| a | bb |\n|---|---|\n| ccc | d |").unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "a   │ bb");
        assert_eq!(lines[2], "ccc │ d");
    }

    #[test]
    fn colored_output_contains_escapes() {
        let md = TerminalMarkdown::new(80, Theme::Dark, ColorScheme::new(true));
        let out = md.render("**bold**\n\n```rust\nfn main() {}\n```").unwrap();
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("bold"));
    }

    #[test]
    fn visible_width_ignores_escapes() {
        assert_eq!(visible_width("\u{1b}[1mab\u{1b}[0m"), 2);
        assert_eq!(visible_width("日本"), 4);
    }
}
