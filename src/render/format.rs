use super::MarkdownRender;
use std::io::Write;
use std::path::Path;

const RUNNER_WORKSPACE: &str = "/home/runner/work/";

/// How a rendered block is separated from its neighbours.
///
/// The renderer omits the leading newline for ordinary documents but adds
/// one for documents that are only a fenced code block, so each shape gets
/// its own framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Framing {
    /// Blank line before and after.
    RawMarkdown,
    /// Blank line after only.
    Fenced,
}

impl Framing {
    fn write(self, w: &mut dyn Write, rendered: &str) -> std::io::Result<()> {
        match self {
            Framing::RawMarkdown => writeln!(w, "\n{rendered}"),
            Framing::Fenced => writeln!(w, "{rendered}"),
        }
    }
}

pub fn render_raw_markdown(
    w: &mut dyn Write,
    md: &dyn MarkdownRender,
    text: &str,
) -> anyhow::Result<()> {
    let rendered = md.render(text)?;
    Framing::RawMarkdown.write(w, &rendered)?;
    Ok(())
}

/// Renders `content` as a fenced block tagged `lang`.
pub fn render_code_block(
    w: &mut dyn Write,
    md: &dyn MarkdownRender,
    lang: &str,
    content: &str,
) -> anyhow::Result<()> {
    let rendered = md.render(&fenced(lang, content))?;
    Framing::Fenced.write(w, &rendered)?;
    Ok(())
}

/// Markdown files are rendered as documents, everything else as a code
/// block tagged with the file extension.
pub fn render_file_content_as_markdown(
    w: &mut dyn Write,
    md: &dyn MarkdownRender,
    path: &str,
    content: &str,
) -> anyhow::Result<()> {
    let ext = Path::new(path)
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    if ext.eq_ignore_ascii_case("md") {
        return render_raw_markdown(w, md, content);
    }
    render_code_block(w, md, &ext, content)
}

fn fenced(lang: &str, content: &str) -> String {
    // The fence must be longer than any backtick run inside the content.
    let longest = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    let body = content.strip_suffix('\n').unwrap_or(content);
    format!("{fence}{lang}\n{body}\n{fence}")
}

/// Recovers plain file content from a unified diff: everything up to and
/// including the first `@@` hunk header is dropped, and one leading `+` or
/// `-` is removed from every remaining line. Text without a hunk header is
/// returned unchanged.
pub fn strip_diff_format(diff: &str) -> String {
    let lines: Vec<&str> = diff.split('\n').collect();
    let Some(header) = lines.iter().position(|l| l.starts_with("@@")) else {
        return diff.to_string();
    };

    lines[header + 1..]
        .iter()
        .map(|&line| {
            line.strip_prefix('+')
                .or_else(|| line.strip_prefix('-'))
                .unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Maps an absolute path in the agent's runner checkout to a path relative
/// to the repository root.
pub fn relative_file_path(abs: &str) -> String {
    let rest = abs.strip_prefix(RUNNER_WORKSPACE).unwrap_or(abs);
    let parts: Vec<&str> = rest.split('/').collect();
    if parts.len() < 3 {
        return "repository".to_string();
    }
    parts[2..].join("/")
}
