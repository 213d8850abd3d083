mod format;
mod highlight;
mod markdown;

pub use format::{
    relative_file_path, render_code_block, render_file_content_as_markdown, render_raw_markdown,
    strip_diff_format,
};
pub use markdown::TerminalMarkdown;

use crossterm::style::{style, Stylize};
use serde::Deserialize;

/// Code highlighting palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    /// No syntax highlighting.
    None,
}

/// Turns markdown into text ready to be written to the terminal.
///
/// Implementations print a blank line before a document that opens with a
/// fenced code block, but not before other documents. The framing helpers in
/// this module compensate for that.
pub trait MarkdownRender {
    fn render(&self, markdown: &str) -> anyhow::Result<String>;
}

/// Emits the markdown source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainMarkdown;

impl MarkdownRender for PlainMarkdown {
    fn render(&self, markdown: &str) -> anyhow::Result<String> {
        let mut out = String::new();
        if starts_with_fence(markdown) {
            out.push('\n');
        }
        out.push_str(markdown.trim_end_matches('\n'));
        out.push('\n');
        Ok(out)
    }
}

fn starts_with_fence(markdown: &str) -> bool {
    let first = markdown.trim_start_matches('\n').trim_start();
    first.starts_with("```") || first.starts_with("~~~")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn italic(&self, text: &str) -> String {
        if self.enabled {
            style(text).italic().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn underline(&self, text: &str) -> String {
        if self.enabled {
            style(text).underlined().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn strikethrough(&self, text: &str) -> String {
        if self.enabled {
            style(text).crossed_out().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn muted(&self, text: &str) -> String {
        if self.enabled {
            style(text).dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        if self.enabled {
            style(text).cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Everything the log renderer needs to know about the output terminal.
pub struct TermContext {
    pub colors: ColorScheme,
    pub markdown: Box<dyn MarkdownRender>,
}

impl TermContext {
    pub fn new(colors: ColorScheme, markdown: Box<dyn MarkdownRender>) -> Self {
        Self { colors, markdown }
    }

    /// Uncolored context that prints markdown source as-is.
    pub fn plain() -> Self {
        Self::new(ColorScheme::new(false), Box::new(PlainMarkdown))
    }
}
