use super::entry::{ChatCompletionChunkEntry, Choice, ToolCall, DATA_PREFIX};
use super::tools::{render_tool_call, Block, ToolView};
use crate::render::{render_code_block, render_file_content_as_markdown, render_raw_markdown, TermContext};
use anyhow::bail;
use std::io::Write;

const TITLE_ICON: &str = "▶";

/// Decodes agent log records and writes them as rendered markdown.
///
/// Rendered output goes to `out`; non-fatal diagnostics (tool calls whose
/// arguments could not be decoded) go to `err`.
pub struct LogRenderer<W, E> {
    out: W,
    err: E,
    term: TermContext,
}

impl<W: Write, E: Write> LogRenderer<W, E> {
    pub fn new(out: W, err: E, term: TermContext) -> Self {
        Self { out, err, term }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Renders every `data:` record in `text`.
    ///
    /// Returns `true` once a choice finishes with `stop`; records after that
    /// one are left unread. A non-blank line without the `data: ` prefix is a
    /// protocol error and aborts the call. Payloads that are not chat
    /// completion chunks are skipped.
    pub fn render(&mut self, text: &str) -> anyhow::Result<bool> {
        let result = self.render_lines(text);
        self.out.flush()?;
        result
    }

    fn render_lines(&mut self, text: &str) -> anyhow::Result<bool> {
        for line in text.lines().filter(|l| !l.is_empty()) {
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                bail!("unexpected log format: {}", truncate(line, 80));
            };
            let Some(entry) = ChatCompletionChunkEntry::decode(payload) else {
                continue;
            };
            if self.render_entry(&entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn render_entry(&mut self, entry: &ChatCompletionChunkEntry) -> anyhow::Result<bool> {
        tracing::trace!(
            id = %entry.id,
            model = %entry.model,
            created = entry.created,
            choices = entry.choices.len(),
            "chunk"
        );
        let mut stop = false;
        for choice in &entry.choices {
            if choice.is_stop() {
                stop = true;
            }
            self.render_choice(choice)?;
        }
        Ok(stop)
    }

    fn render_choice(&mut self, choice: &Choice) -> anyhow::Result<()> {
        let delta = &choice.delta;
        if delta.tool_calls.is_empty() {
            if !delta.content.is_empty() && delta.role == "assistant" {
                render_raw_markdown(&mut self.out, self.term.markdown.as_ref(), &delta.content)?;
            }
            return Ok(());
        }

        // Tool calls without content have not finished yet; they are
        // repeated with their output once they do.
        if delta.content.is_empty() {
            tracing::trace!(index = choice.index, "skipping in-progress tool calls");
            return Ok(());
        }

        if !delta.reasoning_text.is_empty() {
            render_raw_markdown(&mut self.out, self.term.markdown.as_ref(), &delta.reasoning_text)?;
        }

        for call in &delta.tool_calls {
            if call.function.name.is_empty() {
                continue;
            }
            self.render_tool_call(call, &delta.content)?;
        }
        Ok(())
    }

    fn render_tool_call(&mut self, call: &ToolCall, content: &str) -> anyhow::Result<()> {
        let name = call.function.name.as_str();
        tracing::debug!(tool = name, id = %call.id, index = call.index, "tool call");

        let view = match render_tool_call(name, &call.function.arguments, content) {
            Ok(view) => view,
            Err(e) => {
                writeln!(self.err, "\nfailed to parse '{name}' tool call arguments: {e}")?;
                return Ok(());
            }
        };
        self.write_view(&view)
    }

    fn write_view(&mut self, view: &ToolView) -> anyhow::Result<()> {
        let cs = &self.term.colors;
        writeln!(self.out, "{} {}", cs.muted(TITLE_ICON), cs.bold(&view.title))?;

        let md = self.term.markdown.as_ref();
        for block in &view.body {
            match block {
                Block::Markdown(text) => render_raw_markdown(&mut self.out, md, text)?,
                Block::Code { lang, text } => render_code_block(&mut self.out, md, lang, text)?,
                Block::File { path, content } => {
                    render_file_content_as_markdown(&mut self.out, md, path, content)?
                }
                Block::Json { label, pretty } => {
                    writeln!(self.out, "{}", cs.muted(label))?;
                    render_code_block(&mut self.out, md, "json", pretty)?;
                }
            }
        }
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
