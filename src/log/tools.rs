use super::generic::generic_tool_title;
use crate::render::{relative_file_path, strip_diff_format};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One piece of a tool call's rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A markdown document.
    Markdown(String),
    /// Code fenced with an explicit language tag.
    Code { lang: &'static str, text: String },
    /// File content, tagged by the path's extension.
    File { path: String, content: String },
    /// A labelled, pretty-printed JSON value.
    Json { label: &'static str, pretty: String },
}

/// A tool call ready to print: a title line followed by body blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolView {
    pub title: String,
    pub body: Vec<Block>,
}

impl ToolView {
    fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
        }
    }

    fn with(mut self, block: Block) -> Self {
        self.body.push(block);
        self
    }
}

/// Builds the view for a tool call from its raw JSON arguments and the
/// delta's content (the tool's output).
pub type ToolHandler = fn(arguments: &str, content: &str) -> serde_json::Result<ToolView>;

/// Tools with dedicated rendering. Everything else goes through
/// [`render_generic`].
pub static TOOL_HANDLERS: &[(&str, ToolHandler)] = &[
    ("run_setup", render_run_setup),
    ("view", render_view),
    ("bash", render_bash),
    ("write_bash", render_write_bash),
    ("read_bash", render_read_bash),
    ("stop_bash", render_stop_bash),
    ("async_bash", render_async_bash),
    ("read_async_bash", render_read_async_bash),
    ("stop_async_bash", render_stop_async_bash),
    ("think", render_think),
    ("report_progress", render_report_progress),
    ("create", render_create),
    ("str_replace", render_str_replace),
];

/// Looks up the handler for `name` and runs it, falling back to the
/// generic renderer. Only dedicated handlers can fail.
pub fn render_tool_call(name: &str, arguments: &str, content: &str) -> serde_json::Result<ToolView> {
    match TOOL_HANDLERS.iter().find(|(tool, _)| *tool == name) {
        Some((_, handler)) => handler(arguments, content),
        None => Ok(render_generic(name, arguments, content)),
    }
}

fn parse<T: DeserializeOwned>(arguments: &str) -> serde_json::Result<T> {
    serde_json::from_str(arguments)
}

#[derive(Debug, Deserialize)]
struct RunSetupArgs {
    #[serde(default)]
    name: String,
}

fn render_run_setup(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    let args: RunSetupArgs = parse(arguments)?;
    Ok(ToolView::titled(args.name))
}

#[derive(Debug, Deserialize)]
struct ViewArgs {
    #[serde(default)]
    path: String,
}

fn render_view(arguments: &str, content: &str) -> serde_json::Result<ToolView> {
    let args: ViewArgs = parse(arguments)?;
    Ok(
        ToolView::titled(format!("View {}", relative_file_path(&args.path))).with(Block::File {
            path: args.path,
            content: strip_diff_format(content),
        }),
    )
}

#[derive(Debug, Deserialize)]
struct BashArgs {
    #[serde(default)]
    command: String,
    #[serde(default)]
    description: String,
}

fn render_bash(arguments: &str, content: &str) -> serde_json::Result<ToolView> {
    let args: BashArgs = parse(arguments)?;
    let title = if args.description.is_empty() {
        "Run Bash command".to_string()
    } else {
        format!("Bash: {}", args.description)
    };
    Ok(ToolView::titled(title).with(Block::Code {
        lang: "shell",
        text: format!("$ {}\n{content}", args.command),
    }))
}

#[derive(Debug, Deserialize)]
struct BashSessionArgs {
    #[serde(default, rename = "sessionId", alias = "session_id")]
    session_id: String,
    #[serde(default)]
    input: String,
    #[serde(default)]
    command: String,
}

fn bash_session(arguments: &str, title: &str) -> serde_json::Result<ToolView> {
    let args: BashSessionArgs = parse(arguments)?;
    tracing::debug!(
        session_id = %args.session_id,
        input_len = args.input.len(),
        command = %args.command,
        "{title}"
    );
    Ok(ToolView::titled(title))
}

fn render_write_bash(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    bash_session(arguments, "Send input to Bash session")
}

fn render_read_bash(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    bash_session(arguments, "Read logs from Bash session")
}

fn render_stop_bash(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    bash_session(arguments, "Stop Bash session")
}

fn render_async_bash(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    bash_session(arguments, "Start or send input to long-running Bash session")
}

fn render_read_async_bash(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    bash_session(arguments, "View logs from long-running Bash session")
}

fn render_stop_async_bash(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    bash_session(arguments, "Stop long-running Bash session")
}

#[derive(Debug, Deserialize)]
struct ThinkArgs {
    #[serde(default, rename = "sessionId", alias = "session_id")]
    session_id: String,
    #[serde(default)]
    thought: String,
}

// The delta content repeats the reasoning text already printed, so only the
// thought itself is shown.
fn render_think(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    let args: ThinkArgs = parse(arguments)?;
    tracing::debug!(session_id = %args.session_id, "think");
    Ok(ToolView::titled("Thought").with(Block::Markdown(args.thought)))
}

#[derive(Debug, Deserialize)]
struct ReportProgressArgs {
    #[serde(default, rename = "commitMessage", alias = "commit_message")]
    commit_message: String,
    #[serde(default, rename = "prDescription", alias = "pr_description")]
    pr_description: String,
}

fn render_report_progress(arguments: &str, content: &str) -> serde_json::Result<ToolView> {
    let args: ReportProgressArgs = parse(arguments)?;
    let mut view = ToolView::titled(format!("Progress update: {}", args.commit_message))
        .with(Block::Markdown(args.pr_description));
    if let Some(pretty) = pretty_json(content) {
        view = view.with(Block::Code { lang: "json", text: pretty });
    }
    Ok(view)
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    #[serde(default)]
    path: String,
    #[serde(default, rename = "file_text", alias = "fileText")]
    file_text: String,
}

fn render_create(arguments: &str, _content: &str) -> serde_json::Result<ToolView> {
    let args: CreateArgs = parse(arguments)?;
    Ok(
        ToolView::titled(format!("Create: {}", relative_file_path(&args.path))).with(Block::File {
            path: args.path,
            content: args.file_text,
        }),
    )
}

#[derive(Debug, Deserialize)]
struct StrReplaceArgs {
    #[serde(default)]
    path: String,
    #[serde(default, rename = "old_str", alias = "oldStr")]
    old_str: String,
    #[serde(default, rename = "new_str", alias = "newStr")]
    new_str: String,
}

fn render_str_replace(arguments: &str, content: &str) -> serde_json::Result<ToolView> {
    let args: StrReplaceArgs = parse(arguments)?;
    tracing::debug!(
        path = %args.path,
        old_len = args.old_str.len(),
        new_len = args.new_str.len(),
        "str_replace"
    );
    Ok(
        ToolView::titled(format!("Edit: {}", relative_file_path(&args.path))).with(Block::Code {
            lang: "diff",
            text: content.to_string(),
        }),
    )
}

/// Fallback for tools without a dedicated renderer. Arguments and output are
/// shown only when they are valid JSON.
pub fn render_generic(name: &str, arguments: &str, content: &str) -> ToolView {
    let mut view = ToolView::titled(generic_tool_title(name));
    if let Some(pretty) = pretty_json(arguments) {
        view = view.with(Block::Json { label: "Input:", pretty });
    }
    if let Some(pretty) = pretty_json(content) {
        view = view.with(Block::Json { label: "Output:", pretty });
    }
    view
}

fn pretty_json(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
