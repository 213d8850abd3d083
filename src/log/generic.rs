/// Display titles for tools that have no dedicated renderer, mostly MCP
/// servers the agent is wired to.
static GENERIC_TOOL_TITLES: &[(&str, &str)] = &[
    // Playwright browser automation
    ("playwright-browser_close", "Close Playwright web browser"),
    ("playwright-browser_resize", "Resize Playwright web browser window"),
    ("playwright-browser_console_messages", "Get Playwright web browser console messages"),
    ("playwright-browser_handle_dialog", "Handle dialog in Playwright web browser"),
    ("playwright-browser_evaluate", "Run JavaScript in Playwright web browser"),
    ("playwright-browser_file_upload", "Upload file in Playwright web browser"),
    ("playwright-browser_install", "Install Playwright web browser"),
    ("playwright-browser_press_key", "Press key in Playwright web browser"),
    ("playwright-browser_type", "Type text in Playwright web browser"),
    ("playwright-browser_navigate", "Navigate Playwright web browser to a URL"),
    ("playwright-browser_navigate_back", "Navigate back in Playwright web browser"),
    ("playwright-browser_navigate_forward", "Navigate forward in Playwright web browser"),
    ("playwright-browser_network_requests", "Get Playwright web browser network requests"),
    ("playwright-browser_take_screenshot", "Take screenshot of Playwright web browser"),
    ("playwright-browser_snapshot", "Take snapshot of Playwright web browser page"),
    ("playwright-browser_click", "Click element in Playwright web browser"),
    ("playwright-browser_drag", "Drag mouse between elements in Playwright web browser"),
    ("playwright-browser_hover", "Hover mouse over element in Playwright web browser"),
    ("playwright-browser_select_option", "Select option in Playwright web browser"),
    ("playwright-browser_tab_list", "List tabs in Playwright web browser"),
    ("playwright-browser_tab_new", "Open new tab in Playwright web browser"),
    ("playwright-browser_tab_select", "Select tab in Playwright web browser"),
    ("playwright-browser_tab_close", "Close tab in Playwright web browser"),
    ("playwright-browser_wait_for", "Wait for text to appear or disappear in Playwright web browser"),
    // GitHub MCP server
    ("github-mcp-server-get_file_contents", "Get file contents from GitHub"),
    ("github-mcp-server-get_commit", "Get commit from GitHub"),
    ("github-mcp-server-list_commits", "List commits on GitHub"),
    ("github-mcp-server-list_branches", "List branches on GitHub"),
    ("github-mcp-server-list_tags", "List tags on GitHub"),
    ("github-mcp-server-get_tag", "Get tag from GitHub"),
    ("github-mcp-server-search_code", "Search code on GitHub"),
    ("github-mcp-server-search_repositories", "Search repositories on GitHub"),
    ("github-mcp-server-search_users", "Search users on GitHub"),
    ("github-mcp-server-get_issue", "Get issue from GitHub"),
    ("github-mcp-server-get_issue_comments", "Get issue comments from GitHub"),
    ("github-mcp-server-list_issues", "List issues on GitHub"),
    ("github-mcp-server-search_issues", "Search issues on GitHub"),
    ("github-mcp-server-get_pull_request", "Get pull request from GitHub"),
    ("github-mcp-server-list_pull_requests", "List pull requests on GitHub"),
    ("github-mcp-server-get_pull_request_files", "Get pull request changed files from GitHub"),
    ("github-mcp-server-get_pull_request_diff", "Get pull request diff from GitHub"),
    ("github-mcp-server-get_pull_request_comments", "Get pull request comments from GitHub"),
    ("github-mcp-server-get_pull_request_reviews", "Get pull request reviews from GitHub"),
    ("github-mcp-server-get_pull_request_status", "Get pull request status from GitHub"),
    ("github-mcp-server-list_workflows", "List GitHub Actions workflows"),
    ("github-mcp-server-list_workflow_runs", "List GitHub Actions workflow runs"),
    ("github-mcp-server-get_workflow_run", "Get GitHub Actions workflow run"),
    ("github-mcp-server-list_workflow_jobs", "List GitHub Actions workflow jobs"),
    ("github-mcp-server-get_job_logs", "Get GitHub Actions job logs"),
    ("github-mcp-server-get_workflow_run_logs", "Get GitHub Actions workflow run logs"),
    ("github-mcp-server-download_workflow_run_artifact", "Download GitHub Actions workflow run artifact"),
];

/// Title for a tool without a dedicated renderer.
pub fn generic_tool_title(name: &str) -> String {
    GENERIC_TOOL_TITLES
        .iter()
        .find(|(tool, _)| *tool == name)
        .map(|(_, title)| title.to_string())
        .unwrap_or_else(|| format!("Call to {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_tool_has_friendly_title() {
        assert_eq!(
            generic_tool_title("playwright-browser_navigate"),
            "Navigate Playwright web browser to a URL"
        );
        assert_eq!(
            generic_tool_title("github-mcp-server-get_file_contents"),
            "Get file contents from GitHub"
        );
    }

    #[test]
    fn unknown_tool_falls_back() {
        assert_eq!(generic_tool_title("unknown_tool_xyz"), "Call to unknown_tool_xyz");
    }

    #[test]
    fn table_has_no_duplicate_names() {
        let names: HashSet<_> = GENERIC_TOOL_TITLES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names.len(), GENERIC_TOOL_TITLES.len());
    }
}
