//! One-shot interactive prompts for credentials.

use rustyline::DefaultEditor;
use rustyline::Result as RlResult;

/// Read a single line interactively. The input is echoed; callers warn the
/// user when prompting for secrets.
pub fn prompt_line(label: &str) -> RlResult<String> {
    let mut editor = DefaultEditor::new()?;
    let line = editor.readline(label)?;
    Ok(line.trim().to_string())
}
