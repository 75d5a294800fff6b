//! REPL (Read-Eval-Print Loop) for the interactive diagnosis chat

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::Spinner;
use colored::Colorize;
use leafscan_application::{ChatManager, ImagePicker, ImageSource};
use leafscan_domain::Message;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::Path;
use std::sync::Arc;

/// Interactive diagnosis chat REPL
pub struct ChatRepl {
    manager: Arc<ChatManager>,
    picker: Arc<dyn ImagePicker>,
    camera: Arc<dyn ImageSource>,
    show_progress: bool,
}

impl ChatRepl {
    pub fn new(
        manager: Arc<ChatManager>,
        picker: Arc<dyn ImagePicker>,
        camera: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            manager,
            picker,
            camera,
            show_progress: true,
        }
    }

    /// Set whether to show progress spinners
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("leafscan").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.send_text(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "LeafScan - diagnosis chat".green().bold());
        println!("Type a message, or /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  /new                    Start a new session");
        println!("  /open <id>              Switch to a session");
        println!("  /sessions               List known sessions");
        println!("  /image <path> [text]    Send an image (with optional text)");
        println!("  /camera [text]          Capture from the camera and send");
        println!("  /analyze <path>         Run disease detection on an image");
        println!("  /quit                   Leave the chat");
    }

    /// Handle a slash command. Returns true when the REPL should exit.
    async fn handle_command(&self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let rest = parts.next().map(str::trim).unwrap_or("");

        match command {
            "/quit" | "/exit" => {
                println!("Bye!");
                return true;
            }
            "/help" => self.print_help(),
            "/new" => {
                let id = self.manager.start_session().await;
                println!("Started session {id}");
            }
            "/open" => {
                if rest.is_empty() {
                    println!("Usage: /open <session-id>");
                } else if self.manager.load_session(rest).await {
                    if let Some(session) = self.manager.current_session().await {
                        print!("{}", ConsoleFormatter::format_transcript(&session));
                    }
                } else {
                    println!("No session with id {rest}");
                }
            }
            "/sessions" => {
                let sessions = self.manager.history().await;
                if sessions.is_empty() {
                    println!("No sessions yet.");
                }
                for session in sessions {
                    println!("{}", ConsoleFormatter::format_session_line(&session));
                }
            }
            "/image" => {
                if rest.is_empty() {
                    println!("Usage: /image <path> [text]");
                } else {
                    let (path, text) = split_path_and_text(rest);
                    self.send_image_file(Path::new(path), text).await;
                }
            }
            "/camera" => {
                let text = if rest.is_empty() { None } else { Some(rest) };
                self.send_camera_image(text).await;
            }
            "/analyze" => {
                if rest.is_empty() {
                    println!("Usage: /analyze <path>");
                } else {
                    self.analyze_file(Path::new(rest)).await;
                }
            }
            other => println!("Unknown command {other}, try /help"),
        }
        false
    }

    fn spinner(&self, message: &str) -> Spinner {
        if self.show_progress {
            Spinner::start(message.to_string())
        } else {
            Spinner::disabled()
        }
    }

    async fn send_text(&self, text: &str) {
        let spinner = self.spinner("Sending...");
        let result = self.manager.send_text(text).await;
        spinner.finish();

        match result {
            Ok(reply) => print!("{}", ConsoleFormatter::format_message(&reply)),
            Err(e) => println!("{} {e}", "Error:".red().bold()),
        }
    }

    async fn send_image_file(&self, path: &Path, text: Option<&str>) {
        let uri = match self.picker.pick(path).await {
            Ok(uri) => uri,
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                return;
            }
        };

        let spinner = self.spinner("Sending image...");
        let result = self.manager.send_with_image(&uri.to_string(), text).await;
        spinner.finish();

        match result {
            Ok(reply) => print!("{}", ConsoleFormatter::format_message(&reply)),
            Err(e) => println!("{} {e}", "Error:".red().bold()),
        }
    }

    async fn send_camera_image(&self, text: Option<&str>) {
        let spinner = self.spinner("Capturing...");
        let captured = self.camera.acquire().await;
        spinner.finish();

        let uri = match captured {
            Ok(uri) => uri,
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                return;
            }
        };

        let spinner = self.spinner("Sending image...");
        let result = self.manager.send_with_image(&uri.to_string(), text).await;
        spinner.finish();

        match result {
            Ok(reply) => print!("{}", ConsoleFormatter::format_message(&reply)),
            Err(e) => println!("{} {e}", "Error:".red().bold()),
        }
    }

    async fn analyze_file(&self, path: &Path) {
        let uri = match self.picker.pick(path).await {
            Ok(uri) => uri.to_string(),
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                return;
            }
        };

        self.manager
            .add_message(Message::user_image(uri.clone(), None))
            .await;

        let spinner = self.spinner("Analyzing...");
        self.manager.analyze_image(&uri, None).await;
        spinner.finish();

        if let Some(session) = self.manager.current_session().await
            && let Some(reply) = session.messages().last()
        {
            print!("{}", ConsoleFormatter::format_message(reply));
        }
    }
}

/// Split `/image` arguments into the path and an optional trailing text.
fn split_path_and_text(rest: &str) -> (&str, Option<&str>) {
    match rest.split_once(' ') {
        Some((path, text)) if !text.trim().is_empty() => (path, Some(text.trim())),
        _ => (rest, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_path_only() {
        assert_eq!(split_path_and_text("leaf.png"), ("leaf.png", None));
    }

    #[test]
    fn split_path_with_text() {
        assert_eq!(
            split_path_and_text("leaf.png is this blight?"),
            ("leaf.png", Some("is this blight?"))
        );
    }
}
