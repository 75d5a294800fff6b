//! Console output formatter for sessions, messages, and diagnoses

use chrono::Local;
use colored::Colorize;
use leafscan_domain::{Diagnosis, Message, Role, Session};

/// Formats diagnosis conversations for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a diagnosis as a card: disease header, bulleted symptoms,
    /// numbered treatment steps.
    pub fn format_diagnosis(diagnosis: &Diagnosis) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Disease detected:".red().bold(),
            diagnosis.disease.bold()
        ));

        if !diagnosis.symptoms.is_empty() {
            output.push_str(&format!("\n{}\n", "Symptoms:".cyan().bold()));
            for symptom in &diagnosis.symptoms {
                output.push_str(&format!("  {} {}\n", "•".green(), symptom));
            }
        }

        if !diagnosis.treatment.is_empty() {
            output.push_str(&format!("\n{}\n", "Recommended treatment:".cyan().bold()));
            for (i, step) in diagnosis.treatment.iter().enumerate() {
                output.push_str(&format!("  {} {}\n", format!("{}.", i + 1).green(), step));
            }
        }

        output
    }

    /// Format one message as a transcript line (plus diagnosis card for AI
    /// diagnosis turns).
    pub fn format_message(message: &Message) -> String {
        let mut output = String::new();

        let speaker = match message.role() {
            Role::User => "you".green().bold(),
            Role::Ai => "leafscan".cyan().bold(),
        };
        let time = message
            .timestamp()
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string();
        output.push_str(&format!("{} {}", format!("[{time}]").dimmed(), speaker));

        if message.image().is_some() {
            output.push_str(&format!(" {}", "[image]".yellow()));
        }
        if let Some(text) = message.text() {
            output.push_str(&format!(" {text}"));
        }
        output.push('\n');

        if let Some(diagnosis) = message.diagnosis() {
            output.push_str(&Self::format_diagnosis(diagnosis));
        }

        output
    }

    /// Format a whole session transcript.
    pub fn format_transcript(session: &Session) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{}\n",
            format!(
                "── session {} · {} ──",
                session.id(),
                session.date().with_timezone(&Local).format("%Y-%m-%d %H:%M")
            )
            .dimmed()
        ));
        for message in session.messages() {
            output.push_str(&Self::format_message(message));
        }
        output
    }

    /// One-line summary for history listings.
    pub fn format_session_line(session: &Session) -> String {
        let date = session
            .date()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        let turns = session.messages().len();
        let preview = session
            .messages()
            .iter()
            .find_map(|m| m.diagnosis().map(|d| d.disease.clone()).or_else(|| m.text().map(str::to_string)))
            .unwrap_or_else(|| "(no messages)".to_string());

        format!(
            "{}  {}  {:>2} turn{}  {}",
            session.id().yellow(),
            date.to_string().dimmed(),
            turns,
            if turns == 1 { " " } else { "s" },
            preview
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_diagnosis() -> Diagnosis {
        Diagnosis::new(
            "Early Blight",
            vec!["Dark brown spots".to_string(), "Yellowing".to_string()],
            vec!["Remove infected parts".to_string()],
        )
    }

    #[test]
    fn diagnosis_card_lists_symptoms_and_treatment() {
        let output = ConsoleFormatter::format_diagnosis(&sample_diagnosis());
        assert!(output.contains("Early Blight"));
        assert!(output.contains("Dark brown spots"));
        assert!(output.contains("Remove infected parts"));
        assert!(output.contains("1."));
    }

    #[test]
    fn message_line_marks_images() {
        let message = Message::user_image("data:image/png;base64,AAAA", Some("what is this?".into()));
        let output = ConsoleFormatter::format_message(&message);
        assert!(output.contains("[image]"));
        assert!(output.contains("what is this?"));
    }

    #[test]
    fn session_line_prefers_disease_name_as_preview() {
        let mut session = Session::new();
        session.append(Message::user_text("checking my tomatoes"));
        session.append(Message::ai_diagnosis(sample_diagnosis()));

        let line = ConsoleFormatter::format_session_line(&session);
        assert!(line.contains("Early Blight"));
        assert!(line.contains("2 turns"));
    }
}
