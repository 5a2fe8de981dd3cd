use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use myday_core::{Task, TaskId};

#[derive(Debug, Parser)]
#[command(name = "myday", version, about = "Personal to-do list service and client")]
pub struct Cli {
    /// Base URL of a running myday service (client commands only).
    #[arg(long, global = true, env = "MYDAY_URL", default_value = "http://127.0.0.1:5000")]
    pub url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (default).
    Serve {
        /// Settings file; defaults to $MYDAY_CONFIG or ~/.myday/settings.json.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print every task.
    List,
    /// Add a task.
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Mark a task completed.
    Done { id: TaskId },
    /// Mark a task not completed.
    Undo { id: TaskId },
    /// Change a task's title.
    Rename {
        id: TaskId,
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Delete a task.
    Rm { id: TaskId },
}

/// Join words into a title, refusing blank input.
pub fn title_from_words(words: &[String]) -> anyhow::Result<String> {
    let title = words.join(" ");
    if title.trim().is_empty() {
        anyhow::bail!("title must not be empty");
    }
    Ok(title)
}

/// One line per task plus a pending count.
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    if tasks.is_empty() {
        out.push_str("No tasks yet.\n");
    }
    for task in tasks {
        let mark = if task.is_completed { "x" } else { " " };
        let time = task.created_at.with_timezone(&Local).format("%I:%M %p");
        out.push_str(&format!("[{mark}] {:>4}  {}  ({time})\n", task.id, task.title));
    }
    let pending = tasks.iter().filter(|t| !t.is_completed).count();
    out.push_str(&format!("{pending} pending\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: i64, title: &str, done: bool) -> Task {
        Task {
            id: TaskId::new(id),
            title: title.into(),
            is_completed: done,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parses_default_to_no_command() {
        let cli = Cli::try_parse_from(["myday"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_client_commands() {
        let cli = Cli::try_parse_from(["myday", "--url", "http://h:1", "rename", "3", "Buy", "oat", "milk"])
            .unwrap();
        assert_eq!(cli.url, "http://h:1");
        match cli.command {
            Some(Command::Rename { id, title }) => {
                assert_eq!(id, TaskId::new(3));
                assert_eq!(title_from_words(&title).unwrap(), "Buy oat milk");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["myday", "done", "abc"]).is_err());
    }

    #[test]
    fn blank_titles_are_refused() {
        assert!(title_from_words(&["  ".to_string()]).is_err());
        assert!(title_from_words(&[]).is_err());
    }

    #[test]
    fn render_marks_completed_and_counts_pending() {
        let out = render_tasks(&[task(1, "Buy milk", true), task(2, "Walk", false)]);
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("[x]"));
        assert!(lines[0].contains("Buy milk"));
        assert!(lines[1].starts_with("[ ]"));
        assert_eq!(lines[2], "1 pending");
    }

    #[test]
    fn render_empty_list() {
        assert_eq!(render_tasks(&[]), "No tasks yet.\n0 pending\n");
    }
}
