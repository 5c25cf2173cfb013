//! Interactive line-editing shell over a session.

use anyhow::Context;
use clap::Parser;
use foodiary_core::{Command, FoodDiaryStorage};
use log::{info, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands::Invocation;
use crate::parser::ShellLine;
use crate::session::Session;

const PROMPT: &str = "foodiary> ";

/// What the shell should do with one entered line.
#[derive(Debug)]
enum LineAction {
    Skip,
    Exit,
    Run(Box<dyn Command>),
    Reject(String),
}

fn interpret(line: &str) -> LineAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineAction::Skip;
    }
    if matches!(trimmed, "exit" | "quit") {
        return LineAction::Exit;
    }
    let parsed = match ShellLine::try_parse_from(trimmed.split_whitespace()) {
        Ok(parsed) => parsed,
        Err(err) => return LineAction::Reject(err.render().to_string()),
    };
    match parsed.command.into_invocation() {
        Ok(Invocation::Shell) => LineAction::Reject("Already in the shell.".to_string()),
        Ok(Invocation::Run(command)) => LineAction::Run(command),
        Err(err) => LineAction::Reject(err.to_string()),
    }
}

/// What the shell prints for one entered line.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Silent,
    Print(String),
    Exit,
}

/// Runs one entered line against `session`.
///
/// Every non-blank line is recorded in the session history after it is
/// handled, including lines that failed to parse.
fn respond<S: FoodDiaryStorage>(session: &mut Session<S>, line: &str) -> Reply {
    let text = match interpret(line) {
        LineAction::Skip => return Reply::Silent,
        LineAction::Exit => return Reply::Exit,
        LineAction::Reject(message) => message.trim_end().to_string(),
        LineAction::Run(command) => match session.execute(command.as_ref()) {
            Ok(outcome) => session.describe(command.as_ref(), &outcome),
            Err(err) => err.to_string(),
        },
    };
    session.history_mut().add(line.trim());
    match session.save_if_changed() {
        Ok(_) => Reply::Print(text),
        Err(err) => {
            warn!("event=shell_save module=cli status=error error={err}");
            Reply::Print(format!("{text}\nCould not save the food diary: {err}"))
        }
    }
}

/// Reads lines until `exit`, end of input or interrupt.
pub fn run<S: FoodDiaryStorage>(session: &mut Session<S>) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    info!("event=shell_start module=cli status=ok");
    println!("Type a command, `--help` for the list, or `exit` to leave.");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read shell input"),
        };
        let _ = editor.add_history_entry(line.as_str());

        match respond(session, &line) {
            Reply::Silent => continue,
            Reply::Exit => break,
            Reply::Print(text) => println!("{text}"),
        }
    }

    info!("event=shell_stop module=cli status=ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{interpret, respond, LineAction, Reply};
    use crate::session::Session;
    use foodiary_core::JsonFoodDiaryStorage;

    fn session_in(dir: &tempfile::TempDir) -> Session<JsonFoodDiaryStorage> {
        Session::open(JsonFoodDiaryStorage::new(dir.path().join("diary.json")))
    }

    #[test]
    fn blank_and_exit_lines_are_handled_locally() {
        assert!(matches!(interpret("   "), LineAction::Skip));
        assert!(matches!(interpret("exit"), LineAction::Exit));
        assert!(matches!(interpret(" quit "), LineAction::Exit));
    }

    #[test]
    fn nested_shell_is_rejected() {
        assert!(matches!(interpret("shell"), LineAction::Reject(_)));
    }

    #[test]
    fn unknown_words_and_bad_values_are_rejected() {
        assert!(matches!(interpret("launch"), LineAction::Reject(_)));
        match interpret("rate 1 7") {
            LineAction::Reject(message) => assert!(message.contains("Ratings")),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn valid_line_yields_command() {
        match interpret("select 2") {
            LineAction::Run(command) => assert_eq!(command.word(), "select"),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn rejected_lines_are_recorded_in_history() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = session_in(&dir);

        assert!(matches!(respond(&mut session, "launch"), Reply::Print(_)));
        assert_eq!(respond(&mut session, "   "), Reply::Silent);
        assert_eq!(respond(&mut session, "exit"), Reply::Exit);

        match respond(&mut session, "history") {
            Reply::Print(text) => assert!(text.contains("launch")),
            other => panic!("unexpected reply: {other:?}"),
        }
        match respond(&mut session, "history") {
            Reply::Print(text) => {
                let lines: Vec<&str> = text.lines().skip(1).collect();
                assert_eq!(lines, vec!["history", "launch"]);
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn visit_web_line_prints_selected_link() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = session_in(&dir);
        match respond(&mut session, "visitWeb 1") {
            Reply::Print(text) => {
                assert!(text.ends_with("Open in browser: https://www.kfc.com.sg"))
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
