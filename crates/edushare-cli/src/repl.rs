//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{Cli, Command};
use crate::commands::dispatch;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session_store::SessionStore;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub async fn run_repl(
    config: &mut Config,
    store: &SessionStore,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("EduShare REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = match store.load() {
            Ok(Some(session)) => format!("edushare ({})> ", session.username),
            _ => "edushare (logged out)> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match line {
                    "exit" | "quit" => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    "help" => print_help(formatter),
                    _ => match parse_repl_command(line) {
                        Ok(cmd) => {
                            if let Err(e) = dispatch(cmd, config, store, formatter).await {
                                eprintln!("{}", formatter.error(&e.to_string()));
                            }
                        }
                        Err(e) => {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    let _ = editor.save_history(&history_path);

    Ok(())
}

/// Parse a REPL line through the regular clap definitions.
fn parse_repl_command(line: &str) -> Result<Command> {
    let words = std::iter::once("edushare".to_string()).chain(split_line(line)?);
    let cli = Cli::try_parse_from(words)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    cli.command
        .ok_or_else(|| CliError::InvalidInput("No command given".to_string()))
}

/// Split a line into arguments, honoring single and double quotes so
/// multi-word values like `--title "Lesson One"` survive as one argument.
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CliError::InvalidInput("Unterminated quote".to_string()));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dir = home.join(".edushare");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!("  login <username>            Log in and store the session");
    println!("  logout                      Discard the stored session");
    println!("  whoami                      Show the logged-in user");
    println!("  connections [--tab <t>]     incoming / sent / connected lists");
    println!("  connect <user-id>           Send a connection request");
    println!("  accept|reject <request-id>  Answer an incoming request");
    println!("  cancel <request-id>         Withdraw a sent request");
    println!("  remove <connection-id>      Remove a connection");
    println!("  educators [--search <q>]    Browse educators");
    println!("  profile [user-id]           Show a profile");
    println!("  resources <subcommand>      Browse and manage resources");
    println!("  downloads | saved | ratings Your activity lists");
    println!("  feedback                    Ratings received on your uploads");
    println!("  dashboard                   Activity overview");
    println!("  config <subcommand>         Manage connection profiles");
    println!("  help                        Show this help");
    println!("  exit                        Leave the REPL");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let cmd = parse_repl_command("whoami").unwrap();
        assert!(matches!(cmd, Command::Whoami));
    }

    #[test]
    fn test_parse_command_with_args() {
        let cmd = parse_repl_command("connect 42").unwrap();
        match cmd {
            Command::Connect(args) => assert_eq!(args.user_id, 42),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_repl_command("frobnicate").is_err());
    }

    #[test]
    fn test_parse_keeps_quoted_arguments_whole() {
        let cmd = parse_repl_command(
            "resources upload lesson.pdf --title \"Lesson One\" --subject Math --grade-level 5",
        )
        .unwrap();
        match cmd {
            Command::Resources(args) => match args.action {
                crate::cli::ResourceAction::Upload(upload) => {
                    assert_eq!(upload.title, "Lesson One");
                    assert_eq!(upload.subject, "Math");
                }
                other => panic!("unexpected action: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_split_line_quoting() {
        assert_eq!(
            split_line("educators --search \"springfield high\"").unwrap(),
            vec!["educators", "--search", "springfield high"]
        );
        assert_eq!(
            split_line("rate 3 5 --comment 'loved it'").unwrap(),
            vec!["rate", "3", "5", "--comment", "loved it"]
        );
        // Adjacent quoted and bare text form one argument.
        assert_eq!(split_line("a\"b c\"d").unwrap(), vec!["ab cd"]);
        // Empty quotes still produce an argument.
        assert_eq!(split_line("settings --bio \"\"").unwrap(), vec![
            "settings", "--bio", ""
        ]);
        assert!(split_line("profile \"unterminated").is_err());
    }
}
