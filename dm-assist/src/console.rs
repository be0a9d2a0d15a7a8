//! Line-oriented console for the DM assistant.
//!
//! Reads one command per line from stdin, prints the reply to stdout and
//! keeps going until `quit` or end of input. Add and edit commands ask
//! their follow-up questions through the same stdin.

use dm_core::{Interpreter, Prompter};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "\nWhat do you want to know? (e.g., perception check, Spike worship, \
god of greed, Riverside taverns, add character, help, quit)\n> ";

/// Print `prompt` and read one line. `None` at end of input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Answers interactive questions from stdin.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        read_line(question)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input closed during entry")
        })
    }
}

/// Run the command loop until `quit` or end of input.
pub async fn run(interpreter: &mut Interpreter<StdinPrompter>) -> io::Result<()> {
    println!("=== DM Assistant ===");
    println!("Type 'help' for the list of commands.");

    loop {
        let Some(line) = read_line(PROMPT)? else {
            println!();
            println!("Goodbye!");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.interpret(&line).await {
            Ok(reply) => {
                for text in &reply.lines {
                    println!("{text}");
                }
                if !reply.continue_session {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, command = %line, "command failed");
                println!("Error: {e}");
            }
        }
    }
    Ok(())
}
