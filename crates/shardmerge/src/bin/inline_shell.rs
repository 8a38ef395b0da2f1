//! Interactive inline-expression shell.
//!
//! Each line is expanded and printed as a JSON array; failures print the
//! public error as JSON. `:metrics` prints the metrics report, `:reset`
//! clears it, and `:quit` (or Ctrl-D) exits.

use rustyline::{DefaultEditor, error::ReadlineError};
use serde::Serialize;
use shardmerge::{
    core::obs::{metrics_report, metrics_reset_all},
    evaluate_inline,
};

const PROMPT: &str = "inline> ";

fn main() -> Result<(), ReadlineError> {
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        editor.add_history_entry(input)?;

        match input {
            ":quit" | ":q" => break,
            ":metrics" => print_json(&metrics_report()),
            ":reset" => {
                metrics_reset_all();
                println!("metrics reset");
            }
            expression => match evaluate_inline(expression) {
                Ok(names) => print_json(&names),
                Err(err) => print_json(&err),
            },
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to encode output: {err}"),
    }
}
