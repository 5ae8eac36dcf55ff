use rustyline::DefaultEditor;

use crate::config::ShellConfig;
use crate::core::commands::{Dispatcher, Flow};
use crate::core::env::{Environment, OsEnvironment};
use crate::core::expander::expand_tokens;
use crate::core::prompt;
use crate::core::tokenizer::tokenize;
use crate::error::ShellError;

/// The interactive read-eval loop: rustyline-backed line editing over the
/// same tokenize/expand/dispatch pipeline the script runner drives.
pub struct Shell {
    editor: DefaultEditor,
    config: ShellConfig,
    env: OsEnvironment,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;

        // Covers interrupts delivered while no readline is pending.
        ctrlc::set_handler(move || {
            println!("\nType 'exit' to quit.");
        })?;

        Ok(Shell {
            editor,
            config,
            env: OsEnvironment::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        println!("Welcome to Simple Shell Emulator! Type 'exit' to quit.");

        loop {
            let prompt = prompt::current_prompt(&self.env);
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    // In-session history only; nothing is persisted.
                    if let Err(e) = self.editor.add_history_entry(line) {
                        eprintln!("Warning: Couldn't add to history: {}", e);
                    }

                    if run_line(line, &self.config, &self.env) == Flow::Exit {
                        break;
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("Type 'exit' to quit.");
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("Exiting...");
                    break;
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    continue;
                }
            }
        }
        Ok(())
    }
}

/// Runs one already-trimmed, non-empty line. A syntax error is reported
/// and the loop keeps going; only dispatch decides termination.
fn run_line(line: &str, config: &ShellConfig, env: &dyn Environment) -> Flow {
    let tokens = match tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            println!("Syntax error: {}", e);
            return Flow::Continue;
        }
    };

    let args = expand_tokens(&tokens, env);
    Dispatcher::new(config, env).dispatch(&args)
}
