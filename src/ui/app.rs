use std::io::{self, BufRead, Write};

use tracing::{error, info};

use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::ui::output::Printer;

/// What one line typed at the prompt means.
#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleInput {
    Quit,
    Help,
    Blank,
    Request(String),
}

pub fn classify_input(line: &str) -> ConsoleInput {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "" => ConsoleInput::Blank,
        "quit" | "exit" | "q" => ConsoleInput::Quit,
        "help" => ConsoleInput::Help,
        _ => ConsoleInput::Request(line.to_string()),
    }
}

pub struct ConsoleApp {
    engine: Engine,
    printer: Printer,
}

impl ConsoleApp {
    pub fn new(engine: Engine, printer: Printer) -> Self {
        Self { engine, printer }
    }

    /// Handle a single request and print its results.
    pub fn run_once(&mut self, input: &str) {
        self.dispatch(EngineCommand::UserInput(input.to_string()));
    }

    /// Read-eval-print loop over stdin until quit or EOF.
    pub fn run_interactive(&mut self) {
        self.printer.banner(self.engine.backend_name());

        let stdin = io::stdin();
        let mut lines = stdin.lock();
        loop {
            print!("{}", self.printer.prompt_label());
            let _ = io::stdout().flush();

            let mut line = String::new();
            match lines.read_line(&mut line) {
                Ok(0) => {
                    println!();
                    self.finish();
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "failed to read console input");
                    self.printer.error(&e.to_string());
                    break;
                }
            }

            match classify_input(&line) {
                ConsoleInput::Quit => {
                    self.finish();
                    break;
                }
                ConsoleInput::Help => self.dispatch(EngineCommand::ShowHelp),
                ConsoleInput::Blank => continue,
                ConsoleInput::Request(text) => self.dispatch(EngineCommand::UserInput(text)),
            }
        }
    }

    fn finish(&self) {
        self.printer.goodbye();
        info!(interactions = self.engine.interaction_count(), "session ended");
    }

    fn dispatch(&mut self, cmd: EngineCommand) {
        match self.engine.handle(cmd) {
            EngineResponse::Processed(outcome) => self.printer.results(&outcome.results),
            EngineResponse::Help {
                examples,
                languages,
            } => self.printer.examples(&examples, &languages),
        }
    }
}
