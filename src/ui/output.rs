use owo_colors::OwoColorize;

/// Terminal printing, with colors switchable off for pipes and logs.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn banner(&self, backend: &str) {
        self.cyan("Agentic AI System - Interactive Mode");
        self.yellow(&format!("Backend: {}", backend));
        self.yellow("Type 'quit' or 'exit' to stop the program");
        self.yellow("Type 'help' to see example inputs");
        println!();
    }

    pub fn prompt_label(&self) -> String {
        if self.color {
            format!("{} ", "You:".green())
        } else {
            "You: ".to_string()
        }
    }

    pub fn results(&self, results: &[String]) {
        println!();
        if self.color {
            println!("{}", "Agent Results:".blue());
        } else {
            println!("Agent Results:");
        }

        if results.is_empty() {
            self.red("  No results generated");
        } else {
            for line in results {
                println!("  * {}", line);
            }
        }
        println!();
    }

    pub fn examples(&self, examples: &[&str], languages: &[&str]) {
        println!();
        self.cyan("Example Inputs:");
        for (i, example) in examples.iter().enumerate() {
            if self.color {
                println!("  {} {}", format!("{}.", i + 1).yellow(), example);
            } else {
                println!("  {}. {}", i + 1, example);
            }
        }
        println!();
        self.yellow(&format!("Translation targets include: {}", languages.join(", ")));
        println!();
    }

    pub fn goodbye(&self) {
        self.cyan("Goodbye!");
    }

    pub fn error(&self, message: &str) {
        self.red(&format!("Error: {}", message));
    }

    fn cyan(&self, text: &str) {
        if self.color {
            println!("{}", text.cyan());
        } else {
            println!("{}", text);
        }
    }

    fn yellow(&self, text: &str) {
        if self.color {
            println!("{}", text.yellow());
        } else {
            println!("{}", text);
        }
    }

    fn red(&self, text: &str) {
        if self.color {
            println!("{}", text.red());
        } else {
            println!("{}", text);
        }
    }
}
