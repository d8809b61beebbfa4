//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the HomeHelp CLI.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the HomeHelp banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "HomeHelp".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed(),
                "Trusted helpers for every home".bright_white()
            );
        } else {
            println!(
                "\n   HomeHelp v{}\n   Trusted helpers for every home\n",
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print the wizard progress bar, highlighting `current`
    pub fn progress(&self, labels: &[&str], current: usize) {
        let rendered: Vec<String> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cell = format!("{}. {}", i + 1, label);
                match (self.colored, i.cmp(&current)) {
                    (true, std::cmp::Ordering::Less) => cell.cyan().to_string(),
                    (true, std::cmp::Ordering::Equal) => cell.bright_cyan().bold().to_string(),
                    (true, std::cmp::Ordering::Greater) => cell.dimmed().to_string(),
                    (false, std::cmp::Ordering::Equal) => format!("[{}]", cell),
                    (false, _) => cell,
                }
            })
            .collect();
        println!("\n  {}", rendered.join("  >  "));
    }

    /// Print a file creation message
    pub fn created(&self, file_type: &str, path: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "✓".green().bold(),
                file_type.dimmed(),
                path.bright_white()
            );
        } else {
            println!("  [CREATED] {} {}", file_type, path);
        }
    }

    /// Print a file skipped message
    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            );
        } else {
            println!("  [SKIPPED] {} ({})", path, reason);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a numbered choice
    pub fn choice(&self, index: usize, item: &str) {
        if self.colored {
            println!("    {} {}", format!("{:>2})", index).bright_cyan(), item);
        } else {
            println!("    {:>2}) {}", index, item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print completion message
    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }

    /// Print one chat line. `own` marks the viewer's messages.
    pub fn chat_line(&self, time: &str, author: &str, body: &str, own: bool, system: bool) {
        if system {
            if self.colored {
                println!("  {} {}", time.dimmed(), body.italic().dimmed());
            } else {
                println!("  {} * {}", time, body);
            }
        } else if self.colored {
            let author = if own {
                author.bright_cyan().bold().to_string()
            } else {
                author.bright_white().bold().to_string()
            };
            println!("  {} {}: {}", time.dimmed(), author, body);
        } else {
            println!("  {} {}: {}", time, author, body);
        }
    }

    /// Print an input prompt without a trailing newline
    pub fn prompt(&self, message: &str) {
        if self.colored {
            print!("  {} {} ", "?".bright_yellow().bold(), message.bright_white());
        } else {
            print!("  [?] {} ", message);
        }
        io::stdout().flush().ok();
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header: String = columns
            .iter()
            .map(|c| format!("{:<18}", c))
            .collect::<Vec<_>>()
            .join(" ");
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(columns.len() * 19).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(columns.len() * 19));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[&str]) {
        let row: String = values
            .iter()
            .map(|v| format!("{:<18}", v))
            .collect::<Vec<_>>()
            .join(" ");
        println!("    {}", row);
    }
}
