//! Colored terminal output and interactive prompts

use std::io::{self, BufRead, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct Console {
    out: StandardStream,
}

impl Console {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            out: StandardStream::stdout(choice),
        }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan)).set_bold(true);
        self.out.set_color(&spec)?;
        writeln!(self.out, "pypack - Python Project Cleaner & Packager")?;
        self.out.reset()?;
        writeln!(self.out)
    }

    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Cyan, "i", message)
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Green, "+", message)
    }

    pub fn warn(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Yellow, "!", message)
    }

    fn line(&mut self, color: Color, prefix: &str, message: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(self.out, "[{}] ", prefix)?;
        self.out.reset()?;
        writeln!(self.out, "{}", message)
    }

    /// Ask a yes/no question, re-prompting until the answer is recognizable.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            write!(self.out, "{} [y/n]: ", question)?;
            self.out.flush()?;

            let mut answer = String::new();
            io::stdin().lock().read_line(&mut answer)?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.out, "Please enter 'y' or 'n'")?,
            }
        }
    }

    pub fn ask_input(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.out, "{}: ", prompt)?;
        self.out.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }
}

/// Human-readable byte count, e.g. "3.42 MB".
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.2} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes / KB)
    } else {
        format!("{} B", bytes as u64)
    }
}
