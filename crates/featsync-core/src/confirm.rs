use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

pub trait InputSource {
    fn is_interactive(&self) -> bool;
    /// `Ok(None)` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    interactive: bool,
    lines: VecDeque<String>,
    reads: usize,
}

impl ScriptedInput {
    pub fn interactive<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interactive: true,
            lines: lines.into_iter().map(Into::into).collect(),
            reads: 0,
        }
    }

    pub fn non_interactive() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl InputSource for ScriptedInput {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        Ok(self.lines.pop_front())
    }
}

pub fn confirm_question(file: &str) -> String {
    format!("Inferred feature file: {file}. Use this? (y/N): ")
}

/// Ask a yes/no question once.
///
/// Non-interactive sources are refused without printing or reading anything.
/// Only `y`/`yes` (any case) confirm; empty input, end of input and read
/// failures all count as a refusal.
pub fn confirm(input: &mut dyn InputSource, prompt_out: &mut dyn Write, question: &str) -> bool {
    if !input.is_interactive() {
        tracing::debug!("stdin is not interactive; treating inferred file as unconfirmed");
        return false;
    }
    if write!(prompt_out, "{question}")
        .and_then(|_| prompt_out.flush())
        .is_err()
    {
        return false;
    }
    match input.read_line() {
        Ok(Some(line)) => is_affirmative(&line),
        Ok(None) => false,
        Err(err) => {
            tracing::debug!(error = %err, "failed to read confirmation");
            false
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}
