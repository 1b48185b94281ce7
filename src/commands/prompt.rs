//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

use super::{CommandError, ExitStatus};

/// Asks the user before a step goes ahead.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    /// Whether the user agreed to `question`.
    fn confirm(&self, question: &str) -> bool;
}

/// Prompts on stdout and reads the answer from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        ask(&mut io::stdin().lock(), &mut io::stdout().lock(), question).unwrap_or(false)
    }
}

/// Agrees to everything (`--yes`).
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

/// The confirmation to use for a command's `--yes` flag.
#[must_use]
pub fn for_flag(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    }
}

/// Ask `question`, failing with [`ExitStatus::UserCancelled`] on "no".
///
/// # Errors
///
/// Returns a [`CommandError`] when the user declines.
pub fn require(confirm: &dyn Confirm, question: &str) -> Result<(), CommandError> {
    if confirm.confirm(question) {
        Ok(())
    } else {
        Err(CommandError::new(
            ExitStatus::UserCancelled,
            "cancelled by user",
        ))
    }
}

/// Write `question` to `output` and read answers from `input` until one is
/// `yes`, `y`, `no` or `n` (any case).  End of input counts as "no".
///
/// # Errors
///
/// Returns any I/O error from reading or writing.
pub fn ask<R, W>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(output, "{question} [yes/no]: ")?;
    output.flush()?;
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }
        if let Some(answer) = parse_answer(&line) {
            return Ok(answer);
        }
        write!(
            output,
            "'{}' isn't a valid answer (yes, y, no, n): ",
            line.trim()
        )?;
        output.flush()?;
    }
}

fn parse_answer(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}
