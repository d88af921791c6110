//! Line commands read from stdin

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Increment(i64),
    Decrement(i64),
    Reset,
    Show,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse(line: &str, default_step: i64) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();
    if let Some(extra) = words.next() {
        bail!("Unexpected argument '{}'", extra);
    }

    let amount = || -> Result<i64> {
        match argument {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid amount '{}'", value)),
            None => Ok(default_step),
        }
    };
    let no_argument = |command: Command| -> Result<Command> {
        match argument {
            Some(value) => bail!("'{}' takes no argument, got '{}'", verb, value),
            None => Ok(command),
        }
    };

    let command = match verb {
        "inc" | "+" => Command::Increment(amount()?),
        "dec" | "-" => Command::Decrement(amount()?),
        "reset" => no_argument(Command::Reset)?,
        "show" => no_argument(Command::Show)?,
        "quit" | "exit" => no_argument(Command::Quit)?,
        other => bail!("Unknown command '{}'", other),
    };
    Ok(Some(command))
}
