use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

mod commands;
mod config;
mod counter;
mod logger;

use commands::Command;
use config::DemoConfig;
use counter::Counter;

fn main() -> Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting counter-demo");

    let config = DemoConfig::load();
    let counter = Counter::mount(&config).context("Failed to mount counter store")?;

    println!("counter-demo: inc [n], dec [n], reset, show, quit");
    println!("logging to {}", log_file.display());

    let result = run(&counter, &config);

    log::info!("Exiting counter-demo");
    result
}

fn run(counter: &Counter, config: &DemoConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_state(&mut stdout, counter)?;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        let command = match commands::parse(&line, config.default_step) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {:#}", e)?;
                continue;
            }
        };

        let outcome = match command {
            Command::Increment(n) => counter.increment(n),
            Command::Decrement(n) => counter.decrement(n),
            Command::Reset => counter.reset(),
            Command::Show => Ok(()),
            Command::Quit => break,
        };

        if let Err(e) = outcome {
            writeln!(stdout, "error: {}", e)?;
            continue;
        }
        print_state(&mut stdout, counter)?;
    }

    Ok(())
}

fn print_state(out: &mut impl Write, counter: &Counter) -> Result<()> {
    let json = serde_json::to_string(&counter.state()).context("Failed to serialize state")?;
    writeln!(out, "{}", json)?;
    Ok(())
}
