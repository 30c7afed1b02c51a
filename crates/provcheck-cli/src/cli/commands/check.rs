use anyhow::Context;
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use provcheck_core::report::run_batch;
use provcheck_core::ReportError;

use crate::cli::args::CheckArgs;
use crate::exit_codes;

pub fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let root = match args.root {
        Some(root) => root,
        None => prompt_root()?,
    };

    match run_batch(&root, &args.pattern) {
        Ok(report) => {
            print!("{}", report.render());
            if !args.no_wait {
                pause("\nPress Enter to exit...")?;
            }
            Ok(exit_codes::SUCCESS)
        }
        Err(e @ (ReportError::InvalidRoot { .. } | ReportError::NoMatchingFolders { .. })) => {
            println!("{e}");
            if !args.no_wait {
                pause("Press Enter to exit...")?;
            }
            Ok(exit_codes::FAILURE)
        }
        Err(e) => Err(e).with_context(|| format!("failed to check {}", root.display())),
    }
}

const ROOT_PROMPT: &str = "Enter the path to the directory containing the Aikri folders";

/// Interactive prompt on a terminal; one plain line from piped stdin otherwise.
fn prompt_root() -> anyhow::Result<PathBuf> {
    let answer: String = if std::io::stdin().is_terminal() {
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt(ROOT_PROMPT)
            .allow_empty(true)
            .interact_text()
            .context("failed to read directory path")?
    } else {
        let mut stdout = std::io::stdout();
        write!(stdout, "{ROOT_PROMPT}: ")?;
        stdout.flush()?;
        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("failed to read directory path")?;
        println!();
        line
    };
    Ok(PathBuf::from(answer.trim()))
}

fn pause(prompt: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
