use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;

use purge::cleaner::PurgeEngine;
use purge::cli::args::{Cli, CompletionShell, OutputFormat};
use purge::cli::output;
use purge::common::format;
use purge::common::PurgeError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("purge=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Invalid root is 1; anything else that aborts the walk is 2.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PurgeError>()
        .map(|e| e.exit_code() as u8)
        .filter(|code| *code != 0)
        .unwrap_or(2)
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        print_completions(shell);
        return Ok(());
    }

    let Some(family) = cli.family else {
        use clap::CommandFactory;
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "--family is required unless --completions is given",
            )
            .exit();
    };
    let rules = cli.rule_set(family)?;

    let human = cli.format == OutputFormat::Human;
    if human {
        output::print_header(&cli.root, family, cli.dry_run);
    }

    let spinner = if human && !cli.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} Scanning... {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = PurgeEngine::new(&rules)
        .dry_run(cli.dry_run)
        .run_with(&cli.root, |record| {
            if !human {
                return;
            }
            let line = output::record_line(record, cli.dry_run, cli.verbose);
            match (&spinner, line) {
                (Some(pb), Some(line)) => {
                    pb.set_message(format::truncate(&record.relative.display().to_string(), 40));
                    pb.suspend(|| println!("{}", line));
                }
                (Some(pb), None) => {
                    pb.set_message(format::truncate(&record.relative.display().to_string(), 40));
                }
                (None, Some(line)) => println!("{}", line),
                (None, None) => {}
            }
        });

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    let result = result.with_context(|| format!("Purge of {} failed", cli.root.display()))?;

    match cli.format {
        OutputFormat::Human => output::print_summary(&result),
        OutputFormat::Json => output::print_json(&result)?,
        OutputFormat::Quiet => output::print_quiet(&result),
    }

    Ok(())
}

fn print_completions(shell: CompletionShell) {
    use clap::CommandFactory;
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => clap_complete::Shell::Bash,
        CompletionShell::Zsh => clap_complete::Shell::Zsh,
        CompletionShell::Fish => clap_complete::Shell::Fish,
    };
    clap_complete::generate(shell, &mut cmd, "purge", &mut std::io::stdout());
}
