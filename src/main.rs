/*
 * ==========================================================================
 * LUNA - Scripting Language Front End
 * ==========================================================================
 * 
 * License:
 * This file is part of the LUNA scripting language project.
 * 
 * LUNA is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

//! The `luna` command: lexes and parses a script, then prints its
//! statement trees or its token list.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser as ClapParser};
use tracing_subscriber::EnvFilter;

use luna::{Context, DiagnosticPrinter, LunaConfig, LunaError, Source, TraceLevel};

#[derive(Debug, ClapParser)]
#[command(name = "luna", about = "LUNA scripting language front end")]
struct Cli {
    /// Script to read
    script: PathBuf,

    /// JSON config file (seed, trace level)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print the token list instead of statement trees
    #[arg(long)]
    tokens: bool,

    /// Prefix every token with its id
    #[arg(long)]
    verbose_ids: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let file_name = cli.script.display().to_string();

    let config = match cli.config.as_deref().map(LunaConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            DiagnosticPrinter::new(file_name, "").print(&err.into());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for(cli.verbose, config.trace))),
        )
        .with_writer(std::io::stderr)
        .init();

    let source = match Source::from_file(&cli.script) {
        Ok(source) => source,
        Err(err) => {
            DiagnosticPrinter::new(file_name, "").print(&err.into());
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            DiagnosticPrinter::new(file_name, source.text()).print(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &LunaConfig, source: &Source) -> Result<(), LunaError> {
    let context = Context::new(config);

    if cli.tokens {
        let mut lexer = context.lexer(source)?;
        lexer.discover()?;
        for position in 0..=lexer.len() + 1 {
            println!("{}", lexer.token_at(position)?.render(cli.verbose_ids));
        }
        return Ok(());
    }

    let mut parser = context.parser(source)?;
    while parser.has_next_statement() {
        parser.move_next_statement(false)?;
        if parser.has_next_statement() {
            println!("{}\n", parser.render(cli.verbose_ids)?);
        }
    }
    Ok(())
}

/// The default filter when `RUST_LOG` is unset.
///
/// `-v` flags win over the config file's trace level.
fn directive_for(verbose: u8, trace: TraceLevel) -> String {
    match verbose {
        0 => format!("luna={}", trace.directive()),
        1 => "luna=debug".to_string(),
        _ => "luna=trace".to_string(),
    }
}
