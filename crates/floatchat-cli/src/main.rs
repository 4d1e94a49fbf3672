// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use floatchat_app::{AppState, ViewKind};
use runtime::FixtureRuntime;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    logging::init_logging()?;

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `floatchat --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let start_view = match options.start_view {
        Some(view) => view,
        None => config.start_view()?,
    };
    let mut runtime = FixtureRuntime::from_config(&config).with_context(|| {
        format!(
            "invalid settings in {}; fix the values reported above",
            options.config_path.display()
        )
    })?;
    info!(
        config = %options.config_path.display(),
        view = start_view.label(),
        "floatchat starting"
    );

    if options.check_only {
        return Ok(());
    }

    if let Some(query) = &options.ask {
        match runtime.ask(query) {
            Some(reply) => {
                println!("{}", reply.content);
                for suggestion in &reply.suggestions {
                    println!("  → {suggestion}");
                }
            }
            None => debug!("blank --ask question ignored"),
        }
        return Ok(());
    }

    if options.export {
        let path = runtime.export_default().with_context(|| {
            format!(
                "export to {}; set [export].dir to a writable directory",
                runtime.export_dir().display()
            )
        })?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut state = AppState::starting_at(start_view);
    floatchat_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    start_view: Option<ViewKind>,
    ask: Option<String>,
    export: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        start_view: None,
        ask: None,
        export: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--view" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--view requires one of chat, map, profiles or table")
                })?;
                let view = ViewKind::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown view {:?}; use one of chat, map, profiles or table",
                        value.as_ref()
                    )
                })?;
                options.start_view = Some(view);
            }
            "--ask" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--ask requires a question"))?;
                options.ask = Some(value.as_ref().to_owned());
            }
            "--export" => {
                options.export = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.ask.is_some() && options.export {
        return Err(anyhow!("--ask and --export cannot be combined; pick one"));
    }

    Ok(options)
}

fn print_help() {
    println!("floatchat");
    println!("  --config <path>          Use a specific config path");
    println!("  --view <name>            Open on chat, map, profiles or table");
    println!("  --ask <question>         Print one assistant reply and exit");
    println!("  --export                 Write the filtered float table as CSV and exit");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and exit");
    println!("  --help                   Show this help");
}
