use clap::Parser;
use crossterm::style::Stylize;
use hsk_core::config::{Cli, Command, PipelineConfig};
use hsk_core::filter;
use hsk_core::persistence;
use hsk_core::pipeline::{self, Report};
use hsk_core::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli.config(), cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &PipelineConfig, command: Command) -> Result<()> {
    match command {
        Command::Sandhi => sandhi(config)?,
        Command::Filter { mode, levels } => {
            let dataset = persistence::load_dataset(&config.dataset_path())?;
            let (report, _) = pipeline::run_filter(config, &dataset, mode, &levels)?;
            print_report(&report, "Words filtered");
        }
        Command::Minify { input } => {
            let (json, binary) = pipeline::run_minify(config, &input)?;
            print_report(&json, "Entries minified");
            if let Some(binary) = binary {
                print_report(&binary, "Entries encoded");
            }
        }
        Command::Process => process(config)?,
    }
    Ok(())
}

fn sandhi(config: &PipelineConfig) -> Result<()> {
    let (report, sample) = pipeline::run_sandhi(config)?;
    print_report(&report, "Entries processed");

    if let (Some(sample), true) = (sample, config.dry_run) {
        println!("\nSample sandhi field added ({}):", sample.headword);
        println!("  transcriptions.numeric: {}", sample.numeric);
        println!("  sandhi.numeric: {}", sample.sandhi);
    }
    Ok(())
}

fn process(config: &PipelineConfig) -> Result<()> {
    header("Processing main dataset");
    let dataset_path = config.dataset_path();
    let dataset = persistence::load_dataset(&dataset_path)?;
    pipeline::minify_entries(config, &dataset_path, &dataset)?;
    step("- Compressing list...       ");

    let mut current = String::new();
    pipeline::run_levels(config, &dataset, |scheme, out| {
        if scheme != current {
            println!();
            header(&format!("Processing {scheme} levels"));
            current = scheme.to_string();
        }
        println!("{}", format!("\tLevel: {}", filter::level_number(&out.tag)).yellow());
        step(&format!("\t\t- Exclusive list ({:>5})   ", out.exclusive.entries));
        step(&format!("\t\t- Inclusive list ({:>5})   ", out.inclusive.entries));
    })?;

    if config.dry_run {
        println!("\nDRY RUN: nothing was written under {}", config.root_dir.display());
    }
    Ok(())
}

fn header(title: &str) {
    let rule = "-".repeat(70);
    println!("{}", rule.as_str().bold().cyan());
    println!("{}", title.bold().cyan());
    println!("{}", rule.as_str().bold().cyan());
}

fn step(label: &str) {
    println!("{label}{}", " [ ✔ OK ]".green());
}

fn print_report(report: &Report, label: &str) {
    if report.written {
        println!("{} {}", "Wrote".green(), report.path.display());
    } else {
        println!("DRY RUN: Would write to {}", report.path.display());
    }
    println!("{label}: {}", report.entries);
    println!("Output size: {} bytes", report.bytes);
}
