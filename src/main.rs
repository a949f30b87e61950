use std::path::Path;
use std::process::ExitCode;

mod model;
mod services;

use model::job::RunConfig;
use services::driver;

struct CliArgs {
    config: Option<String>,
    locales: Vec<String>,
    out_dir: Option<String>,
    table: Option<String>,
    help: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        config: None,
        locales: Vec::new(),
        out_dir: None,
        table: None,
        help: false,
    };

    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => cli.config = Some(flag_value(&mut args, &arg)?),
            "--locale" => cli.locales.push(flag_value(&mut args, &arg)?),
            "--out-dir" => cli.out_dir = Some(flag_value(&mut args, &arg)?),
            "--table" => cli.table = Some(flag_value(&mut args, &arg)?),
            "-h" | "--help" => cli.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(cli)
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{flag} requires a value"))
}

fn print_usage() {
    eprintln!(
        "usage: castbar-datagen [--config <file>] [--locale <code>]... [--out-dir <dir>] [--table <file>]"
    );
}

fn main() -> ExitCode {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return ExitCode::from(2);
        }
    };

    if cli.help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let mut cfg = match cli.config {
        Some(p) => match RunConfig::load(Path::new(&p)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[config] {e}");
                return ExitCode::from(2);
            }
        },
        None => RunConfig::default(),
    };

    if let Some(dir) = cli.out_dir {
        cfg.out_dir = dir;
    }
    if let Some(table) = cli.table {
        cfg.script_table = table;
    }
    if !cli.locales.is_empty() {
        cfg.jobs.retain(|j| cli.locales.iter().any(|l| l == &j.locale));
    }

    if cfg.jobs.is_empty() {
        eprintln!("no jobs selected");
        return ExitCode::from(2);
    }

    let report = driver::run(&cfg);

    println!("[done] {} succeeded, {} failed", report.succeeded, report.failed);

    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
