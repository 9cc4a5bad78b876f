use clap::Parser;
use colored::*;
use std::io::{Error, ErrorKind, Result};
use std::path::PathBuf;

mod compdb;
mod config;
mod util;

/// Emit a compilation database for the C++ headers in a directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory to scan. Defaults to the current directory.
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Glob matched against file names [default: *.hh]
    #[arg(short, long)]
    pattern: Option<String>,

    /// Compiler to put in each command [default: /usr/bin/g++]
    #[arg(long)]
    compiler: Option<String>,

    /// TOML file with compiler, flags and pattern overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the database here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep directory enumeration order instead of sorting by name.
    #[arg(long)]
    unsorted: bool,

    /// Print a note for each file considered.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{} {}", "error".red(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => util::read_config(path)?,
        None => config::Config::default(),
    };
    let template = config.template(args.compiler.as_deref());
    let pattern = config.pattern(args.pattern.as_deref());

    let dir = util::working_directory(args.directory.as_deref())?;
    let dir_str = dir.to_str().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidData,
            format!("{}: directory is not valid utf-8", dir.display()),
        )
    })?;

    let mut headers = util::find_headers(&dir, pattern, args.verbose)?;
    if !args.unsorted {
        headers.sort();
    }
    util::note(
        args.verbose,
        &format!(
            "{} header(s) matching {} in {}",
            headers.len(),
            pattern,
            dir_str
        ),
    );

    let db = compdb::Database::from_headers(dir_str, &template, &headers);
    match &args.output {
        Some(path) => db.emit_file(path),
        None => db.emit_stdout(),
    }
}
