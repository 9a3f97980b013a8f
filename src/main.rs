// Copyright (C) 2024 Mathew Robinson <chasinglogic@gmail.com>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

#[macro_use]
extern crate log;

use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use config::{Overrides, CONFIG_FILE_NAME, DEFAULT_CONFIG};
use error::Error;
use stamper::Stamper;

mod config;
mod describe;
mod error;
mod stamper;
mod template;
mod utils;
mod walk;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(help = "A file or directory to add headers to", required_unless_present = "generate_config")]
    path: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(
        short,
        long,
        help = "Report files missing a header without modifying anything"
    )]
    check: bool,

    #[arg(long, help = "Use this config file instead of searching for .headerstamp.yml")]
    config: Option<PathBuf>,

    #[arg(long, env = "HEADER_AUTHOR", help = "Author name for the header")]
    author: Option<String>,

    #[arg(long, env = "HEADER_COMPANY", help = "Company name for the copyright line")]
    company: Option<String>,

    #[arg(long, env = "HEADER_YEAR", help = "Copyright year, defaults to the current year")]
    year: Option<String>,

    #[arg(
        long,
        env = "HEADER_EXTENSIONS",
        value_delimiter = ',',
        help = "Comma separated extensions to add headers to"
    )]
    extensions: Option<Vec<String>>,

    #[arg(
        long,
        env = "HEADER_EXCLUDE_DIRS",
        value_delimiter = ',',
        help = "Comma separated directory names to skip"
    )]
    exclude_dirs: Option<Vec<String>>,

    #[arg(short, long, help = "Generate a default headerstamp config file")]
    generate_config: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            author: self.author.clone(),
            company: self.company.clone(),
            year: self.year.clone(),
            extensions: self.extensions.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };

    let config = simplelog::ConfigBuilder::new()
        .set_time_level(simplelog::LevelFilter::Debug)
        .set_thread_level(simplelog::LevelFilter::Debug)
        .set_target_level(simplelog::LevelFilter::Debug)
        .set_location_level(simplelog::LevelFilter::Trace)
        .build();

    if let Err(e) = simplelog::SimpleLogger::init(level, config) {
        eprintln!("Unable to initialize logging: {}", e);
    }
}

fn generate_config() -> Result<(), std::io::Error> {
    let mut f = File::create(CONFIG_FILE_NAME)?;
    f.write_all(DEFAULT_CONFIG.as_bytes())
}

fn run(cli: &Cli, path: &Path) -> Result<bool, Error> {
    let (config, templates) =
        config::load_config(cli.config.as_deref())?.resolve(cli.overrides())?;

    println!("Author:     {}", config.author);
    println!("Company:    {}", config.company);
    println!("Year:       {}", config.year);
    if config.extensions.is_empty() {
        println!("Extensions: (all)");
    } else {
        println!("Extensions: {}", join(&config.extensions));
    }
    println!("Excluding:  {}", join(&config.exclude_dirs));
    println!();

    let files = walk::collect_files(path, &config.exclude_dirs)?;
    if files.is_empty() {
        println!("No files found.");
        return Ok(true);
    }

    debug!("available templates: {}", templates.keys().collect::<Vec<_>>().join(", "));
    println!("Processing {} file(s)...", files.len());
    let stats = Stamper::new(&config, &templates)
        .with_check_mode(cli.check)
        .stamp_files(files);

    println!();
    println!("Done. Processed {} file(s).", stats.total());
    println!("{}", stats);

    let missing: Vec<String> = stats
        .files_needing_header
        .iter()
        .map(|f| f.display().to_string())
        .collect();
    print_files(&missing, "The following files are missing a header");

    let failed: Vec<String> = stats
        .files_failed
        .iter()
        .map(|(f, e)| format!("{}: {}", f.display(), e))
        .collect();
    print_files(&failed, "The following files could not be processed");

    Ok(missing.is_empty() && failed.is_empty())
}

fn join<'a, I: IntoIterator<Item = &'a String>>(items: I) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.generate_config {
        if let Err(e) = generate_config() {
            eprintln!("Unable to write {}: {}", CONFIG_FILE_NAME, e);
            process::exit(1);
        }

        process::exit(0);
    }

    let path = match &cli.path {
        Some(p) => p.clone(),
        None => {
            eprintln!("ERROR: Must provide a file or directory, use -h for help");
            process::exit(1);
        }
    };

    match run(&cli, &path) {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Error::InvalidPath(_) = e {
                eprintln!("Use -h for help.");
            }
            process::exit(1);
        }
    }
}

/// Print the given list of files (if non-empty) with a message "The following X
/// Y" where X is the number of files to be printed and Y is the given message
/// parameter. Returns true if files were printed and false otherwise.
fn print_files(files: &[String], message: &str) -> bool {
    if !files.is_empty() {
        eprintln!("{} ({}):", message, files.len());
        for file in files {
            eprintln!("  {}", file);
        }
        true
    } else {
        false
    }
}
