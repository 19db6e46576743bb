// codestat — multi-language source statistics
//
// Walks a directory tree, classifies lines as code/comment/blank per
// language, detects function boundaries with regex + brace/indent tracking,
// and reports per-language and overall summaries with CSV/JSON export.

mod classify;
mod cli;
mod config;
mod detect;
mod display;
mod export;
mod language;
mod models;
mod scanner;
mod stats;

use clap::Parser;
use colored::Colorize;
use std::process;

fn main() {
    let args = cli::Args::parse();
    let global = config::GlobalConfig::load();

    let scan_config = match scanner::ScanConfig::from_args(&args, &global) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            process::exit(1);
        }
    };

    let result = match scanner::run_scan(&scan_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            process::exit(1);
        }
    };

    display::display_results(&result, &scan_config.root, args.detailed);

    if let Some(ref output_file) = args.export {
        if let Err(e) = export::export(&result, output_file) {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            process::exit(1);
        }
    }
}
