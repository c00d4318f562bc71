//! wrapxx command-line interface.
//!
//! Generates a C++ class wrapper from a handle-based C API header by
//! splicing generated method declarations and bodies into a boilerplate
//! template.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use wrapxx_cli::{list_methods, load_config, run_generate, GenerateOptions};

#[derive(Parser)]
#[command(name = "wrapxx")]
#[command(version = "0.1.0")]
#[command(about = "Generates a C++ class wrapper from a C API header", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the wrapper source file
    Generate {
        /// Input header (configured candidates are probed when omitted)
        header: Option<PathBuf>,
        /// Boilerplate template file
        #[arg(short, long)]
        template: PathBuf,
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
        /// TOML file overriding the built-in wrapping rules
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Additional include directories for the preprocessor
        #[arg(short = 'I', long = "include")]
        include_dirs: Vec<PathBuf>,
    },
    /// List the functions in a header and how they would be wrapped
    List {
        /// Input header
        header: PathBuf,
        /// TOML file overriding the built-in wrapping rules
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Additional include directories for the preprocessor
        #[arg(short = 'I', long = "include")]
        include_dirs: Vec<PathBuf>,
        /// Show full method descriptors
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            header,
            template,
            output,
            config,
            include_dirs,
        } => generate_cmd(header, template, output, config, include_dirs),
        Commands::List {
            header,
            config,
            include_dirs,
            verbose,
        } => list_cmd(&header, config, include_dirs, verbose),
    }
}

fn generate_cmd(
    header: Option<PathBuf>,
    template: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    include_dirs: Vec<PathBuf>,
) -> ExitCode {
    let config = match load_config(config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let opts = GenerateOptions {
        header,
        template,
        output: output.clone(),
        include_dirs,
        config,
    };
    match run_generate(&opts) {
        Ok(header) => {
            println!("Wrapped {} -> {}", header.display(), output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn list_cmd(
    header: &PathBuf,
    config: Option<PathBuf>,
    include_dirs: Vec<PathBuf>,
    verbose: bool,
) -> ExitCode {
    let config = match load_config(config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let methods = match list_methods(header, &include_dirs, &config) {
        Ok(methods) => methods,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Functions ({}):", methods.len());
    for method in &methods {
        match &method.descriptor {
            Some(desc) => {
                let kind = if desc.is_static { "static" } else { "instance" };
                println!(
                    "  {} @ {} -> {} {} {}",
                    method.original,
                    method.loc,
                    kind,
                    desc.ret,
                    desc.declaration_text()
                );
                if verbose {
                    println!("{:#?}", desc);
                }
            }
            None => {
                println!(
                    "  {} @ {} -> skipped (manually wrapped)",
                    method.original, method.loc
                );
            }
        }
    }
    ExitCode::SUCCESS
}
