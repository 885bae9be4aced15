use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rox_lox as lox;

use lox::ast_printer::Ast;
use lox::lox::{parse_source, Lox};
use lox::scanner::Scanner;
use lox::token::Token;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    /// Defaults to an interactive prompt
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token stream as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints each statement's AST
    Parse { filename: PathBuf },

    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive prompt
    Repl,
}

/// Reads a script through a read-only memory map.
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).with_context(|| format!("Failed to open file {:?}", filename))?;

    let len: u64 = file
        .metadata()
        .with_context(|| format!("Failed to stat file {:?}", filename))?
        .len();

    // Zero-length files cannot be mapped.
    if len == 0 {
        return Ok(String::new());
    }

    // SAFETY: the mapping is only read here and copied out before it is dropped.
    let map: Mmap = unsafe { Mmap::map(&file) }
        .with_context(|| format!("Failed to map file {:?}", filename))?;

    info!("Read {} bytes from {:?}", map.len(), filename);

    Ok(String::from_utf8_lossy(&map).into_owned())
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    // Configure env_logger to write to file with module and source line
    Builder::new()
        .format(|buf, record| {
            // Strip 'rox_lox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rox_lox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(filename: &Path, json: bool) -> Result<i32> {
    let source: String = read_file(filename)?;
    let mut tokens: Vec<Token> = Vec::new();
    let mut tokenized: bool = true;

    for result in Scanner::new(source.as_bytes()) {
        match result {
            Ok(token) => {
                if !json {
                    println!("{}", token);
                }
                tokens.push(token);
            }

            Err(e) => {
                tokenized = false;
                debug!("Tokenization debug: {}", e);
                eprintln!("{}", e);
            }
        }
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?
        );
    }

    Ok(if tokenized { 0 } else { 65 })
}

fn parse(filename: &Path) -> Result<i32> {
    let source: String = read_file(filename)?;

    match parse_source(&source) {
        Ok(statements) => {
            let printer = Ast;
            for stmt in &statements {
                println!("{}", printer.print_stmt(stmt));
            }
            Ok(0)
        }

        Err(e) => {
            debug!("Parse debug: {}", e);
            eprintln!("{}", e);
            Ok(e.exit_code())
        }
    }
}

fn run(filename: &Path) -> Result<i32> {
    let source: String = read_file(filename)?;
    let mut stdout = io::stdout();

    let outcome = Lox::new(&mut stdout).run(&source);
    stdout.flush().context("Failed to flush stdout")?;

    match outcome {
        Ok(()) => {
            info!("Program executed successfully");
            Ok(0)
        }

        Err(e) => {
            debug!("Run debug: {}", e);
            eprintln!("{}", e);
            Ok(e.exit_code())
        }
    }
}

fn repl() -> Result<i32> {
    let mut stdout = io::stdout();
    let mut session = Lox::new(&mut stdout);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        line.clear();
        if input.read_line(&mut line).context("Failed to read line")? == 0 {
            break;
        }

        // Errors are reported and the session carries on.
        if let Err(e) = session.run(&line) {
            eprintln!("{}", e);
        }
    }

    Ok(0)
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code: i32 = match args.commands.unwrap_or(Commands::Repl) {
        Commands::Tokenize { filename, json } => tokenize(&filename, json)?,
        Commands::Parse { filename } => parse(&filename)?,
        Commands::Run { filename } => run(&filename)?,
        Commands::Repl => repl()?,
    };

    if code != 0 {
        debug!("Exiting with code {}", code);
        std::process::exit(code);
    }

    Ok(())
}
