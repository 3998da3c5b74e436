use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::exit,
    time::Instant,
};

use clap::{Parser as ClapParser, ValueEnum};
use letter::{
    display_error,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::{
        factory::{DefaultFactory, FactoryParser, SExpressionFactory},
        parser::Parser,
    },
};
use log::{debug, LevelFilter};
use serde::Serialize;

#[derive(ClapParser)]
#[command(name = "letter")]
#[command(about = "Parses letter source code and prints its syntax tree")]
struct Cli {
    /// Source file to parse, stdin when absent
    file: Option<PathBuf>,

    /// Parse the given source text instead of a file
    #[arg(short, long, conflicts_with = "file")]
    eval: Option<String>,

    /// Output format of the tree
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print the token stream instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Parse the literal subset through a node factory
    #[arg(long, value_enum)]
    factory: Option<FactoryKind>,

    /// Debug logging and stage timings
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented JSON
    Json,
    /// Single-line JSON
    Compact,
    /// Bracketed prefix text, only for the s-expression factory
    Sexp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FactoryKind {
    Default,
    SExpression,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let (source, file_name) = match read_source(&cli) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let start = Instant::now();

    let output = if cli.tokens {
        dump_tokens(&source, &file_name)
    } else {
        match cli.factory {
            Some(FactoryKind::Default) => {
                let mut parser = FactoryParser::new(DefaultFactory, Some(file_name));
                parser
                    .parse(&source)
                    .map(|tree| render(&tree, cli.format, None))
            }
            Some(FactoryKind::SExpression) => {
                let mut parser = FactoryParser::new(SExpressionFactory, Some(file_name));
                parser
                    .parse(&source)
                    .map(|tree| render(&tree, cli.format, Some(tree.to_string())))
            }
            None => {
                let mut parser = Parser::new(Some(file_name));
                parser
                    .parse(&source)
                    .map(|program| render(&program, cli.format, None))
            }
        }
    };

    if cli.verbose {
        eprintln!("Finished in {:?}", start.elapsed());
    }

    match output {
        Ok(text) => println!("{}", text),
        Err(error) => {
            display_error(&error, &source);
            exit(1);
        }
    }
}

fn read_source(cli: &Cli) -> io::Result<(String, String)> {
    if let Some(source) = &cli.eval {
        return Ok((source.clone(), String::from("eval")));
    }

    match &cli.file {
        Some(path) => {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();
            debug!("reading {}", path.display());
            Ok((read_to_string(path)?, file_name))
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((source, String::from("stdin")))
        }
    }
}

fn dump_tokens(source: &str, file_name: &str) -> Result<String, Error> {
    let tokens = tokenize(source, Some(String::from(file_name)))?;

    Ok(tokens
        .iter()
        .map(|token| token.debug())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// `sexp` falls back to pretty JSON for trees that have no prefix rendering.
fn render<T: Serialize>(tree: &T, format: Format, sexp: Option<String>) -> String {
    if let (Format::Sexp, Some(text)) = (format, sexp) {
        return text;
    }

    let json = match format {
        Format::Compact => serde_json::to_string(tree),
        Format::Json | Format::Sexp => serde_json::to_string_pretty(tree),
    };

    json.unwrap_or_else(|e| format!("failed to serialize tree: {}", e))
}
