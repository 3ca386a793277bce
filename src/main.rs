//! spritz - paginate ebooks into fixed-size pages

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use spritz::{BookHandle, EpubSource, PagerConfig, TextSource};

#[derive(Parser)]
#[command(name = "spritz")]
#[command(version, about = "Paginate ebooks into fixed-size pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    spritz info book.epub             Show title, author and page count
    spritz page book.epub 3           Print the third page
    spritz page book.epub 3 --json    Print the third page as JSON")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Words per page
    #[arg(long, global = true, default_value_t = PagerConfig::DEFAULT_WORDS_PER_PAGE)]
    words_per_page: usize,

    /// Estimated average word length, in characters
    #[arg(long, global = true, default_value_t = PagerConfig::DEFAULT_AVERAGE_WORD_LENGTH)]
    average_word_length: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show book metadata and pagination summary
    Info {
        /// Input EPUB file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Read metadata only, without paginating
        #[arg(long)]
        metadata_only: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print one page of text
    Page {
        /// Input EPUB file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// 1-based page number; out-of-range pages print as empty
        #[arg(value_name = "PAGE", allow_negative_numbers = true)]
        page: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct InfoView<'a> {
    title: &'a str,
    author: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word_count: Option<usize>,
}

#[derive(Serialize)]
struct PageView<'a> {
    author: &'a str,
    title: &'a str,
    page: i64,
    page_count: usize,
    text: &'a str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("spritz={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = PagerConfig::new(cli.words_per_page, cli.average_word_length)?;

    match &cli.command {
        Command::Info {
            input,
            metadata_only,
            json,
        } => show_info(input, config, *metadata_only, *json),
        Command::Page { input, page, json } => show_page(input, config, *page, *json),
    }
}

fn show_info(
    path: &Path,
    config: PagerConfig,
    metadata_only: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if metadata_only {
        let source = EpubSource::open_metadata(path)?;
        let author = source.metadata().author();
        let view = InfoView {
            title: &source.metadata().title,
            author: &author,
            page_count: None,
            word_count: None,
        };
        return print_info(&view, path, json);
    }

    let book = spritz::open(path, config)?;
    let view = InfoView {
        title: book.title(),
        author: book.author(),
        page_count: Some(book.page_count()),
        word_count: Some(book.word_count()),
    };
    print_info(&view, path, json)
}

fn print_info(
    view: &InfoView<'_>,
    path: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("File: {}", path.display());
    println!("Title: {}", view.title);
    if !view.author.is_empty() {
        println!("Author: {}", view.author);
    }
    if let Some(pages) = view.page_count {
        println!("Pages: {pages}");
    }
    if let Some(words) = view.word_count {
        println!("Words: {words}");
    }
    Ok(())
}

fn show_page(
    path: &Path,
    config: PagerConfig,
    page: i64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let book: BookHandle = spritz::open(path, config)?;
    let text = book.get_page(page);

    if json {
        let view = PageView {
            author: book.author(),
            title: book.title(),
            page,
            page_count: book.page_count(),
            text,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{text}");
    }
    Ok(())
}
