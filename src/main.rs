use clap::error::ErrorKind;
use clap::Parser;
use html2steam::{html_to_steam, Options};
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert an HTML file into Steam's bracket-tag markup on stdout.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input HTML file (full document or fragment).
    html_file: PathBuf,

    /// Fail the conversion when an <img> has no src attribute instead of
    /// dropping the tag.
    #[arg(long)]
    strict: bool,

    /// Maximum element nesting depth accepted before conversion is
    /// aborted.
    #[arg(long, default_value_t = 256)]
    max_depth: usize,
}

// Exit codes: 0 success, 1 usage, 2 unreadable input, 3 conversion
// failure. Output markup goes to stdout alone; diagnostics to stderr.
fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let html = match std::fs::read_to_string(&args.html_file) {
        Ok(html) => html,
        Err(err) => {
            eprintln!("error reading {}: {}", args.html_file.display(), err);
            return ExitCode::from(2);
        }
    };

    let opts = Options {
        max_depth: args.max_depth,
        strict_images: args.strict,
    };

    match html_to_steam(&html, &opts) {
        Ok(markup) => {
            println!("{markup}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error converting {}: {}", args.html_file.display(), err);
            ExitCode::from(3)
        }
    }
}
