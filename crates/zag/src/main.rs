use std::io::{IsTerminal as _, Write as _};
use std::process::ExitCode;

use anyhow::Context as _;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use zag_db::{File, RootDatabase, check_file};
use zag_errors::Renderer;
use zag_syntax::{TextRange, TextSize};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "zag", version, about = "Lossless parser for zag source files")]
struct Options {
    /// When to color diagnostics.
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the syntax tree followed by its diagnostics.
    Parse { path: Utf8PathBuf },
    /// Report diagnostics for every file, failing if there are any.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Print the token stream, trivia included.
    Tokens { path: Utf8PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    fn renderer(self) -> Renderer {
        let styled = match self {
            Color::Auto => std::io::stderr().is_terminal(),
            Color::Always => true,
            Color::Never => false,
        };

        if styled { Renderer::styled() } else { Renderer::plain() }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let options = Options::parse();
    let renderer = options.color.renderer();
    let db = RootDatabase::default();

    match options.command {
        Command::Parse { path } => {
            let file = load(&db, path)?;
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{}", file.parse(&db).debug_tree())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { paths } => {
            let mut failed = false;
            for path in paths {
                let file = load(&db, path)?;
                let diagnostics = check_file(&db, file);
                debug!(path = %file.path(&db), count = diagnostics.len(), "checked");

                let path = file.path(&db).as_str();
                let text = file.text(&db);
                for diagnostic in diagnostics {
                    eprintln!("{}", diagnostic.render(&renderer, path, text));
                }
                failed |= !diagnostics.is_empty();
            }
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Command::Tokens { path } => {
            let file = load(&db, path)?;
            print_tokens(file.text(&db))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(db: &RootDatabase, path: Utf8PathBuf) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
    Ok(File::new(db, path, text))
}

fn print_tokens(text: &str) -> anyhow::Result<()> {
    let tokens = zag_tokenizer::tokenize(text);
    let mut stdout = std::io::stdout().lock();
    let mut offset = TextSize::new(0);

    for (index, token) in tokens.iter().enumerate() {
        for piece in tokens.leading_trivia(index) {
            let range = TextRange::at(offset, piece.len);
            writeln!(stdout, "{:?}@{range:?} {:?}", piece.kind.syntax_kind(), &text[range])?;
            offset = range.end();
        }
        writeln!(stdout, "{:?}@{:?} {:?}", token.kind, token.range, &text[token.range])?;
        offset = token.range.end();
    }

    for error in tokens.errors() {
        eprintln!("{error}");
    }

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG`. Nothing is installed when it is unset.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
