// ctorviz: step-by-step constructor visualizer for C++ snippets

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ctorviz::parser::parse::ParseOptions;
use ctorviz::playback::{PlaybackConfig, Session};
use ctorviz::trace::UNRESOLVED;
use ctorviz::ui::App;

#[derive(Debug, Parser)]
#[command(name = "ctorviz", version, about = "Visualize C++ object construction step by step")]
struct Args {
    /// C++ source file containing one class and its object declarations
    file: PathBuf,

    /// Print the extracted model and every trace instead of opening the TUI
    #[arg(long)]
    print: bool,

    /// Start with auto-play enabled
    #[arg(long)]
    auto: bool,

    /// Duration of one step in milliseconds
    #[arg(long, value_name = "N")]
    step_ms: Option<u64>,

    /// Reject classes without a constructor
    #[arg(long)]
    require_constructor: bool,

    /// Write debug logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ctorviz=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Headless dump of everything the TUI would show
fn print_session(session: &Session) {
    let Some(model) = session.model() else {
        return;
    };
    let class = &model.class;

    println!("class {} (line {})", class.name, class.line_index + 1);
    for member in &class.members {
        println!("  member {member}");
    }
    match &class.constructor {
        Some(ctor) => println!(
            "constructor {} (line {})",
            class.constructor_display(),
            ctor.line_index + 1
        ),
        None => println!("constructor (none)"),
    }
    println!("binding: {}", class.binding_tier);
    for member in &class.members {
        if let Some(param) = class.bound_param(&member.name) {
            println!("  {} <- {}", member.name, param);
        }
    }

    for trace in session.traces() {
        println!();
        println!("object {}", trace.object_name);
        for step in &trace.steps {
            let line = step
                .highlight_line
                .map(|l| format!("L{}", l + 1))
                .unwrap_or_else(|| UNRESOLVED.to_string());
            println!("  {:>2}. [{:>4}] {}", step.ordinal, line, step.label);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    let mut config = PlaybackConfig::default();
    if let Some(ms) = args.step_ms {
        config = config.with_step_duration(Duration::from_millis(ms));
    }
    let parse_options = ParseOptions {
        require_constructor: args.require_constructor,
        ..ParseOptions::default()
    };

    let mut session = Session::with_parse_options(config, parse_options);
    if let Err(e) = session.load_source(&source) {
        error!(file = %args.file.display(), error = %e, "extraction failed");
        eprintln!("Extraction error: {}", e);
        std::process::exit(1);
    }
    info!(file = %args.file.display(), objects = session.sites().len(), "loaded");

    if args.print {
        print_session(&session);
        return Ok(());
    }

    session.set_auto_play(args.auto);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
