mod app;
mod logging;
mod plain;
mod tui;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};
use scour_core::{BackendRegistry, CleanerConfig, Tick, Worker};

use app::{Action, AppMode, AppState, Selection};
use plain::PlainHost;
use tui::{AppEvent, EventHandler, handle_key};
use ui::{AppLayout, ConfirmRunView, Footer, Header, HelpView, LogView, ProgressView, Theme};

/// SCOUR - Preview-first disk cleaner
#[derive(Parser, Debug)]
#[command(name = "scour")]
#[command(about = "Preview and delete application caches, history, and other disposable files")]
#[command(version)]
struct Args {
    /// Cleaners to run, in order (see --list)
    operations: Vec<String>,

    /// Really delete (default is a preview that only measures)
    #[arg(short, long)]
    delete: bool,

    /// Override a cleaner option, e.g. firefox.cache=false
    #[arg(short = 'o', long = "option", value_name = "OPERATION.OPTION=BOOL")]
    options: Vec<String>,

    /// Cleaner definitions file (replaces the built-in set)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List available cleaners and their options
    #[arg(short, long)]
    list: bool,

    /// Print lines to stdout instead of drawing the interface
    #[arg(long)]
    plain: bool,

    /// Do not ask before deleting
    #[arg(short, long)]
    yes: bool,

    /// More diagnostics (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let interactive = !args.plain && !args.list;
    logging::init(args.verbose, interactive);

    let config = CleanerConfig::resolve(args.config.as_deref())?;
    if args.list {
        print_cleaners(&config);
        return Ok(());
    }

    let selection = Selection::build(&config, &args.operations, &args.options)?;
    let registry = BackendRegistry::from_config(&config);

    if args.plain {
        run_plain(selection, registry, &args)
    } else {
        run_interactive(selection, registry, &args)
    }
}

fn print_cleaners(config: &CleanerConfig) {
    for cleaner in &config.cleaners {
        println!("{:<12} {}", cleaner.id, cleaner.name);
        if let Some(description) = &cleaner.description {
            println!("{:<12} {}", "", description);
        }
        for option in &cleaner.options {
            let default = if option.default { "on" } else { "off" };
            println!(
                "  {:<20} [{:<3}] {}",
                format!("{}.{}", cleaner.id, option.id),
                default,
                option.label
            );
        }
    }
}

fn run_plain(selection: Selection, registry: BackendRegistry, args: &Args) -> Result<()> {
    let operations = selection.operations.clone();

    // Build first so a bad selection fails before the prompt
    let worker = Worker::new(PlainHost::new(selection), registry, args.delete)?;
    if args.delete && !args.yes && !plain::confirm_delete(&operations)? {
        println!("Cancelled.");
        return Ok(());
    }

    if plain::run(worker) > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_interactive(selection: Selection, registry: BackendRegistry, args: &Args) -> Result<()> {
    let confirm_first = args.delete && !args.yes;
    let mut state = AppState::new(selection, args.delete, confirm_first);
    let freed = Rc::clone(&state.bytes_freed);

    // Configuration errors surface before the alternate screen
    let mut worker = Worker::new(&mut state, registry, args.delete)?;
    worker.set_total_size_callback(move |total| freed.set(total));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    drop(worker);
    if state.mode == AppMode::Done
        && let Some(summary) = state.lines.last()
    {
        println!("{}", summary.text);
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    worker: &mut Worker<&mut AppState>,
) -> Result<()> {
    let theme = Theme::default();
    let event_handler = EventHandler::new(50); // 50ms tick rate

    loop {
        // Resume the run once per frame
        if worker.host().mode == AppMode::Running {
            if !matches!(worker.next(), Some(Tick::Working)) {
                worker.host_mut().finish_run();
            }
            let run = worker.state().clone();
            worker.host_mut().run = run;
        }

        let state: &mut AppState = worker.host_mut();

        terminal.draw(|frame| draw(frame, state, &theme))?;

        // Do not wait for input while there is work to do
        let event = if state.mode == AppMode::Running {
            event_handler.try_next()?
        } else {
            event_handler.next()?
        };

        match event {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode, state.show_help);
                handle_action(state, action);
            }
            AppEvent::Resize(_, _) => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => {}
        }
        state.tick_spinner();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();
    let layout = AppLayout::new(area);

    // Background
    frame
        .buffer_mut()
        .set_style(area, Style::default().bg(theme.bg));

    // Update visible height for scrolling
    state.visible_height = LogView::inner_height(layout.log);
    let state = &*state;

    Header::new(state, theme).render(layout.header, frame.buffer_mut());
    ProgressView::new(state, theme).render(layout.progress, frame.buffer_mut());
    LogView::new(state, theme).render(layout.log, frame.buffer_mut());
    Footer::new(state, theme).render(layout.footer, frame.buffer_mut());

    if state.mode == AppMode::Confirm {
        ConfirmRunView::new(&state.selection.operations, theme).render(area, frame.buffer_mut());
    }
    if state.show_help {
        HelpView::new(theme).render(area, frame.buffer_mut());
    }
}

fn handle_action(state: &mut AppState, action: Action) {
    match action {
        Action::ScrollUp => state.scroll_up(),
        Action::ScrollDown => state.scroll_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GoToFirst => state.go_to_first(),
        Action::GoToLast => state.go_to_last(),
        Action::ShowHelp => state.show_help(),
        Action::HideHelp => state.hide_help(),
        Action::Confirm => state.confirm(),
        Action::Cancel | Action::Quit => state.quit(),
        Action::Tick => {}
    }
}
