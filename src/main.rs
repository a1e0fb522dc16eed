use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use unicode_width::UnicodeWidthStr;

use memcheck::app::App;
use memcheck::config::{self, Config, load_config, load_config_from_path};
use memcheck::event::{Event, EventHandler};
use memcheck::inspector::OverlayFrame;
use memcheck::{logging, ui};

#[derive(Parser)]
#[command(
    name = "memcheck",
    about = "Live memory and resource census with pinned snapshots and deltas"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum time between two census captures, in milliseconds
    #[arg(long)]
    sample_interval_ms: Option<u64>,

    /// Render pass rate in milliseconds
    #[arg(long)]
    frame_rate_ms: Option<u64>,

    /// Theme: dark, light, colorblind
    #[arg(long)]
    theme: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run this many headless passes and print each frame instead of
    /// opening the terminal overlay.
    #[arg(long)]
    print: Option<usize>,

    /// With --print, emit `<color=..>` markup instead of plain text.
    #[arg(long, default_value_t = false, requires = "print")]
    markup: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    logging::init(&config.logging)?;
    tracing::info!(
        sample_interval_ms = config.general.sample_interval_ms,
        frame_rate_ms = config.general.frame_rate_ms,
        "starting"
    );

    if let Some(passes) = cli.print {
        return run_print(config, passes, cli.markup);
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: Config) -> Result<()> {
    let frame_rate = config.general.frame_rate();
    let mut app = App::new(config);
    let mut events = EventHandler::new(frame_rate);

    app.on_frame();
    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                }
            }
            Event::Frame => app.on_frame(),
            Event::Resize => {}
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    tracing::info!("quit");
    Ok(())
}

fn run_print(config: Config, passes: usize, markup: bool) -> Result<()> {
    if passes == 0 {
        return Err(eyre!("--print must be greater than 0"));
    }

    let palette = config.colors.palette();
    let interval = config.general.sample_interval();
    let mut app = App::new(config);

    for pass in 0..passes {
        if pass > 0 {
            std::thread::sleep(interval + Duration::from_millis(1));
        }
        app.on_frame();
        let Some(frame) = &app.frame else {
            continue;
        };
        if markup {
            for column in &frame.columns {
                println!("{}\n", column.markup(&palette));
            }
        } else {
            println!("{}", plain_table(frame));
        }
    }
    Ok(())
}

fn plain_table(frame: &OverlayFrame) -> String {
    let label_width = frame.labels.iter().map(|l| l.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (row, label) in frame.labels.iter().enumerate() {
        out.push_str(&format!("{label:<label_width$}"));
        for column in &frame.columns {
            let text = column.lines.get(row).map_or("", |l| l.text.as_str());
            out.push_str(&format!("  {text:>10}"));
        }
        out.push('\n');
    }
    out
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ms) = cli.sample_interval_ms {
        config.general.sample_interval_ms = ms;
    }
    if let Some(ms) = cli.frame_rate_ms {
        config.general.frame_rate_ms = ms;
    }
    if let Some(ref theme) = cli.theme {
        config.general.theme = theme.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }

    config
}
