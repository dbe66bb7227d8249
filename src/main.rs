//! Terminal preview for the page behaviors.
//!
//! Run the binary to scroll through the demo page and watch every behavior
//! react.  Run with `--replay 0,20,55` to apply scroll offsets headlessly and
//! print the resulting page state.

mod app;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tokio::time::MissedTickBehavior;

use page_motion::behaviors::install;
use page_motion::config::{self, AppConfig};
use page_motion::demo::demo_page;
use page_motion::dom::env::Environment;
use page_motion::dom::signal::Signal;
use page_motion::replay;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::ui::{
    inspector::InspectorWidget, layout::AppLayout, page_view::PageView, popup, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Preview scroll-driven page behaviors")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/page-motion/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in CSS pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Start with the reduced-motion preference on.
    #[arg(long)]
    reduced_motion: bool,

    /// Start with touch input (no hover, touch points available).
    #[arg(long)]
    touch: bool,

    /// Replay comma-separated scroll offsets and print each resulting state.
    #[arg(long, value_name = "OFFSETS")]
    replay: Option<String>,
}

// ───────────────────────────────────────── replay ────────────

fn run_replay(cfg: &AppConfig, cli: &Cli, raw: &str) -> Result<()> {
    let offsets = replay::parse_offsets(raw)?;

    let mut page = demo_page(cfg.viewport_width, cfg.viewport_height);
    page.set_reduced_motion(cli.reduced_motion);
    if cli.touch {
        page.set_touch_points(5);
        page.set_hover_none(true);
    }
    let mut runtime = install(&mut page, &cfg.motion);
    runtime.dispatch(&Signal::Ready, &mut page);
    replay::settle(&mut page, &mut runtime);

    let vp = page.viewport();
    println!(
        "viewport {}x{}, {} behaviors, max scroll {}",
        vp.width,
        vp.height,
        runtime.len(),
        page.max_scroll()
    );
    for step in replay::replay(&mut page, &mut runtime, &offsets) {
        println!("{step}");
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let mut cfg = AppConfig::load_from(&config_path);
    if let Some(w) = cli.width {
        cfg.viewport_width = w;
    }
    if let Some(h) = cli.height {
        cfg.viewport_height = h;
    }
    tracing::debug!(path = %config_path.display(), "config loaded");

    // ── headless mode ─────────────────────────────────────────
    if let Some(raw) = cli.replay.as_deref() {
        return run_replay(&cfg, &cli, raw);
    }

    let frame_period = Duration::from_millis(cfg.frame_interval_ms);
    let mut state = AppState::new(cfg, config_path);
    state.start(cli.reduced_motion, cli.touch);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode().context("enabling raw mode")?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async sources ─────────────────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(frame_period);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let size = terminal.size()?;
    let mut area = Rect::new(0, 0, size.width, size.height);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            area = frame.area();
            let layout = AppLayout::from_area(area);

            let vp = state.page.viewport();
            let page_block = Block::default()
                .title(format!(
                    " page {}x{}  y={:.0} ",
                    vp.width,
                    vp.height,
                    state.page.scroll_y()
                ))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(PageView::new(&state.page).block(page_block), layout.page_area);

            let inspector_block = Block::default()
                .title(" behaviors ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(
                InspectorWidget {
                    page: &state.page,
                    runtime: &state.runtime,
                    frames: state.frames,
                    block: Some(inspector_block),
                },
                layout.inspector_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Page => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::Controls => "",
            };
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);

            if state.active_view == ActiveView::Controls {
                frame.render_widget(
                    popup::ControlsPopup {
                        config: &state.config,
                        selected: state.controls_selected,
                        awaiting_rebind: state.awaiting_rebind,
                    },
                    frame.area(),
                );
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m, area),
                    AppEvent::Resize(w, h) => area = Rect::new(0, 0, w, h),
                }
            }

            _ = frames.tick() => state.tick(frame_period),
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
