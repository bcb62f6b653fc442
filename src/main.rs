//! Kanji 2048 replay viewer (default binary).
//!
//! `play` drives the actuator from a replay script and paints its document
//! in the terminal with a framebuffer renderer; `html` applies the script and
//! prints the resulting page.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use kanji_2048::actuator::{build_game_page, ActuatorConfig, HtmlActuator};
use kanji_2048::config::{parse_args, Command, ViewerConfig, USAGE};
use kanji_2048::input::{handle_key_event, should_quit, ViewerAction};
use kanji_2048::replay::{Replay, ReplayStep};
use kanji_2048::term::{
    elapsed_ms, BoardView, CellStyle, FrameBuffer, RenderThrottle, Rgb, TerminalRenderer,
    Viewport,
};
use kanji_2048::types::DEFAULT_GRID_SIZE;

/// Animation frame interval (about 60 Hz).
const FRAME_MS: u64 = 16;
/// Repaint interval while nothing changes.
const IDLE_REPAINT_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, config) = parse_args(&args, ViewerConfig::from_env())?;
    init_logging(&config)?;

    match command {
        Command::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        Command::Html(path) => print_html(&config, &path),
        Command::Play(path) => play(&config, &path),
    }
}

fn init_logging(config: &ViewerConfig) -> Result<()> {
    // The viewer owns the terminal, so logs only go to a file.
    let Some(path) = config.log_path.as_deref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init()?;
    Ok(())
}

/// Board size of the first rendered grid in the script.
fn script_grid_size(replay: &Replay) -> usize {
    replay
        .steps()
        .iter()
        .find_map(|entry| match &entry.step {
            ReplayStep::Actuate { grid, .. } | ReplayStep::UpdateGrid { grid, .. } => {
                Some(grid.size())
            }
            ReplayStep::Continue => None,
        })
        .unwrap_or(DEFAULT_GRID_SIZE)
}

fn new_actuator(config: &ViewerConfig, grid_size: usize) -> Result<HtmlActuator> {
    let actuator = HtmlActuator::new(
        build_game_page(grid_size),
        ActuatorConfig {
            initial_numeral_type: config.numerals,
        },
    )?;
    Ok(actuator)
}

fn print_html(config: &ViewerConfig, path: &Path) -> Result<()> {
    let mut replay = Replay::load(path)?;
    let mut actuator = new_actuator(config, script_grid_size(&replay))?;
    let applied = replay.run_to_end(&mut actuator)?;
    info!("applied {} steps", applied);
    println!("{}", actuator.surface().to_html());
    Ok(())
}

fn play(config: &ViewerConfig, path: &Path) -> Result<()> {
    let mut replay = Replay::load(path)?;
    let mut actuator = new_actuator(config, script_grid_size(&replay))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut actuator, &mut replay, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    actuator: &mut HtmlActuator,
    replay: &mut Replay,
    config: &ViewerConfig,
) -> Result<()> {
    let view = BoardView::new(script_grid_size(replay));
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(IDLE_REPAINT_MS);

    let started = Instant::now();
    let frame_duration = Duration::from_millis(FRAME_MS);
    let step_duration = Duration::from_millis(config.step_ms);
    let mut last_frame = Instant::now();
    let mut last_step: Option<Instant> = None;
    let mut paused = false;
    let mut status_dirty = true;

    loop {
        // Replay step.
        let step_due = last_step.map_or(true, |t| t.elapsed() >= step_duration);
        if !paused && step_due && !replay.is_finished() {
            replay.apply_next(actuator)?;
            last_step = Some(Instant::now());
            status_dirty = true;
        }

        // Animation frame.
        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
            actuator.run_animation_frame();
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let now_ms = elapsed_ms(started.elapsed());
        let animating = actuator.has_pending_frames() || status_dirty;
        if throttle.should_render(now_ms, actuator.surface().revision(), animating) {
            view.render_into(actuator.surface(), Viewport::new(w, h), &mut fb);
            draw_status(&mut fb, replay, paused);
            term.draw_swap(&mut fb)?;
            status_dirty = false;
        }

        // Input with timeout until the next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                match action {
                    ViewerAction::TogglePause => paused = !paused,
                    ViewerAction::Step => {
                        paused = true;
                        replay.apply_next(actuator)?;
                    }
                    ViewerAction::ContinueGame => actuator.continue_game(),
                    ViewerAction::SetNumerals(numeral_type) => {
                        replay.set_numerals(actuator, numeral_type)?;
                    }
                }
                status_dirty = true;
            }
            Event::Resize(_, _) => {
                term.invalidate();
                throttle.reset();
            }
            _ => {}
        }
    }
}

fn draw_status(fb: &mut FrameBuffer, replay: &Replay, paused: bool) {
    let Some(y) = fb.height().checked_sub(1) else {
        return;
    };
    let state = if replay.is_finished() {
        "end"
    } else if paused {
        "paused"
    } else {
        "playing"
    };
    let line = format!(
        " step {}/{} [{}]  space pause  n step  c continue  0/1/2 numerals  q quit",
        replay.position(),
        replay.len(),
        state
    );
    let style = CellStyle::new(Rgb::new(143, 122, 102), Rgb::new(250, 248, 239));
    fb.put_str(0, y, &line, style);
}
