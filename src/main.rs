//! Demo: a draggable window with a few widgets and a status line scene.

use std::io;

use tokio::sync::mpsc;
use zui::core::event::{InputEvent, KeyCode};
use zui::core::Result;
use zui::runtime::{RunExit, Scheduler};
use zui::settings::{self, Settings};
use zui::tui::crossterm::spawn_input_thread;
use zui::tui::terminal_guard::{TerminalGuard, TERMINATE_EVENT};
use zui::ui::backend::terminal::TerminalSurface;
use zui::ui::core::input::Hook;
use zui::ui::core::layout::Anchor;
use zui::ui::core::tree::ElementOptions;
use zui::ui::widgets::{Button, Label, Panel, ProgressBar, Stack, TextField};
use zui::Ui;

mod logging;

fn main() -> Result<()> {
    if let Err(err) = settings::ensure_settings_file() {
        eprintln!("zui: cannot create settings file: {err}");
    }
    // The log filter lives in the settings file; a bad file is reported once
    // logging is up.
    let path = settings::settings_path();
    let loaded = path.as_deref().map(Settings::try_load_from);
    let settings = match &loaded {
        Some(Ok(settings)) => settings.clone(),
        _ => Settings::default(),
    };
    let _logging = logging::init(settings.log_filter.as_deref());
    if let (Some(path), Some(Err(err))) = (path.as_deref(), &loaded) {
        settings::warn_fallback(path, err);
    }

    let guard = TerminalGuard::new()?;
    let mut ui = Ui::new(Box::new(TerminalSurface::new(io::stdout())?));
    settings.apply(&mut ui);
    build(&mut ui)?;

    let (tx, rx) = mpsc::unbounded_channel();
    #[cfg(unix)]
    zui::tui::terminal_guard::install_termination_signals(guard.restorer(), tx.clone())?;
    spawn_input_thread(tx)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let exit = rt.block_on(Scheduler::new(settings.frame_rate).run(&mut ui, rx));
    // Restore before anything else can print.
    drop(guard);

    match exit? {
        RunExit::Stopped => tracing::info!("stopped"),
        RunExit::InputClosed => tracing::warn!("terminal input closed"),
    }
    Ok(())
}

fn build(ui: &mut Ui) -> Result<()> {
    let window = ui.add(
        Panel::titled("zui"),
        ElementOptions::new()
            .anchor(Anchor::Center)
            .border()
            .padding(1)
            .draggable(),
    )?;

    let mut progress = None;
    let mut start = None;
    let mut quit = None;
    ui.build(window, |b| {
        b.add_with(Stack::vertical(1), ElementOptions::new(), |col| {
            col.add(Label::new("Drag the title bar to move this window."), ElementOptions::new())?;
            col.add(
                TextField::new().with_placeholder("type here"),
                ElementOptions::new().width(32),
            )?;
            progress = Some(col.add(
                ProgressBar::new().with_speed(0.5),
                ElementOptions::new().width(32),
            )?);
            col.add_with(Stack::horizontal(2), ElementOptions::new(), |row| {
                start = Some(row.add(Button::new("Start"), ElementOptions::new())?);
                quit = Some(row.add(Button::new("Quit"), ElementOptions::new())?);
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })?;

    if let (Some(progress), Some(start), Some(quit)) = (progress, start, quit) {
        ui.on(start, Hook::Click, move |ui, _, _| {
            ui.with_element::<ProgressBar, _>(progress, |bar| {
                let next = if bar.target() >= 1.0 { 0.0 } else { 1.0 };
                bar.set_target(next);
            });
            false
        })?;
        ui.on(quit, Hook::Click, |ui, _, _| {
            ui.stop();
            false
        })?;
    }

    ui.create_scene("status");
    ui.add(
        Label::new(" Esc quits. Click a field to focus it. "),
        ElementOptions::new().scene("status").fg("muted"),
    )?;
    ui.add_child_scene("main", "status", 0, -1, Some(Anchor::BottomLeft))?;

    ui.subscribe_global("key", |ui, event| {
        if let InputEvent::Key(key) = event {
            if key.code == KeyCode::Esc {
                ui.stop();
            }
        }
    });
    ui.subscribe_global(TERMINATE_EVENT, |ui, _| ui.stop());
    Ok(())
}
