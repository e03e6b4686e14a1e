//! GUI module for the application.
//!
//! An always-on-top eframe window that shows, for both Pokémon in battle,
//! which attacking types hit hard, bounce off, or do nothing.

pub mod icons;
pub mod render;
pub mod state;

use anyhow::{anyhow, Result};
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Vec2};

use crate::tracker::{
    start_tracker, Pipeline, SideSink, SideUpdate, TextSource, TrackerConfig, TrackerHandle,
};

use icons::TypeIcons;
use state::{OverlayState, TrackerEvent};

const WINDOW_TITLE: &str = "PokeMMO PVP Helper";

/// Forwards tracker results to the GUI thread and wakes it up.
pub struct GuiSink {
    sender: Sender<TrackerEvent>,
    ctx: egui::Context,
}

impl GuiSink {
    pub fn new(sender: Sender<TrackerEvent>, ctx: egui::Context) -> Self {
        Self { sender, ctx }
    }
}

impl SideSink for GuiSink {
    fn on_side_updated(&mut self, update: SideUpdate) -> Result<()> {
        self.sender
            .send(TrackerEvent::Updated(update))
            .map_err(|_| anyhow!("Overlay window closed"))?;
        self.ctx.request_repaint();
        Ok(())
    }

    fn on_stopped(&mut self, error: Option<String>) {
        // The window may already be gone
        let _ = self.sender.send(TrackerEvent::Stopped(error));
        self.ctx.request_repaint();
    }
}

/// Main overlay application struct.
pub struct OverlayApp {
    state: OverlayState,
    icons: TypeIcons,
    events: Receiver<TrackerEvent>,
    /// Dropping the app stops the tracker thread.
    _tracker: TrackerHandle,
}

impl OverlayApp {
    /// Loads icons and starts the tracker bound to this window's context.
    fn new<T>(
        cc: &eframe::CreationContext<'_>,
        pipeline: Pipeline,
        source: T,
        config: TrackerConfig,
        type_names: &[String],
    ) -> Self
    where
        T: TextSource + Send + 'static,
    {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let icons = TypeIcons::load(
            &cc.egui_ctx,
            &crate::paths::get_icons_dir(),
            type_names,
            config.window.icon_size,
        );

        let (sender, events) = mpsc::channel();
        let sink = GuiSink::new(sender, cc.egui_ctx.clone());
        let state = OverlayState::new(config.refresh_interval_ms);
        let tracker = start_tracker(pipeline, source, sink, config);

        Self {
            state,
            icons,
            events,
            _tracker: tracker,
        }
    }

    /// Applies every event queued since the last frame.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.state.apply_event(event);
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let frame = egui::Frame::none()
            .fill(render::BACKGROUND)
            .inner_margin(10.0);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            render::render_overlay(ui, &self.state, &self.icons);
        });
    }
}

/// Top-left corner for the window: configured, or flush with the right
/// edge of the primary screen.
fn window_position(config: &TrackerConfig, screen_width: Option<u32>) -> egui::Pos2 {
    let window = &config.window;
    let x = match (window.x, screen_width) {
        (Some(x), _) => x,
        (None, Some(screen_width)) => (screen_width as f32 - window.width).max(0.0),
        (None, None) => 0.0,
    };
    egui::pos2(x, window.y)
}

/// Run the overlay. The tracker starts once the window exists and stops
/// when it closes.
/// This function blocks until the window is closed.
pub fn run_gui<T>(
    pipeline: Pipeline,
    source: T,
    config: TrackerConfig,
    type_names: Vec<String>,
) -> eframe::Result<()>
where
    T: TextSource + Send + 'static,
{
    crate::log("GUI: Creating native options...");

    let window = &config.window;
    let screen_width = crate::capture::primary_screen_size().map(|(w, _)| w);

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(Vec2::new(window.width, window.height))
        .with_position(window_position(&config, screen_width))
        .with_title(WINDOW_TITLE);
    if window.always_on_top {
        viewport = viewport.with_window_level(egui::WindowLevel::AlwaysOnTop);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    crate::log("GUI: Calling eframe::run_native...");

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            crate::log("GUI: Creating OverlayApp instance...");
            Ok(Box::new(OverlayApp::new(
                cc,
                pipeline,
                source,
                config,
                &type_names,
            )))
        }),
    )
}
