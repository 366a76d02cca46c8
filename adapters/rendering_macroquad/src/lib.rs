#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Race.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use anyhow::{Context, Result};
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use maze_race_core::{Cord, Grid};
use maze_race_rendering::{
    Animator, Color, DrawSurface, MazeRenderer, Presentation, RenderingBackend, Scene, ThreadPacer,
    Viewport,
};
use std::{sync::mpsc, time::Duration};

/// Drawing surface backed by the macroquad window.
///
/// The viewport tracks the live window dimensions, so a
/// [`MazeRenderer::refresh`] before each frame picks up host resizes.
/// Region clears are painted in the surface's clear colour since macroquad
/// has no partial-erase primitive.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadSurface {
    clear_color: Color,
}

impl MacroquadSurface {
    /// Creates a surface that clears regions to the given colour.
    #[must_use]
    pub fn new(clear_color: Color) -> Self {
        Self { clear_color }
    }
}

impl DrawSurface for MacroquadSurface {
    fn viewport(&self) -> Option<Viewport> {
        let width = macroquad::window::screen_width();
        let height = macroquad::window::screen_height();
        if width <= 0.0 || height <= 0.0 {
            return None;
        }

        Some(Viewport::new(width, height))
    }

    fn clear(&mut self, origin: Vec2, size: Vec2) {
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            size.x,
            size.y,
            to_macroquad_color(self.clear_color),
        );
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, width, to_macroquad_color(color));
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, width: f32, color: Color) {
        macroquad::shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            size.x,
            size.y,
            width,
            to_macroquad_color(color),
        );
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            size.x,
            size.y,
            to_macroquad_color(color),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(color));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius,
            width,
            to_macroquad_color(color),
        );
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the window loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

        Self { quit_requested }
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints a frame rate line once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    fn window_conf(&self, window_title: String) -> macroquad::window::Conf {
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 720,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        config
    }

    /// Replays maze snapshots through the animation driver inside a window.
    ///
    /// Each `(Grid, Cord)` pair becomes one paced frame; once the sequence is
    /// exhausted the window idles on the final snapshot until `Q` or `Escape`
    /// is pressed. Fails when the window surface cannot be attached or a
    /// snapshot fails structural validation.
    pub fn run_playback<T>(
        self,
        window_title: T,
        clear_color: Color,
        snapshots: Vec<(Grid, Cord)>,
        frame_delay: Duration,
    ) -> Result<()>
    where
        T: Into<String>,
    {
        let config = self.window_conf(window_title.into());
        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut outcome_sender = Some(outcome_sender);
            let mut renderer = match MazeRenderer::attach(MacroquadSurface::new(clear_color))
                .context("failed to attach renderer to the macroquad window")
            {
                Ok(renderer) => renderer,
                Err(error) => {
                    if let Some(sender) = outcome_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }
            };

            let background = to_macroquad_color(clear_color);
            let mut next_snapshot = 0;

            loop {
                if KeyboardShortcuts::poll().quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                if let Err(error) = renderer.refresh().context("window surface went away") {
                    if let Some(sender) = outcome_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }

                let frame = if next_snapshot < snapshots.len() {
                    let (grid, cord) = &snapshots[next_snapshot];
                    next_snapshot += 1;
                    let mut animator =
                        Animator::with_delay(&mut renderer, ThreadPacer, frame_delay);
                    animator.advance(grid, *cord)
                } else if let Some((grid, cord)) = snapshots.last() {
                    // Idle on the final frame without pacing.
                    renderer.draw_grid(grid).map(|()| {
                        renderer.draw_indicator(*cord);
                    })
                } else {
                    Ok(())
                };

                if let Err(error) = frame.context("snapshot failed to render") {
                    if let Some(sender) = outcome_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }

                macroquad::window::next_frame().await;
            }

            if let Some(sender) = outcome_sender.take() {
                let _ = sender.send(Ok(()));
            }
        });

        outcome_receiver.recv().unwrap_or_else(|_| Ok(()))
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) + 'static,
    {
        let show_fps = self.show_fps;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let config = self.window_conf(window_title);
        let (outcome_sender, outcome_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut outcome_sender = Some(outcome_sender);
            let mut scene = scene;
            let mut renderer = match MazeRenderer::attach(MacroquadSurface::new(clear_color))
                .context("failed to attach renderer to the macroquad window")
            {
                Ok(renderer) => renderer,
                Err(error) => {
                    if let Some(sender) = outcome_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }
            };

            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                if KeyboardShortcuts::poll().quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                update_scene(frame_dt, &mut scene);

                let frame = renderer
                    .refresh()
                    .and_then(|()| renderer.render_scene(&scene));
                if let Err(error) = frame.context("scene failed to render") {
                    if let Some(sender) = outcome_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }

            if let Some(sender) = outcome_sender.take() {
                let _ = sender.send(Ok(()));
            }
        });

        outcome_receiver.recv().unwrap_or_else(|_| Ok(()))
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_only_after_a_full_second() {
        let mut counter = FpsCounter::default();

        for _ in 0..59 {
            assert_eq!(counter.record_frame(Duration::from_millis(16)), None);
        }

        let per_second = counter
            .record_frame(Duration::from_millis(64))
            .expect("a full second elapsed");
        assert!((per_second - 60.0 / 1.008).abs() < 0.1);
    }

    #[test]
    fn fps_counter_resets_after_reporting() {
        let mut counter = FpsCounter::default();

        let _ = counter.record_frame(Duration::from_secs(2));
        assert_eq!(counter.record_frame(Duration::from_millis(10)), None);
    }

    #[test]
    fn colors_convert_channel_for_channel() {
        let converted = to_macroquad_color(Color::new(0.25, 0.5, 0.75, 1.0));

        assert_eq!(converted.r, 0.25);
        assert_eq!(converted.g, 0.5);
        assert_eq!(converted.b, 0.75);
        assert_eq!(converted.a, 1.0);
    }

    #[test]
    fn vsync_maps_to_an_explicit_swap_interval() {
        let enabled = MacroquadBackend::new().with_vsync(true);
        let disabled = MacroquadBackend::new().with_vsync(false);

        assert_eq!(enabled.swap_interval, Some(1));
        assert_eq!(disabled.swap_interval, Some(0));
    }
}
