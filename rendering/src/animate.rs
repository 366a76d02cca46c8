//! Paced frame advancement for animated maze playback.

use crate::{DrawSurface, MazeRenderer, RenderError};
use maze_race_core::{Cord, Grid};
use std::thread;
use std::time::Duration;

/// Default suspension between animation frames.
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(50);

/// Cooperative suspension point between animation frames.
///
/// The animator never touches the wall clock directly; injecting the pacer
/// lets tests simulate elapsed time deterministically while production code
/// uses [`ThreadPacer`].
pub trait FramePacer {
    /// Suspends the caller for at least the given delay.
    fn pause(&mut self, delay: Duration);
}

impl<P: FramePacer + ?Sized> FramePacer for &mut P {
    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay);
    }
}

/// Pacer backed by the operating system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl FramePacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Replays maze snapshots as evenly paced animation frames.
///
/// Each [`advance`](Animator::advance) is one complete, self-contained
/// frame: full grid redraw, step indicator, then the pacing suspension.
/// Control only returns to the caller once the suspension completes, so no
/// frame can begin before the previous one finished — the single-writer
/// discipline the shared surface requires.
#[derive(Debug)]
pub struct Animator<'r, S, P> {
    renderer: &'r mut MazeRenderer<S>,
    pacer: P,
    delay: Duration,
}

impl<'r, S: DrawSurface, P: FramePacer> Animator<'r, S, P> {
    /// Creates an animator over the renderer with the default frame delay.
    pub fn new(renderer: &'r mut MazeRenderer<S>, pacer: P) -> Self {
        Self::with_delay(renderer, pacer, DEFAULT_FRAME_DELAY)
    }

    /// Creates an animator with an explicit frame delay.
    pub fn with_delay(renderer: &'r mut MazeRenderer<S>, pacer: P, delay: Duration) -> Self {
        Self {
            renderer,
            pacer,
            delay,
        }
    }

    /// Renders one snapshot and suspends for the configured delay.
    ///
    /// Propagates [`RenderError::InvalidGrid`] before anything is drawn or
    /// paused when the snapshot fails validation.
    pub fn advance(&mut self, grid: &Grid, cord: Cord) -> Result<(), RenderError> {
        self.renderer.draw_grid(grid)?;
        self.renderer.draw_indicator(cord);
        self.pacer.pause(self.delay);

        Ok(())
    }

    /// The configured suspension between frames.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, RecordingSurface, INDICATOR_COLOR};
    use std::time::Instant;

    #[derive(Debug, Default)]
    struct RecordingPacer {
        pauses: Vec<Duration>,
    }

    impl FramePacer for RecordingPacer {
        fn pause(&mut self, delay: Duration) {
            self.pauses.push(delay);
        }
    }

    fn renderer() -> MazeRenderer<RecordingSurface> {
        MazeRenderer::attach(RecordingSurface::new(210.0, 210.0))
            .expect("recording surface is available")
    }

    #[test]
    fn advance_draws_the_full_frame_before_pausing_once() {
        let mut renderer = renderer();
        let mut pacer = RecordingPacer::default();
        let delay = Duration::from_millis(20);

        {
            let mut animator = Animator::with_delay(&mut renderer, &mut pacer, delay);
            animator
                .advance(&Grid::fully_walled(3), Cord::cell(1, 1))
                .expect("snapshot advances");
        }

        assert_eq!(pacer.pauses, vec![delay]);
        let commands = renderer.surface().commands();
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        match commands.last().expect("frame recorded") {
            DrawCommand::FillRect { color, .. } => assert_eq!(*color, INDICATOR_COLOR),
            other => panic!("expected the indicator fill last, got {other:?}"),
        }
    }

    #[test]
    fn invalid_snapshot_aborts_before_drawing_or_pausing() {
        let mut renderer = renderer();
        let mut pacer = RecordingPacer::default();
        let ragged = Grid::from_rows(vec![vec![maze_race_core::CellWalls::all(); 2]]);

        {
            let mut animator = Animator::new(&mut renderer, &mut pacer);
            let error = animator
                .advance(&ragged, Cord::cell(0, 0))
                .expect_err("ragged snapshot must be rejected");
            assert_eq!(error, RenderError::InvalidGrid);
        }

        assert!(pacer.pauses.is_empty());
        assert!(renderer.surface().commands().is_empty());
    }

    #[test]
    fn default_delay_is_fifty_milliseconds() {
        let mut renderer = renderer();
        let animator = Animator::new(&mut renderer, ThreadPacer);

        assert_eq!(animator.delay(), Duration::from_millis(50));
    }

    #[test]
    fn thread_pacer_holds_the_frame_for_at_least_the_delay() {
        let mut renderer = renderer();
        let delay = Duration::from_millis(20);
        let mut animator = Animator::with_delay(&mut renderer, ThreadPacer, delay);

        let started = Instant::now();
        animator
            .advance(&Grid::fully_walled(2), Cord::cell(0, 0))
            .expect("snapshot advances");

        assert!(started.elapsed() >= delay);
    }
}
