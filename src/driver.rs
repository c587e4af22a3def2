//! Frame loop driver
//!
//! One `update` + `render` per display frame. The driver keeps at most one
//! pending frame request and stops scheduling once the round is over or
//! something fails.

use crate::audio::AudioSink;
use crate::consts::HEARTBEAT_FRAMES;
use crate::error::GameError;
use crate::game::Game;
use crate::input::InputSource;
use crate::persistence::ScoreStore;
use crate::renderer::Renderer;
use crate::sim::RoundStatus;

/// Source of "next frame" callbacks
pub trait FrameScheduler {
    type Handle;

    fn request_frame(&mut self) -> Result<Self::Handle, GameError>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Where the loop is
#[derive(Debug, Clone, PartialEq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped(RoundStatus),
    Faulted(String),
}

pub struct LoopDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    state: LoopState,
    frames: u64,
}

impl<S: FrameScheduler> LoopDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: LoopState::Idle,
            frames: 0,
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames run since the last `start`
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Begin a round's loop. Any callback still pending from before is dropped first.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.cancel_pending();
        self.frames = 0;
        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                self.state = LoopState::Running;
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to schedule first frame: {}", e);
                self.state = LoopState::Faulted(e.to_string());
                Err(e)
            }
        }
    }

    /// Tear down; nothing runs until the next `start`
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.state = LoopState::Idle;
    }

    /// Run one frame. Called from the scheduler's callback.
    pub fn frame<I, A, St, R>(&mut self, game: &mut Game<I, A, St>, renderer: &mut R) -> &LoopState
    where
        I: InputSource,
        A: AudioSink,
        St: ScoreStore,
        R: Renderer + ?Sized,
    {
        // The callback that got us here is spent
        self.pending = None;

        if self.state != LoopState::Running {
            return &self.state;
        }

        if let Some(status) = game.conclude() {
            self.cancel_pending();
            log::info!(
                "Loop stopped after {} frames ({})",
                self.frames,
                status.as_str()
            );
            self.state = LoopState::Stopped(status);
            return &self.state;
        }

        if let Err(e) = self.step(game, renderer) {
            self.cancel_pending();
            let diagnostics = serde_json::to_string(&game.state().diagnostics())
                .unwrap_or_else(|_| String::from("{}"));
            log::error!("Frame {} failed: {} | state={}", self.frames, e, diagnostics);
            self.state = LoopState::Faulted(e.to_string());
        }

        &self.state
    }

    fn step<I, A, St, R>(&mut self, game: &mut Game<I, A, St>, renderer: &mut R) -> Result<(), GameError>
    where
        I: InputSource,
        A: AudioSink,
        St: ScoreStore,
        R: Renderer + ?Sized,
    {
        game.update();
        renderer.render(game.state(), game.viewport())?;

        self.frames += 1;
        if self.frames % HEARTBEAT_FRAMES == 0 {
            let state = game.state();
            log::debug!(
                "frame={} tick={} score={} offset={:.1} status={}",
                self.frames,
                state.tick,
                state.score,
                state.world_offset,
                state.status.as_str()
            );
        }

        self.pending = Some(self.scheduler.request_frame()?);
        Ok(())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

/// Scheduler driven by hand: headless runs and tests call `frame` in a loop
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    /// Requests not yet cancelled or consumed
    pub pending: Vec<u32>,
    pub requested: u32,
    pub cancelled: u32,
    /// Refuse requests from this many onwards, for failure tests
    pub fail_after: Option<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the oldest request as delivered. Returns false when nothing is pending.
    pub fn fire(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.pending.remove(0);
        true
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Result<u32, GameError> {
        if self.fail_after.is_some_and(|limit| self.requested >= limit) {
            return Err(GameError::Schedule("frame budget exhausted".into()));
        }
        self.next_id += 1;
        self.requested += 1;
        self.pending.push(self.next_id);
        Ok(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.pending.retain(|&id| id != handle);
        self.cancelled += 1;
    }
}

/// Run a whole round with `ManualScheduler`, up to `max_frames` frames.
///
/// `before_frame` runs ahead of every frame, e.g. to steer with an autopilot.
pub fn run_headless<I, A, St, R>(
    driver: &mut LoopDriver<ManualScheduler>,
    game: &mut Game<I, A, St>,
    renderer: &mut R,
    max_frames: u64,
    mut before_frame: impl FnMut(&mut Game<I, A, St>),
) -> LoopState
where
    I: InputSource,
    A: AudioSink,
    St: ScoreStore,
    R: Renderer + ?Sized,
{
    if driver.start().is_err() {
        return driver.state().clone();
    }
    while driver.frames() < max_frames && driver.scheduler_mut().fire() {
        before_frame(game);
        if driver.frame(game, renderer) != &LoopState::Running {
            break;
        }
    }
    driver.state().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Controls;
    use crate::persistence::{HighScoreStore, MemoryStorage};
    use crate::sim::{GameState, Obstacle};
    use crate::viewport::Viewport;

    type TestGame = Game<Controls, (), HighScoreStore<MemoryStorage>>;

    fn game() -> TestGame {
        let mut game = Game::new(3, Controls::default(), (), HighScoreStore::new(MemoryStorage::new()));
        game.init();
        game
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, _state: &GameState, _viewport: &Viewport) -> Result<(), GameError> {
            self.frames += 1;
            Ok(())
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&mut self, _state: &GameState, _viewport: &Viewport) -> Result<(), GameError> {
            Err(GameError::ContextUnavailable)
        }
    }

    #[test]
    fn test_start_requests_one_frame() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        driver.start().unwrap();
        assert!(driver.is_running());
        assert_eq!(driver.scheduler().pending.len(), 1);
    }

    #[test]
    fn test_restart_keeps_single_pending_frame() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        driver.start().unwrap();
        driver.start().unwrap();
        driver.start().unwrap();
        assert_eq!(driver.scheduler().pending.len(), 1);
        assert_eq!(driver.scheduler().cancelled, 2);
    }

    #[test]
    fn test_frame_updates_renders_and_reschedules() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        driver.start().unwrap();

        for _ in 0..5 {
            assert!(driver.scheduler_mut().fire());
            assert_eq!(driver.frame(&mut game, &mut renderer), &LoopState::Running);
            assert_eq!(driver.scheduler().pending.len(), 1);
        }
        assert_eq!(renderer.frames, 5);
        assert_eq!(game.state().tick, 5);
        assert_eq!(driver.frames(), 5);
    }

    #[test]
    fn test_terminal_round_stops_loop() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        driver.start().unwrap();

        // Stand still on top of a lion
        game.state_mut().obstacles = vec![Obstacle::animal(20.0, 0.0)];

        driver.scheduler_mut().fire();
        driver.frame(&mut game, &mut renderer);
        assert!(game.state().is_game_over());

        driver.scheduler_mut().fire();
        let state = driver.frame(&mut game, &mut renderer).clone();
        assert_eq!(state, LoopState::Stopped(RoundStatus::GameOver { score: 0 }));
        assert!(driver.scheduler().pending.is_empty());
        // No render once the round is over
        assert_eq!(renderer.frames, 1);
    }

    #[test]
    fn test_render_failure_faults_loop() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        let mut game = game();
        driver.start().unwrap();

        driver.scheduler_mut().fire();
        let state = driver.frame(&mut game, &mut FailingRenderer).clone();

        assert!(matches!(state, LoopState::Faulted(_)));
        assert!(driver.scheduler().pending.is_empty());

        // Later callbacks are ignored
        let tick = game.state().tick;
        driver.frame(&mut game, &mut FailingRenderer);
        assert_eq!(game.state().tick, tick);
    }

    #[test]
    fn test_schedule_failure_faults_loop() {
        let mut driver = LoopDriver::new(ManualScheduler {
            fail_after: Some(2),
            ..Default::default()
        });
        let mut game = game();
        let mut renderer = CountingRenderer::default();
        driver.start().unwrap();

        driver.scheduler_mut().fire();
        assert_eq!(driver.frame(&mut game, &mut renderer), &LoopState::Running);
        driver.scheduler_mut().fire();
        assert!(matches!(
            driver.frame(&mut game, &mut renderer),
            LoopState::Faulted(_)
        ));
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        let mut game = game();
        driver.start().unwrap();
        driver.stop();

        assert_eq!(driver.state(), &LoopState::Idle);
        assert!(driver.scheduler().pending.is_empty());
        driver.frame(&mut game, &mut CountingRenderer::default());
        assert_eq!(game.state().tick, 0);
    }

    #[test]
    fn test_headless_round_reaches_terminal_state() {
        let mut driver = LoopDriver::new(ManualScheduler::new());
        let mut game = game();
        *game.input_mut() = Controls {
            right: true,
            ..Default::default()
        };

        let state = run_headless(
            &mut driver,
            &mut game,
            &mut CountingRenderer::default(),
            5_000,
            |_| {},
        );

        // Running right without jumping hits the first obstacle
        assert!(matches!(state, LoopState::Stopped(RoundStatus::GameOver { .. })));
        assert!(game.state().is_game_over());
    }
}
