//! Round owner
//!
//! `Game` owns the live `GameState` and wires it to its collaborators: controls
//! come in through an `InputSource`, cues go out to an `AudioSink`, and the high
//! score is kept in a `ScoreStore`. Renderers and menus only get `&GameState`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::AudioSink;
use crate::input::InputSource;
use crate::persistence::ScoreStore;
use crate::sim::{GameEvent, GameState, RoundStatus, tick};
use crate::viewport::Viewport;

pub struct Game<I, A, S> {
    state: GameState,
    /// Master stream; each round draws its own layout seed from it
    rng: Pcg32,
    viewport: Viewport,
    input: I,
    audio: A,
    store: S,
}

impl<I: InputSource, A: AudioSink, S: ScoreStore> Game<I, A, S> {
    pub fn new(seed: u64, input: I, audio: A, store: S) -> Self {
        let high_score = store.load_high_score();
        Self {
            state: GameState::ready(high_score),
            rng: Pcg32::seed_from_u64(seed),
            viewport: Viewport::default(),
            input,
            audio,
            store,
        }
    }

    /// Start a new round with a fresh state and obstacle course
    pub fn init(&mut self) {
        let round_seed: u64 = self.rng.random();
        let high_score = self.store.load_high_score().max(self.state.high_score);
        self.state = GameState::new(round_seed, high_score);
        self.input.reset();
        log::info!(
            "Round started (seed={}, high score={})",
            round_seed,
            high_score
        );
    }

    /// Advance one tick with the current controls and canvas size
    pub fn update(&mut self) {
        let controls = self.input.controls();
        tick(&mut self.state, &controls, &self.viewport);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        let events = std::mem::take(&mut self.state.events);
        for event in &events {
            match *event {
                GameEvent::Jumped => self.audio.on_jump(),
                GameEvent::Scored { .. } => self.audio.on_score(),
                GameEvent::Died { .. } => self.audio.on_death(),
                GameEvent::LevelCompleted { .. } => {}
                GameEvent::NewHighScore { score } => {
                    if let Err(e) = self.store.save_high_score(score) {
                        log::warn!("Failed to persist high score {}: {}", score, e);
                    }
                }
            }
        }
        // Keep them readable until the next tick
        self.state.events = events;
    }

    /// Wrap up a finished round: stop the music and play the win jingle.
    ///
    /// Returns the terminal status, or `None` while the round is still live.
    pub fn conclude(&mut self) -> Option<RoundStatus> {
        let status = self.state.status;
        match status {
            RoundStatus::GameOver { .. } => {
                self.audio.on_music_stop();
            }
            RoundStatus::LevelComplete { .. } => {
                self.audio.on_music_stop();
                self.audio.on_level_complete();
            }
            RoundStatus::Ready | RoundStatus::Playing => return None,
        }
        Some(status)
    }

    /// Read-only view for renderers and menus
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Canvas size changed; takes effect on the next update
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
