//! Overlay state
//!
//! Tracks which overlay is showing and the last round's score for the HUD.
//! Only one screen is visible at a time.

use serde::Serialize;

/// Which overlay is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Screen {
    #[default]
    Title,
    Instructions,
    /// No overlay; the round is live
    Playing,
    GameOver,
    LevelComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MenuState {
    pub screen: Screen,
    /// Score of the round that just ended
    pub score: u32,
    pub high_score: u32,
}

impl MenuState {
    pub fn new(high_score: u32) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    pub fn start_game(&mut self) {
        self.screen = Screen::Playing;
        self.score = 0;
    }

    pub fn restart_game(&mut self) {
        self.start_game();
    }

    pub fn show_instructions(&mut self) {
        self.screen = Screen::Instructions;
    }

    /// Back to the title screen
    pub fn hide_instructions(&mut self) {
        self.screen = Screen::Title;
    }

    pub fn on_game_over(&mut self, score: u32) {
        self.screen = Screen::GameOver;
        self.record(score);
    }

    pub fn on_level_complete(&mut self, score: u32) {
        self.screen = Screen::LevelComplete;
        self.record(score);
    }

    fn record(&mut self, score: u32) {
        self.score = score;
        self.high_score = self.high_score.max(score);
    }

    /// Input is only live while no overlay covers the canvas
    pub fn accepts_input(&self) -> bool {
        self.screen == Screen::Playing
    }
}
