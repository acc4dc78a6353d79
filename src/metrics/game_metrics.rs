use std::time::{Duration, Instant};

use crate::game::TickInfo;

/// Per-session counters shown in the header bar
#[derive(Debug)]
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub food_eaten: u32,
    /// Ticks where the hint was on but no route to the food existed
    pub hintless_ticks: u32,
    game_over_recorded: bool,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
            hintless_ticks: 0,
            game_over_recorded: false,
        }
    }

    /// Refresh the game clock; frozen once the game is over
    pub fn update(&mut self) {
        if !self.game_over_recorded {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.game_over_recorded = false;
    }

    /// Fold one tick's outcome into the counters
    pub fn record_tick(&mut self, info: &TickInfo, score: u32) {
        if info.reset {
            self.on_game_start();
        }
        if info.ate_food {
            self.food_eaten += 1;
        }
        if info.hint_found == Some(false) {
            self.hintless_ticks += 1;
        }
        if info.died || info.grid_full {
            self.on_game_over(score);
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        if self.game_over_recorded {
            return;
        }
        self.update();
        self.game_over_recorded = true;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
