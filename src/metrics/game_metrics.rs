use std::time::{Duration, Instant};

use crate::game::GameOutcome;

/// Session-level tallies across consecutive runs
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u64,
    pub longest_snake: usize,
    pub games_played: u32,
    pub wins: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            longest_snake: 0,
            games_played: 0,
            wins: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished run
    pub fn on_game_over(&mut self, outcome: GameOutcome, final_score: u64, length: usize) {
        self.games_played += 1;
        if outcome == GameOutcome::Won {
            self.wins += 1;
        }
        self.high_score = self.high_score.max(final_score);
        self.longest_snake = self.longest_snake.max(length);
    }

    pub fn losses(&self) -> u32 {
        self.games_played - self.wins
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_outcome_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(GameOutcome::Lost, 12, 7);
        metrics.on_game_over(GameOutcome::Won, 4, 26);
        metrics.on_game_over(GameOutcome::Lost, 3, 4);

        assert_eq!(metrics.games_played, 3);
        assert_eq!(metrics.wins, 1);
        assert_eq!(metrics.losses(), 2);
        assert_eq!(metrics.high_score, 12); // never decreases
        assert_eq!(metrics.longest_snake, 26);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
