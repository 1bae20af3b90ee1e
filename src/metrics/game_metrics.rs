use crate::game::EndReason;

/// Statistics that outlive a single session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameMetrics {
    pub high_score: u32,
    pub games_played: u32,
    pub last_score: Option<u32>,
    pub last_end_reason: Option<EndReason>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_game_over(&mut self, final_score: u32, reason: EndReason) {
        self.games_played += 1;
        self.last_score = Some(final_score);
        self.last_end_reason = Some(reason);
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }
}

/// Formats seconds as "MM:SS"; minutes keep counting past an hour
pub fn format_time(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
