use serde::{Deserialize, Serialize};

use crate::phrase_state::{PhraseProgress, PhraseStatus};

/// Unison outcome counts for a session, for result screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total: usize,
    pub awarded: usize,
    pub ended_without_award: usize,
    /// Started but still waiting on some players.
    pub in_progress: usize,
    pub not_started: usize,
}

impl SessionSummary {
    pub fn from_progress(progress: &[PhraseProgress]) -> Self {
        let mut summary = Self {
            total: progress.len(),
            ..Default::default()
        };
        for p in progress {
            if p.ended {
                if p.is_awarded() {
                    summary.awarded += 1;
                } else {
                    summary.ended_without_award += 1;
                }
            } else if p.status == PhraseStatus::NotStarted {
                summary.not_started += 1;
            } else {
                summary.in_progress += 1;
            }
        }
        summary
    }

    /// Fraction of unison phrases awarded (0.0 when the chart has none).
    pub fn award_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.awarded as f64 / self.total as f64
        }
    }
}
