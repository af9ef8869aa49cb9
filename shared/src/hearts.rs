use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_HEARTS: usize = 20;
/// Interval the shell should use for `Event::HeartTick`.
pub const HEART_SPAWN_INTERVAL_MS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heart {
    pub id: u64,
    pub left_pct: f64,
    pub size_px: f64,
    pub duration_s: f64,
}

/// Rolling window of floating-heart decorations.
#[derive(Debug, Clone, Default)]
pub struct Hearts {
    next_id: u64,
    live: VecDeque<Heart>,
}

impl Hearts {
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Heart {
        let heart = Heart {
            id: self.next_id,
            left_pct: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(15.0..30.0),
            duration_s: rng.gen_range(4.0..8.0),
        };
        self.next_id += 1;
        self.live.push_back(heart);
        while self.live.len() > MAX_HEARTS {
            self.live.pop_front();
        }
        heart
    }

    pub fn iter(&self) -> impl Iterator<Item = &Heart> {
        self.live.iter()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}
