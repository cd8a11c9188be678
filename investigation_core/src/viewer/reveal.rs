//! Typewriter reveal of chapter text.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pacing of the animated reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    /// Delay between consecutive characters starting to appear.
    pub char_delay_ms: u64,
    /// How long each character takes to fade in.
    pub char_fade_ms: u64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            char_delay_ms: 20,
            char_fade_ms: 50,
        }
    }
}

/// How a chapter's text should be put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPlan {
    /// Everything at once; used for chapters already read.
    Immediate,
    /// One character after another; character `i` starts at `i * char_delay`.
    Animated {
        char_delay: Duration,
        char_fade: Duration,
    },
}

impl RevealPlan {
    pub fn animated(timing: RevealTiming) -> Self {
        RevealPlan::Animated {
            char_delay: Duration::from_millis(timing.char_delay_ms),
            char_fade: Duration::from_millis(timing.char_fade_ms),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, RevealPlan::Animated { .. })
    }

    /// Number of characters of `text` that have started to appear after `elapsed`.
    pub fn visible_chars(&self, text: &str, elapsed: Duration) -> usize {
        let total = text.chars().count();
        match self {
            RevealPlan::Immediate => total,
            RevealPlan::Animated { char_delay, .. } => {
                if total == 0 || char_delay.is_zero() {
                    return total;
                }
                let started = elapsed.as_nanos() / char_delay.as_nanos() + 1;
                usize::try_from(started).unwrap_or(usize::MAX).min(total)
            }
        }
    }

    /// The part of `text` that has started to appear after `elapsed`.
    pub fn visible_prefix<'t>(&self, text: &'t str, elapsed: Duration) -> &'t str {
        let count = self.visible_chars(text, elapsed);
        match text.char_indices().nth(count) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    /// Time until the last character of `text` is fully visible.
    pub fn duration(&self, text: &str) -> Duration {
        match self {
            RevealPlan::Immediate => Duration::ZERO,
            RevealPlan::Animated {
                char_delay,
                char_fade,
            } => {
                let total = text.chars().count();
                if total == 0 {
                    return Duration::ZERO;
                }
                let steps = u32::try_from(total - 1).unwrap_or(u32::MAX);
                char_delay.saturating_mul(steps).saturating_add(*char_fade)
            }
        }
    }

    pub fn is_complete(&self, text: &str, elapsed: Duration) -> bool {
        elapsed >= self.duration(text)
    }
}
