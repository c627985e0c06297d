#![forbid(unsafe_code)]

//! Typing-text animation.
//!
//! The animation is a ticker: every [`TypingAnimation::tick`] advances one
//! step and returns the text to show plus the delay before the next tick.
//! The host owns the actual timer and re-arms it with that delay, so the
//! whole cycle is deterministic under test.
//!
//! ```text
//! Typing --(full phrase)--> Pausing --(tick)--> Deleting --(empty)--> Typing (next phrase)
//! ```

use core::time::Duration;

use crate::config::TypingTiming;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypingPhase {
    #[default]
    Typing,
    /// Full phrase on screen; the next tick starts deleting.
    Pausing,
    Deleting,
}

/// Output of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next_delay: Duration,
}

/// Cursor over a rotating phrase list.
///
/// `char_index` counts characters, not bytes, and stays within
/// `0..=phrase.chars().count()`.
#[derive(Debug, Clone)]
pub struct TypingAnimation {
    phrases: Vec<Vec<char>>,
    timing: TypingTiming,
    phrase_index: usize,
    char_index: usize,
    phase: TypingPhase,
    cancelled: bool,
}

impl TypingAnimation {
    /// Empty phrases are dropped; with none left the animation is inert.
    #[must_use]
    pub fn new<I, S>(phrases: I, timing: TypingTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|p| p.as_ref().chars().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            phrases,
            timing,
            phrase_index: 0,
            char_index: 0,
            phase: TypingPhase::Typing,
            cancelled: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    #[must_use]
    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    #[must_use]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// Whether ticks still produce frames.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cancelled && !self.phrases.is_empty()
    }

    /// Stop the animation. Subsequent ticks return `None`.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            tracing::debug!(phrase = self.phrase_index, "typing animation cancelled");
        }
        self.cancelled = true;
    }

    /// Currently visible text.
    #[must_use]
    pub fn visible_text(&self) -> String {
        self.phrases
            .get(self.phrase_index)
            .map(|p| p[..self.char_index].iter().collect())
            .unwrap_or_default()
    }

    /// Advance one step. `None` once cancelled or when there is nothing to type.
    pub fn tick(&mut self) -> Option<TypingFrame> {
        if !self.is_running() {
            return None;
        }
        let len = self.phrases[self.phrase_index].len();

        let next_delay = match self.phase {
            TypingPhase::Typing => {
                self.char_index = (self.char_index + 1).min(len);
                if self.char_index == len {
                    self.phase = TypingPhase::Pausing;
                    self.timing.pause
                } else {
                    self.timing.type_delay
                }
            }
            TypingPhase::Pausing | TypingPhase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.phase = TypingPhase::Typing;
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    self.timing.type_delay
                } else {
                    self.phase = TypingPhase::Deleting;
                    self.timing.delete_delay
                }
            }
        };

        Some(TypingFrame {
            text: self.visible_text(),
            next_delay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn frame(text: &str, delay: u64) -> Option<TypingFrame> {
        Some(TypingFrame {
            text: text.to_string(),
            next_delay: ms(delay),
        })
    }

    #[test]
    fn types_pauses_then_deletes() {
        let mut anim = TypingAnimation::new(["Hi"], TypingTiming::default());

        assert_eq!(anim.tick(), frame("H", 70));
        assert_eq!(anim.tick(), frame("Hi", 1200));
        assert_eq!(anim.phase(), TypingPhase::Pausing);
        assert_eq!(anim.tick(), frame("H", 40));
        assert_eq!(anim.phase(), TypingPhase::Deleting);
        assert_eq!(anim.tick(), frame("", 70));
        assert_eq!(anim.phase(), TypingPhase::Typing);
    }

    #[test]
    fn wraps_to_next_phrase() {
        let mut anim = TypingAnimation::new(["ab", "c"], TypingTiming::default());
        // a, ab, (pause) a, ""
        for _ in 0..4 {
            anim.tick();
        }
        assert_eq!(anim.phrase_index(), 1);
        assert_eq!(anim.tick(), frame("c", 1200));
        assert_eq!(anim.tick(), frame("", 70));
        assert_eq!(anim.phrase_index(), 0);
        assert_eq!(anim.tick(), frame("a", 70));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut anim = TypingAnimation::new(["né"], TypingTiming::default());
        assert_eq!(anim.tick(), frame("n", 70));
        assert_eq!(anim.tick(), frame("né", 1200));
        assert_eq!(anim.char_index(), 2);
    }

    #[test]
    fn empty_phrases_are_skipped() {
        let mut anim = TypingAnimation::new(["", "x", ""], TypingTiming::default());
        assert_eq!(anim.tick(), frame("x", 1200));
        assert_eq!(anim.tick(), frame("", 70));
        assert_eq!(anim.tick(), frame("x", 1200));

        let mut inert = TypingAnimation::new(Vec::<String>::new(), TypingTiming::default());
        assert!(!inert.is_running());
        assert_eq!(inert.tick(), None);
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut anim = TypingAnimation::new(["Hello"], TypingTiming::default());
        anim.tick();
        anim.cancel();
        assert_eq!(anim.tick(), None);
        assert_eq!(anim.visible_text(), "H");
    }

    #[test]
    fn custom_timing_is_used() {
        let timing = TypingTiming {
            type_delay: ms(5),
            delete_delay: ms(3),
            pause: ms(9),
        };
        let mut anim = TypingAnimation::new(["ab"], timing);
        assert_eq!(anim.tick(), frame("a", 5));
        assert_eq!(anim.tick(), frame("ab", 9));
        assert_eq!(anim.tick(), frame("a", 3));
    }
}
