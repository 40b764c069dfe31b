//! Keyboard-wedge barcode scanner detection.
//!
//! Scanners type like a keyboard, only much faster, and finish with Enter.
//! The classifier watches the timing of digit keystrokes and, once two digits
//! arrive less than `burst_threshold_ms` apart, claims the burst: further
//! digits are swallowed so they do not leak into the focused input, and the
//! closing Enter yields the scanned code.
//!
//! ```text
//! Idle --digit--> Accumulating --fast digit--> Confirmed --Enter--> Idle (scan)
//!   ^                  |                            |
//!   +---- quiet window elapsed / teardown ----------+
//! ```
//!
//! The classifier is pure: the caller passes timestamps and owns the timer
//! that calls [`ScanClassifier::expire`].

use crate::shared::config::ScannerConfig;

/// The parts of a `keydown` event the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke<'a> {
    pub key: &'a str,
    /// Ctrl, Meta or Alt held
    pub with_modifier: bool,
}

impl<'a> KeyStroke<'a> {
    pub fn plain(key: &'a str) -> Self {
        Self {
            key,
            with_modifier: false,
        }
    }

    fn digit(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => Some(c),
            _ => None,
        }
    }
}

/// What the event handler must do with the event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDecision {
    /// Leave the event alone.
    PassThrough,
    /// Digit added to the candidate scan. The quiet-window timer must be
    /// (re)armed; `swallow` asks to prevent default and stop propagation.
    Buffered { swallow: bool },
    /// Scan complete. Swallow the Enter and resolve the code.
    Scanned(String),
}

impl KeyDecision {
    pub fn swallows(&self) -> bool {
        matches!(
            self,
            KeyDecision::Buffered { swallow: true } | KeyDecision::Scanned(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanSession {
    pub buffer: String,
    pub first_key_ms: f64,
    pub last_key_ms: f64,
}

impl ScanSession {
    fn start(digit: char, now_ms: f64) -> Self {
        Self {
            buffer: digit.to_string(),
            first_key_ms: now_ms,
            last_key_ms: now_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    /// Digits seen, not yet fast enough to be a scanner
    Accumulating(ScanSession),
    /// Sub-threshold interval observed, this is a scanner burst
    Confirmed(ScanSession),
}

#[derive(Debug, Clone)]
pub struct ScanClassifier {
    config: ScannerConfig,
    state: ScanState,
}

impl ScanClassifier {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn looks_like_scanner(&self) -> bool {
        matches!(self.state, ScanState::Confirmed(_))
    }

    pub fn buffer(&self) -> &str {
        match &self.state {
            ScanState::Idle => "",
            ScanState::Accumulating(s) | ScanState::Confirmed(s) => &s.buffer,
        }
    }

    pub fn quiet_window_ms(&self) -> u32 {
        self.config.quiet_window_ms
    }

    /// Quiet window elapsed without a qualifying keystroke: abandon the
    /// candidate scan.
    pub fn expire(&mut self) {
        if self.state != ScanState::Idle {
            log::trace!("scan session discarded: '{}'", self.buffer());
        }
        self.state = ScanState::Idle;
    }

    /// Drops any pending session (screen teardown).
    pub fn reset(&mut self) {
        self.state = ScanState::Idle;
    }

    fn last_key_ms(&self) -> Option<f64> {
        match &self.state {
            ScanState::Idle => None,
            ScanState::Accumulating(s) | ScanState::Confirmed(s) => Some(s.last_key_ms),
        }
    }

    /// A timer that should have fired may still be queued behind this event;
    /// honour the window from timestamps as well.
    fn expire_if_stale(&mut self, now_ms: f64) {
        if let Some(last) = self.last_key_ms() {
            if now_ms - last >= f64::from(self.config.quiet_window_ms) {
                self.expire();
            }
        }
    }

    pub fn on_key_down(&mut self, stroke: KeyStroke<'_>, now_ms: f64) -> KeyDecision {
        if stroke.with_modifier {
            return KeyDecision::PassThrough;
        }

        if stroke.key == "Enter" {
            return self.on_enter(now_ms);
        }

        match stroke.digit() {
            Some(digit) => self.on_digit(digit, now_ms),
            None => KeyDecision::PassThrough,
        }
    }

    fn on_enter(&mut self, now_ms: f64) -> KeyDecision {
        self.expire_if_stale(now_ms);
        match std::mem::take(&mut self.state) {
            ScanState::Confirmed(session) if !session.buffer.is_empty() => {
                log::debug!(
                    "scan completed: '{}' in {:.0}ms",
                    session.buffer,
                    session.last_key_ms - session.first_key_ms
                );
                KeyDecision::Scanned(session.buffer)
            }
            // Not ours; the timer clears whatever is pending.
            other => {
                self.state = other;
                KeyDecision::PassThrough
            }
        }
    }

    fn on_digit(&mut self, digit: char, now_ms: f64) -> KeyDecision {
        self.expire_if_stale(now_ms);
        let threshold = self.config.burst_threshold_ms;

        self.state = match std::mem::take(&mut self.state) {
            ScanState::Idle => ScanState::Accumulating(ScanSession::start(digit, now_ms)),
            ScanState::Accumulating(mut session) => {
                let delta = now_ms - session.last_key_ms;
                session.last_key_ms = now_ms;
                session.buffer.push(digit);
                if delta > 0.0 && delta < threshold {
                    log::debug!("scanner detected ({:.1}ms between keys)", delta);
                    ScanState::Confirmed(session)
                } else {
                    ScanState::Accumulating(session)
                }
            }
            ScanState::Confirmed(mut session) => {
                session.last_key_ms = now_ms;
                session.buffer.push(digit);
                ScanState::Confirmed(session)
            }
        };

        KeyDecision::Buffered {
            swallow: self.looks_like_scanner(),
        }
    }
}
