//! OTP entry state machine and resend cooldown.
//!
//! Mirrors the six-box verification screen: typing a digit fills the
//! current box and advances the cursor, backspace on an empty box steps
//! back, and submission stays disabled until all six digits are present.

use std::time::{Duration, Instant};

pub const OTP_LEN: usize = 6;
pub const RESEND_COOLDOWN_SECS: u64 = 60;

/// Six single-digit slots plus a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpEntry {
    digits: [Option<u8>; OTP_LEN],
    cursor: usize,
}

impl OtpEntry {
    pub fn new() -> Self {
        Self {
            digits: [None; OTP_LEN],
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn digits(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.digits.iter().copied()
    }

    /// Type a character into the current box. Non-digits are ignored;
    /// digits fill the box and advance the cursor (the last box keeps
    /// focus, matching the screen it mimics).
    pub fn push(&mut self, ch: char) -> bool {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        self.digits[self.cursor] = Some(digit as u8);
        if self.cursor < OTP_LEN - 1 {
            self.cursor += 1;
        }
        true
    }

    /// Backspace: clear a filled box in place, or step back from an empty
    /// one.
    pub fn backspace(&mut self) {
        if self.digits[self.cursor].is_some() {
            self.digits[self.cursor] = None;
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// All six digits present; submission is gated on this.
    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    /// The concatenated code, only once complete.
    pub fn code(&self) -> Option<String> {
        if !self.is_complete() {
            return None;
        }
        Some(
            self.digits
                .iter()
                .flatten()
                .map(|d| char::from(b'0' + d))
                .collect(),
        )
    }

    /// Empty all boxes and return the cursor to the first one. Used after a
    /// failed verification and after a resend.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for OtpEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall-clock resend cooldown. Starts when the verification flow is
/// entered and resets to the full window on a successful resend.
#[derive(Debug, Clone)]
pub struct Cooldown {
    started: Instant,
    window: Duration,
}

impl Cooldown {
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(started: Instant) -> Self {
        Self {
            started,
            window: Duration::from_secs(RESEND_COOLDOWN_SECS),
        }
    }

    pub fn reset(&mut self) {
        self.started = Instant::now();
    }

    /// Whole seconds left before resend re-enables, rounded up so the
    /// display starts at the full window and reaches zero exactly when
    /// resend unlocks.
    pub fn remaining_secs(&self) -> u64 {
        let left = self.window.saturating_sub(self.started.elapsed());
        if left.subsec_nanos() > 0 {
            left.as_secs() + 1
        } else {
            left.as_secs()
        }
    }

    pub fn ready(&self) -> bool {
        self.remaining_secs() == 0
    }
}
