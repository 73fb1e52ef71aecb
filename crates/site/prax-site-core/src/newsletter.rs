//! Footer newsletter form. Submission is simulated: nothing is sent.

use serde::{Deserialize, Serialize};

/// Simulated round trip, in milliseconds.
pub const SUBMIT_DELAY_MS: f64 = 1000.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NewsletterStatus {
    Idle,
    Pending { elapsed_ms: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsletterForm {
    email: String,
    status: NewsletterStatus,
}

impl Default for NewsletterForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            status: NewsletterStatus::Idle,
        }
    }
}

impl NewsletterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn status(&self) -> NewsletterStatus {
        self.status
    }

    /// Input and button are disabled while a submission is pending.
    pub fn is_disabled(&self) -> bool {
        matches!(self.status, NewsletterStatus::Pending { .. })
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if !self.is_disabled() {
            self.email = email.into();
        }
    }

    /// Start a submission. Ignored while one is pending or the input is empty.
    pub fn submit(&mut self) -> bool {
        if self.is_disabled() || self.email.trim().is_empty() {
            return false;
        }
        self.status = NewsletterStatus::Pending { elapsed_ms: 0.0 };
        true
    }

    /// Advance the pending submission. Returns true when it resolved.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let NewsletterStatus::Pending { elapsed_ms } = self.status else {
            return false;
        };
        let elapsed_ms = elapsed_ms + dt_ms.max(0.0);
        if elapsed_ms >= SUBMIT_DELAY_MS {
            self.email.clear();
            self.status = NewsletterStatus::Idle;
            log::debug!("newsletter submission resolved");
            true
        } else {
            self.status = NewsletterStatus::Pending { elapsed_ms };
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disables_while_pending_then_clears() {
        let mut form = NewsletterForm::new();
        assert!(!form.submit(), "empty input");
        form.set_email("a@b.co");
        assert!(form.submit());
        assert!(form.is_disabled());
        assert!(!form.submit());
        form.set_email("other@b.co");
        assert_eq!(form.email(), "a@b.co");

        assert!(!form.advance(600.0));
        assert!(form.advance(400.0));
        assert!(!form.is_disabled());
        assert_eq!(form.email(), "");
        assert!(!form.advance(16.0));
    }
}
