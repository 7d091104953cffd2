//! Reminder scheduling boundary.
//!
//! Independent of the query pipeline; nothing in the pipeline calls into
//! this. Platform schedulers live behind the trait in app targets.

use crate::core::{HelsaError, Result};

/// Schedules recurring daily reminders
#[async_trait::async_trait]
pub trait ReminderScheduler: Send + Sync {
    /// Schedule a daily reminder firing at `hour:minute` local time
    async fn schedule_daily(
        &self,
        identifier: &str,
        hour: u8,
        minute: u8,
        message: &str,
    ) -> Result<()>;
}

/// Scheduler that validates the request and acknowledges without side effect
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReminderScheduler;

impl NoopReminderScheduler {
    /// Creates a new no-op scheduler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ReminderScheduler for NoopReminderScheduler {
    async fn schedule_daily(
        &self,
        identifier: &str,
        hour: u8,
        minute: u8,
        _message: &str,
    ) -> Result<()> {
        if hour > 23 {
            return Err(HelsaError::schedule(format!(
                "hour must be 0..=23, got {hour} for '{identifier}'"
            )));
        }
        if minute > 59 {
            return Err(HelsaError::schedule(format!(
                "minute must be 0..=59, got {minute} for '{identifier}'"
            )));
        }
        Ok(())
    }
}
