use crate::utils::error::{AppError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequestStatus {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// 一次請求的生命週期，連同 loading 指示器的狀態一起傳進傳出。
///
/// The indicator is shown by [`begin`](Self::begin) and hidden only by the
/// transition out of `Loading`, so a finished request cannot hide it twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLifecycle {
    status: RequestStatus,
    indicator_visible: bool,
    shown_count: u32,
    hidden_count: u32,
    last_error: Option<String>,
}

impl Default for RequestLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLifecycle {
    pub fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            indicator_visible: false,
            shown_count: 0,
            hidden_count: 0,
            last_error: None,
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn indicator_visible(&self) -> bool {
        self.indicator_visible
    }

    pub fn shown_count(&self) -> u32 {
        self.shown_count
    }

    pub fn hidden_count(&self) -> u32 {
        self.hidden_count
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_begin(&self) -> bool {
        self.status != RequestStatus::Loading
    }

    pub fn begin(&mut self) -> Result<()> {
        if !self.can_begin() {
            return Err(AppError::lifecycle("request is already loading"));
        }
        self.status = RequestStatus::Loading;
        self.indicator_visible = true;
        self.shown_count += 1;
        self.last_error = None;
        Ok(())
    }

    pub fn succeed(&mut self) -> Result<()> {
        self.finish(RequestStatus::Succeeded)
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.finish(RequestStatus::Failed)?;
        self.last_error = Some(message.into());
        Ok(())
    }

    fn finish(&mut self, next: RequestStatus) -> Result<()> {
        if self.status != RequestStatus::Loading {
            return Err(AppError::lifecycle(format!(
                "cannot move from {:?} to {:?}",
                self.status, next
            )));
        }
        self.status = next;
        self.indicator_visible = false;
        self.hidden_count += 1;
        Ok(())
    }
}
