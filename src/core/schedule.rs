//! 可取消的週期性工作

use crate::utils::error::{AppError, Result};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// A periodic job running on its own tokio task.
///
/// The first tick fires immediately. The job stops when the callback returns
/// `ControlFlow::Break`, when [`cancel`](Self::cancel) is called, or when the
/// handle is dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl ScheduledTask {
    pub fn every<F>(period: Duration, mut on_tick: F) -> Result<Self>
    where
        F: FnMut(u64) -> ControlFlow<()> + Send + 'static,
    {
        if period.is_zero() {
            return Err(AppError::validation(
                "interval",
                format!("{:?}", period),
                "Tick interval must be greater than zero",
            ));
        }

        let token = CancellationToken::new();
        let ticks = Arc::new(AtomicU64::new(0));

        let task_token = token.clone();
        let task_ticks = Arc::clone(&ticks);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => {
                        tracing::debug!("Scheduled task cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let index = task_ticks.fetch_add(1, Ordering::SeqCst);
                        if on_tick(index).is_break() {
                            tracing::debug!("Scheduled task stopped itself after {} ticks", index + 1);
                            break;
                        }
                    }
                }
            }
        });

        Ok(Self {
            token,
            handle: Some(handle),
            ticks,
        })
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// 給外部 (例如 Ctrl-C handler) 用來觸發取消
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// 取消並等待工作真的結束，之後不會再有任何 tick。回傳總 tick 數。
    pub async fn cancel(mut self) -> u64 {
        self.token.cancel();
        self.wait().await;
        self.tick_count()
    }

    /// 等待工作自行結束或被 token 取消，回傳總 tick 數
    pub async fn join(mut self) -> u64 {
        self.wait().await;
        self.tick_count()
    }

    async fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Scheduled task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_until_cancelled() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let task = ScheduledTask::every(Duration::from_millis(10), move |i| {
            sink.lock().unwrap().push(i);
            ControlFlow::Continue(())
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(35)).await;
        let before_cancel = task.tick_count();
        assert!(before_cancel >= 3);

        assert_eq!(task.cancel().await, before_cancel);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len() as u64, before_cancel);
        assert_eq!(seen[0], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_can_stop_itself() {
        let task = ScheduledTask::every(Duration::from_secs(1), |i| {
            if i == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

        assert_eq!(task.join().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_is_finished_after_break() {
        let task = ScheduledTask::every(Duration::from_millis(10), |i| {
            if i == 1 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
        assert!(!task.is_finished());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(task.is_finished());
        assert_eq!(task.tick_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_token() {
        let task = ScheduledTask::every(Duration::from_secs(1), |_| ControlFlow::Continue(())).unwrap();
        let token = task.cancellation_token();
        assert!(!token.is_cancelled());

        drop(task);
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_external_token_cancel_ends_join() {
        let task = ScheduledTask::every(Duration::from_secs(1), |_| ControlFlow::Continue(())).unwrap();
        let token = task.cancellation_token();

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        token.cancel();
        assert_eq!(task.join().await, 3);
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let result = ScheduledTask::every(Duration::ZERO, |_| ControlFlow::Continue(()));
        assert!(matches!(result, Err(e) if e.is_validation()));
    }
}
