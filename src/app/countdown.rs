use crate::config::toml_config::CountdownSettings;
use crate::core::countdown::Countdown;
use crate::core::schedule::ScheduledTask;
use crate::utils::error::Result;
use chrono::{DateTime, Local, TimeZone};
use std::ops::ControlFlow;
use std::time::Duration;

/// 啟動倒數：每個 tick 用 `clock` 取得現在時間並交給 `sink` 輸出。
///
/// The target year is fixed when the task starts; reaching it ends the task.
pub fn start_countdown<Tz, C, S>(
    settings: &CountdownSettings,
    clock: C,
    mut sink: S,
) -> Result<ScheduledTask>
where
    Tz: TimeZone + Send + 'static,
    Tz::Offset: Send,
    C: Fn() -> DateTime<Tz> + Send + 'static,
    S: FnMut(&Countdown) + Send + 'static,
{
    let target = Countdown::next_new_year(&clock())?;
    let max_ticks = settings.ticks;
    tracing::debug!("Counting down to {}", target.to_rfc3339());

    ScheduledTask::every(Duration::from_millis(settings.interval_ms), move |index| {
        let remaining = Countdown::between(&clock(), &target);
        sink(&remaining);

        if remaining.is_finished() {
            return ControlFlow::Break(());
        }
        match max_ticks {
            Some(max) if index + 1 >= max => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    })
}

/// 在 console 上倒數，Ctrl-C 會取消排程並等待它結束
pub async fn run_countdown(settings: &CountdownSettings) -> Result<u64> {
    let task = start_countdown(settings, Local::now, |remaining| {
        if remaining.is_finished() {
            println!("🎉 Happy New Year {}!", remaining.target_year);
        } else {
            println!("⏳ {}", remaining);
        }
    })?;

    let token = task.cancellation_token();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("🛑 Countdown interrupted");
            token.cancel();
        }
    });

    let ticks = task.join().await;
    ctrl_c.abort();
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_countdown_stops_after_configured_ticks() {
        let settings = CountdownSettings {
            interval_ms: 1_000,
            ticks: Some(3),
        };
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let task = start_countdown(
            &settings,
            || Utc.with_ymd_and_hms(2026, 12, 31, 23, 0, 0).unwrap(),
            move |remaining| sink.lock().unwrap().push(remaining.to_string()),
        )
        .unwrap();

        assert_eq!(task.join().await, 3);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], "0d 01h 00m 00s until 2027");
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_finishes_at_new_year() {
        let settings = CountdownSettings {
            interval_ms: 1_000,
            ticks: None,
        };
        // 每次呼叫時鐘就前進一秒，從 23:59:58 開始
        let calls = Arc::new(Mutex::new(0i64));
        let clock_calls = Arc::clone(&calls);
        let clock = move || {
            let mut n = clock_calls.lock().unwrap();
            let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap()
                + chrono::TimeDelta::seconds(*n);
            *n += 1;
            now
        };
        let finished = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&finished);

        let task = start_countdown(&settings, clock, move |remaining| {
            if remaining.is_finished() {
                *flag.lock().unwrap() = true;
            }
        })
        .unwrap();

        task.join().await;
        assert!(*finished.lock().unwrap());
    }
}
