//! Fail-fast join of two independent lookups.
//!
//! Both futures are polled on the calling task, so they run concurrently but
//! never in parallel. The pair comes back in argument order no matter which
//! side settles first. The first error ends the join and the other future is
//! dropped, so its outcome is never observed.

use crate::core::lifecycle::RequestLifecycle;
use crate::utils::error::Result;
use std::future::Future;

pub async fn fail_fast_join<A, B, E, FA, FB>(first: FA, second: FB) -> std::result::Result<(A, B), E>
where
    FA: Future<Output = std::result::Result<A, E>>,
    FB: Future<Output = std::result::Result<B, E>>,
{
    tokio::try_join!(first, second)
}

/// 包著 [`fail_fast_join`]，前後更新 loading 狀態。
///
/// Neither lookup is started if the lifecycle refuses to begin.
pub async fn tracked_join<A, B, FA, FB>(
    mut lifecycle: RequestLifecycle,
    first: FA,
    second: FB,
) -> (RequestLifecycle, Result<(A, B)>)
where
    FA: Future<Output = Result<A>>,
    FB: Future<Output = Result<B>>,
{
    if let Err(e) = lifecycle.begin() {
        return (lifecycle, Err(e));
    }

    let outcome = fail_fast_join(first, second).await;

    let transition = match &outcome {
        Ok(_) => lifecycle.succeed(),
        Err(e) => lifecycle.fail(e.to_string()),
    };

    match transition {
        Ok(()) => (lifecycle, outcome),
        Err(e) => (lifecycle, Err(e)),
    }
}
