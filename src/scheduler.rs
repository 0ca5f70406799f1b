//! Periodic background loops and the scheduler that drives them.
//!
//! The bot runs two independent loops once the gateway connection is ready: a
//! presence update every five minutes and an internal health log every ten.
//! Both are registered with a `Scheduler`, a thin wrapper over
//! `tokio_cron_scheduler` that exposes explicit `schedule`/`cancel` operations
//! and a whole-scheduler `shutdown` used during teardown.
//!
//! Ticks of one loop never overlap, and the two loops are scheduled
//! independently of each other. Errors inside a tick are logged and never
//! abort the loop's schedule.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serenity::all::{ActivityData, Context};
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::error::AppError;
use crate::status::BotStatus;

/// How often the bot refreshes its displayed presence.
pub const PRESENCE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// How often the bot logs its own uptime and guild count.
pub const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Opaque handle to a scheduled job, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobHandle(Uuid);

/// Repeating-job scheduler shared between the ready handler (which starts the
/// loops) and the shutdown path (which stops them).
///
/// Cheap to clone; clones share the same underlying scheduler.
#[derive(Clone)]
pub struct Scheduler {
    inner: JobScheduler,
}

impl Scheduler {
    pub async fn new() -> Result<Self, AppError> {
        Ok(Self {
            inner: JobScheduler::new().await?,
        })
    }

    /// Registers `task` to run every `interval`, starting one interval from
    /// now. The returned handle cancels the job.
    pub async fn schedule<F, Fut>(
        &self,
        interval: Duration,
        mut task: F,
    ) -> Result<JobHandle, AppError>
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_repeated_async(interval, move |_id, _scheduler| Box::pin(task()))?;
        let id = self.inner.add(job).await?;
        Ok(JobHandle(id))
    }

    /// Starts ticking registered jobs.
    pub async fn start(&self) -> Result<(), AppError> {
        self.inner.start().await?;
        Ok(())
    }

    /// Cancels a job. No further ticks are scheduled once this returns.
    /// Cancelling an already-cancelled job is a no-op.
    pub async fn cancel(&self, handle: JobHandle) {
        if let Err(e) = self.inner.remove(&handle.0).await {
            tracing::debug!("Job {} already removed: {}", handle.0, e);
        }
    }

    /// Stops the scheduler and cancels every remaining job.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut inner = self.inner.clone();
        inner.shutdown().await?;
        Ok(())
    }
}

/// Starts the presence and health-log loops and begins ticking.
///
/// Called from the ready handler, so both loops are gated on a live gateway
/// connection by construction. Each tick additionally checks the shutdown
/// flag and no-ops once teardown has begun.
pub async fn start_periodic_loops(
    scheduler: &Scheduler,
    ctx: Context,
    status: Arc<BotStatus>,
) -> Result<(JobHandle, JobHandle), AppError> {
    let presence_ctx = ctx.clone();
    let presence_status = status.clone();
    let presence = scheduler
        .schedule(PRESENCE_INTERVAL, move || {
            update_presence(presence_ctx.clone(), presence_status.clone())
        })
        .await?;

    let health_status = status.clone();
    let health = scheduler
        .schedule(HEALTH_LOG_INTERVAL, move || {
            log_health(health_status.clone())
        })
        .await?;

    scheduler.start().await?;

    Ok((presence, health))
}

/// Presence loop body: advertise "watching N servers" from the cached guild
/// count. The activity update is a gateway channel send; nothing here can
/// abort the schedule.
async fn update_presence(ctx: Context, status: Arc<BotStatus>) {
    if status.is_shutting_down() {
        return;
    }

    let guilds = ctx.cache.guild_count();
    status.set_guild_count(guilds);

    ctx.set_activity(Some(ActivityData::watching(format!("{guilds} servers"))));
    tracing::debug!("Updated presence: watching {} servers", guilds);
}

/// Health-log loop body: record uptime and guild count.
async fn log_health(status: Arc<BotStatus>) {
    if status.is_shutting_down() {
        return;
    }

    let uptime = status.uptime();
    tracing::info!(
        "Bot uptime: {}s, guilds: {}",
        uptime.as_secs(),
        status.guild_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Tests that a scheduled job ticks repeatedly at its interval.
    #[tokio::test]
    async fn scheduled_job_ticks_repeatedly() {
        let scheduler = Scheduler::new().await.unwrap();
        let ticks = Arc::new(AtomicUsize::new(0));

        let task_ticks = ticks.clone();
        scheduler
            .schedule(Duration::from_millis(50), move || {
                let ticks = task_ticks.clone();
                async move {
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await
            .unwrap();
        scheduler.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(ticks.load(Ordering::SeqCst) >= 2);
        scheduler.shutdown().await.unwrap();
    }

    /// Tests that no tick is observed after cancellation completes.
    ///
    /// Expected: the tick count recorded right after `cancel` never grows.
    #[tokio::test]
    async fn cancelled_job_stops_ticking() {
        let scheduler = Scheduler::new().await.unwrap();
        let ticks = Arc::new(AtomicUsize::new(0));

        let task_ticks = ticks.clone();
        let handle = scheduler
            .schedule(Duration::from_millis(50), move || {
                let ticks = task_ticks.clone();
                async move {
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await
            .unwrap();
        scheduler.start().await.unwrap();

        tokio::time::sleep(Duration::from_millis(200)).await;
        scheduler.cancel(handle).await;
        let after_cancel = ticks.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);

        scheduler.shutdown().await.unwrap();
    }

    /// Tests that cancelling the same handle twice is a no-op.
    #[tokio::test]
    async fn cancel_is_idempotent() {
        let scheduler = Scheduler::new().await.unwrap();

        let handle = scheduler
            .schedule(Duration::from_millis(50), || async {})
            .await
            .unwrap();
        scheduler.start().await.unwrap();

        scheduler.cancel(handle).await;
        scheduler.cancel(handle).await;

        scheduler.shutdown().await.unwrap();
    }

    /// Tests that the health-log body short-circuits once shutdown begins.
    ///
    /// The health-log body reads but never writes the guild count, so after a
    /// shut-down status passes through it the count must be untouched.
    #[tokio::test]
    async fn loops_no_op_after_shutdown_flag() {
        let status = Arc::new(BotStatus::new());
        status.begin_shutdown();

        log_health(status.clone()).await;

        assert!(status.is_shutting_down());
        assert_eq!(status.guild_count(), 0);
    }
}
