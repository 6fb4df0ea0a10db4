//! Top summary bar and countdown ticker

use std::time::Duration;

use chrono::{DateTime, Utc};
use hackos_core::derived::{team_stats, Countdown, Urgency};
use hackos_core::{NoteRepository, WorkspaceStore};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopSummary {
    pub team_name: String,
    pub hackathon_name: String,
    pub phase: &'static str,
    pub onboarding: &'static str,
    pub countdown: String,
    pub urgency: Urgency,
    pub online: usize,
    pub team_size: usize,
}

impl TopSummary {
    pub fn build<R: NoteRepository>(store: &WorkspaceStore<R>, now: DateTime<Utc>) -> Self {
        let context = store.context();
        let countdown = Countdown::for_context(context, now);
        let stats = team_stats(context);

        Self {
            team_name: context.team_name.clone(),
            hackathon_name: context.hackathon_name.clone(),
            phase: context.phase.label(),
            onboarding: context.onboarding_state.label(),
            countdown: countdown.hms(),
            urgency: countdown.urgency,
            online: stats.online,
            team_size: stats.total,
        }
    }
}

/// Publish a fresh countdown every second until it reaches zero.
///
/// The task also ends when every receiver is dropped.
pub fn spawn_countdown<C>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    clock: C,
) -> (watch::Receiver<Countdown>, JoinHandle<()>)
where
    C: Fn() -> DateTime<Utc> + Send + 'static,
{
    let (tx, rx) = watch::channel(Countdown::at(start, end, clock()));

    let handle = tokio::spawn(async move {
        let mut ticks = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticks.tick().await;
            let countdown = Countdown::at(start, end, clock());
            if tx.send(countdown).is_err() {
                debug!("Countdown has no viewers, stopping");
                break;
            }
            if countdown.is_over() {
                debug!("Countdown reached zero");
                break;
            }
        }
    });

    (rx, handle)
}
