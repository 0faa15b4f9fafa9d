//! Poll loop service
//!
//! Orchestrates the refresh cycle:
//! - Fetch the ranked feed
//! - Diff it against the last *committed* scoreboard
//! - Render and commit only when the change is significant
//! - Feed the decision into the refresh controller and wait
//!
//! The reference scoreboard only moves on commit, so a run of small drifts is
//! always measured against what readers are actually seeing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

use crate::domain::entities::{rank_posts, Scoreboard};
use crate::domain::ports::{FeedSource, PageRenderer, SnapshotStore};
use crate::error::AppError;

use super::diff_engine::{DeltaReport, DiffEngine, NewItemPenalty};
use super::refresh_controller::RefreshController;

/// Result of one successful cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub delta: DeltaReport,
    pub committed: bool,
    pub post_count: usize,
    pub streak: f64,
    pub next_refresh: Duration,
}

/// Service that owns all loop state
pub struct PollLoopService<FS, PR, SS>
where
    FS: FeedSource,
    PR: PageRenderer,
    SS: SnapshotStore,
{
    feed: Arc<FS>,
    renderer: Arc<PR>,
    store: Arc<SS>,
    diff: DiffEngine,
    controller: RefreshController,
    reference: Scoreboard,
}

impl<FS, PR, SS> PollLoopService<FS, PR, SS>
where
    FS: FeedSource,
    PR: PageRenderer,
    SS: SnapshotStore,
{
    pub fn new(feed: Arc<FS>, renderer: Arc<PR>, store: Arc<SS>) -> Self {
        Self {
            feed,
            renderer,
            store,
            diff: DiffEngine::default(),
            controller: RefreshController::new(),
            reference: Scoreboard::empty(),
        }
    }

    pub fn with_new_item_penalty(mut self, penalty: NewItemPenalty) -> Self {
        self.diff = DiffEngine::new(penalty);
        self
    }

    /// Last committed scoreboard
    pub fn reference(&self) -> &Scoreboard {
        &self.reference
    }

    pub fn controller(&self) -> &RefreshController {
        &self.controller
    }

    /// Run one fetch -> diff -> decide -> update cycle.
    ///
    /// On error nothing is updated: streak, interval and reference stay as
    /// they were, so a failed cycle is neither "busy" nor "quiet".
    pub async fn run_cycle(&mut self) -> Result<CycleReport, AppError> {
        let mut posts = self.feed.fetch().await?;
        rank_posts(&mut posts);

        let cur = Scoreboard::try_from_posts(&posts)?;
        let delta = self.diff.compare(&self.reference, &cur);
        tracing::debug!(
            delta = delta.delta,
            delta_norm = delta.delta_norm,
            delta_smooth = delta.delta_smooth,
            "Scoreboard diff computed"
        );

        let committed = delta.is_significant();
        if committed {
            let payload = self.renderer.render(&posts)?;
            self.store.commit(&payload).await?;
            tracing::info!(
                posts = posts.len(),
                bytes = payload.len(),
                "Snapshot committed"
            );
            self.reference = cur;
        } else {
            tracing::info!(
                delta_smooth = delta.delta_smooth,
                "Negligible change, keeping cached snapshot"
            );
        }

        self.controller.record(committed);

        Ok(CycleReport {
            delta,
            committed,
            post_count: posts.len(),
            streak: self.controller.streak(),
            next_refresh: self.controller.next_refresh(),
        })
    }

    /// Poll until `shutdown` is notified.
    ///
    /// Sleeps before every cycle, including the first, so a crash-looping
    /// process never polls faster than the minimum interval. Shutdown also
    /// abandons an in-flight cycle; state only changes once a cycle has
    /// finished, so nothing is left half-updated. Only fatal errors end the
    /// loop early.
    pub async fn run(&mut self, shutdown: Arc<Notify>) -> Result<(), AppError> {
        tracing::info!(
            penalty = %self.diff.new_item_penalty(),
            "Poll loop started"
        );

        loop {
            let wait = self.controller.next_refresh();
            tokio::select! {
                _ = shutdown.notified() => {
                    tracing::info!("Poll loop stopping");
                    return Ok(());
                }
                _ = tokio::time::sleep(wait) => {}
            }

            let outcome = tokio::select! {
                _ = shutdown.notified() => {
                    tracing::info!("Poll loop stopping, abandoning in-flight cycle");
                    return Ok(());
                }
                outcome = self.run_cycle() => outcome,
            };

            match outcome {
                Ok(report) => {
                    tracing::info!(
                        posts = report.post_count,
                        delta_smooth = report.delta.delta_smooth,
                        committed = report.committed,
                        streak = report.streak,
                        next_refresh = report.next_refresh.as_secs_f64(),
                        "Cycle complete"
                    );
                }
                Err(e) if e.is_fatal() => {
                    tracing::error!("Poll loop aborted: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        retry_in = self.controller.next_refresh_secs(),
                        "Cycle failed, state unchanged: {}",
                        e
                    );
                }
            }
        }
    }
}
