//! Idle ticket activity sweeper.
//!
//! Runs every minute and nudges tickets whose channel has been quiet for
//! longer than the configured threshold. A nudge mentions the creator and the
//! support roles in the ticket channel and records the notification, which
//! spaces repeat nudges a full threshold apart. Tickets whose channel has
//! disappeared are skipped; the channel-delete handler owns that cleanup.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, CreateMessage},
    http::Http,
};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::TicketConfig,
    data::ticket::TicketRepository,
    error::AppError,
    model::ticket::{Ticket, TicketStatus},
    util::parse::parse_u64_from_string,
};

/// Handle to the running activity sweep job.
///
/// Owns the scheduler so the sweep can be stopped cleanly at shutdown.
pub struct ActivitySweeper {
    scheduler: JobScheduler,
}

impl ActivitySweeper {
    /// Starts the activity sweeper.
    ///
    /// The job runs every minute. When the activity check is disabled in the
    /// configuration each run is a no-op, so the toggle can be flipped without
    /// touching the scheduler wiring.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `discord_http` - Discord HTTP client for sending nudges
    /// - `config` - Shared static ticket configuration
    ///
    /// # Returns
    /// - `Ok(ActivitySweeper)` - Running sweeper handle
    /// - `Err(AppError::SchedulerErr)` - Scheduler setup failure
    pub async fn start(
        db: DatabaseConnection,
        discord_http: Arc<Http>,
        config: Arc<TicketConfig>,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new().await?;

        let job_db = db.clone();
        let job_http = discord_http.clone();
        let job_config = config.clone();

        let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
            let db = job_db.clone();
            let http = job_http.clone();
            let config = job_config.clone();

            Box::pin(async move {
                if let Err(e) = process_activity_sweep(&db, http, config).await {
                    tracing::error!("Error processing ticket activity sweep: {}", e);
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        tracing::info!("Ticket activity sweeper started");

        Ok(Self { scheduler })
    }

    /// Stops the sweeper. No further sweeps run after this returns.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

/// Runs one sweep over all live tickets.
async fn process_activity_sweep(
    db: &DatabaseConnection,
    discord_http: Arc<Http>,
    config: Arc<TicketConfig>,
) -> Result<(), AppError> {
    if !config.enable_ticket_activity_check {
        return Ok(());
    }

    let now = Utc::now();
    let threshold = config.idle_threshold();

    let repo = TicketRepository::new(db);
    let tickets = repo.all().await?;

    for ticket in tickets {
        if !needs_idle_nudge(&ticket, now, threshold) {
            continue;
        }

        if let Err(e) = nudge_ticket(&repo, &discord_http, &config, &ticket, now).await {
            tracing::error!("Failed to nudge idle ticket {}: {}", ticket.channel_id, e);
        }
    }

    Ok(())
}

/// Sends the idle nudge for one ticket and records it.
async fn nudge_ticket(
    repo: &TicketRepository<'_>,
    http: &Arc<Http>,
    config: &TicketConfig,
    ticket: &Ticket,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let channel_id = parse_u64_from_string(ticket.channel_id.clone())?;
    let channel = ChannelId::new(channel_id);

    // A channel deleted out from under us is not an error; its record will
    // be cleaned up by the channel-delete handler or was already orphaned.
    if http.get_channel(channel).await.is_err() {
        tracing::debug!("Skipping idle nudge for missing channel {}", channel_id);
        return Ok(());
    }

    let mut content = format!(
        "<@{}> This ticket has had no activity for a while. Is there anything else we can help with?",
        ticket.creator_id
    );
    for role in &config.support_roles {
        content.push_str(&format!(" <@&{}>", role));
    }

    channel
        .send_message(http, CreateMessage::new().content(content))
        .await?;

    repo.mark_checked(channel_id, now).await?;

    tracing::info!("Nudged idle ticket {}", ticket.channel_id);

    Ok(())
}

/// Whether a ticket is due an idle nudge.
///
/// A ticket qualifies when it is still live (Open or Claimed), its last
/// activity is older than the threshold, and the previous nudge (if any) is
/// also older than the threshold.
fn needs_idle_nudge(ticket: &Ticket, now: DateTime<Utc>, threshold: Duration) -> bool {
    if !matches!(ticket.status, TicketStatus::Open | TicketStatus::Claimed) {
        return false;
    }

    if now - ticket.activity_at < threshold {
        return false;
    }

    match ticket.last_check_time {
        Some(last_check) => now - last_check >= threshold,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(
        status: TicketStatus,
        activity_at: DateTime<Utc>,
        last_check_time: Option<DateTime<Utc>>,
    ) -> Ticket {
        Ticket {
            id: 1,
            channel_id: "100".to_string(),
            guild_id: "1".to_string(),
            creator_id: "42".to_string(),
            creator_name: "somebody".to_string(),
            category: "support".to_string(),
            control_message_id: "900".to_string(),
            status,
            claimed_by: None,
            created_at: activity_at,
            activity_at,
            last_check_time,
        }
    }

    /// A quiet ticket past the threshold is due; an active one is not.
    #[test]
    fn idle_ticket_is_due() {
        let now = Utc::now();
        let threshold = Duration::minutes(30);

        let idle = ticket(TicketStatus::Open, now - Duration::minutes(45), None);
        assert!(needs_idle_nudge(&idle, now, threshold));

        let active = ticket(TicketStatus::Open, now - Duration::minutes(5), None);
        assert!(!needs_idle_nudge(&active, now, threshold));
    }

    /// After a nudge, the next one waits a full threshold, not one sweep.
    #[test]
    fn nudge_cadence_follows_threshold() {
        let threshold = Duration::minutes(30);
        let nudged_at = Utc::now();

        // Immediately after the nudge both timestamps are fresh
        let just_nudged = ticket(TicketStatus::Open, nudged_at, Some(nudged_at));
        assert!(!needs_idle_nudge(
            &just_nudged,
            nudged_at + Duration::minutes(1),
            threshold
        ));
        assert!(!needs_idle_nudge(
            &just_nudged,
            nudged_at + Duration::minutes(29),
            threshold
        ));

        // One threshold later the ticket is due again
        assert!(needs_idle_nudge(
            &just_nudged,
            nudged_at + Duration::minutes(30),
            threshold
        ));
    }

    /// Claimed tickets are swept; tickets mid-close are not.
    #[test]
    fn only_live_tickets_are_swept() {
        let now = Utc::now();
        let threshold = Duration::minutes(30);
        let stale = now - Duration::hours(2);

        assert!(needs_idle_nudge(
            &ticket(TicketStatus::Claimed, stale, None),
            now,
            threshold
        ));
        assert!(!needs_idle_nudge(
            &ticket(TicketStatus::ClosePending, stale, None),
            now,
            threshold
        ));
        assert!(!needs_idle_nudge(
            &ticket(TicketStatus::Closed, stale, None),
            now,
            threshold
        ));
    }
}
