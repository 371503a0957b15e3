use super::*;

/// Tests that observed activity moves `activity_at` without touching the
/// creation or idle-check timestamps.
///
/// Expected: Ok with activity_at updated
#[tokio::test]
async fn updates_activity_timestamp_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stale = Utc::now() - Duration::hours(2);
    factory::ticket::TicketFactory::new(db, "100")
        .created_at(stale)
        .activity_at(stale)
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let now = Utc::now();
    repo.touch_activity(100, now).await?;

    let ticket = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(ticket.activity_at, now);
    assert_eq!(ticket.created_at, stale);
    assert!(ticket.last_check_time.is_none());

    Ok(())
}

/// Tests touching a channel with no ticket record.
///
/// Expected: Ok(()) with nothing written
#[tokio::test]
async fn ignores_unknown_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.touch_activity(100, Utc::now()).await?;

    assert_eq!(entity::prelude::Ticket::find().count(db).await?, 0);

    Ok(())
}
