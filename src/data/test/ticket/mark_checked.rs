use super::*;

/// Tests that an idle-sweep notification records both timestamps.
///
/// Setting `activity_at` alongside `last_check_time` is what spaces repeat
/// notifications a full idle threshold apart instead of one per sweep.
///
/// Expected: Ok with both timestamps set to the notification time
#[tokio::test]
async fn sets_activity_and_check_timestamps() -> Result<(), DbErr> {
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
    repo.mark_checked(100, now).await?;

    let ticket = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(ticket.activity_at, now);
    assert_eq!(ticket.last_check_time, Some(now));
    assert_eq!(ticket.created_at, stale);

    Ok(())
}

/// Tests marking a channel with no ticket record.
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
    repo.mark_checked(100, Utc::now()).await?;

    assert_eq!(entity::prelude::Ticket::find().count(db).await?, 0);

    Ok(())
}
