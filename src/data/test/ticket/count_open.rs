use super::*;

/// Tests that the quota count only includes the requesting creator's tickets.
///
/// Expected: Ok(2) for a creator with two open tickets
#[tokio::test]
async fn counts_only_creators_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db, "100")
        .creator_id("42")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, "101")
        .creator_id("42")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, "102")
        .creator_id("99")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    assert_eq!(repo.count_open_by_creator(42).await?, 2);
    assert_eq!(repo.count_open_by_creator(99).await?, 1);

    Ok(())
}

/// Tests that closed tickets do not count against the quota.
///
/// Expected: Ok(1) when one of two tickets is closed
#[tokio::test]
async fn excludes_closed_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db, "100")
        .creator_id("42")
        .build()
        .await?;
    factory::ticket::TicketFactory::new(db, "101")
        .creator_id("42")
        .status("closed")
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    assert_eq!(repo.count_open_by_creator(42).await?, 1);

    Ok(())
}

/// Tests counting for a user with no tickets.
///
/// Expected: Ok(0)
#[tokio::test]
async fn zero_when_user_has_no_tickets() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    assert_eq!(repo.count_open_by_creator(42).await?, 0);

    Ok(())
}
