use super::*;

/// Tests updating the lifecycle status of a ticket.
///
/// Expected: Ok with status persisted
#[tokio::test]
async fn updates_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_ticket(db, "100", "somebody").await?;

    let repo = TicketRepository::new(db);
    repo.set_status(100, TicketStatus::ClosePending).await?;

    let ticket = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(ticket.status, TicketStatus::ClosePending);

    Ok(())
}

/// Tests restoring a claimed ticket's status after an aborted close.
///
/// A close that fails after entering ClosePending writes the prior status
/// back, so the ticket stays claimable and closable.
///
/// Expected: the ticket reads back Claimed with its claimant intact
#[tokio::test]
async fn aborted_close_restores_prior_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db, "100")
        .status(TicketStatus::Claimed.as_str())
        .claimed_by(Some("7".to_string()))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    let prior = repo.find_by_channel_id(100).await?.unwrap().status;

    repo.set_status(100, TicketStatus::ClosePending).await?;
    repo.set_status(100, prior).await?;

    let ticket = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(ticket.status, TicketStatus::Claimed);
    assert_eq!(ticket.claimed_by, Some("7".to_string()));
    assert!(ticket.status.can_transition_to(TicketStatus::ClosePending));

    Ok(())
}

/// Tests setting the status of a channel with no ticket record.
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
    repo.set_status(100, TicketStatus::Closed).await?;

    assert_eq!(entity::prelude::Ticket::find().count(db).await?, 0);

    Ok(())
}
