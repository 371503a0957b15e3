use super::*;

/// Tests claiming a ticket.
///
/// Expected: Ok with claimant stored and status moved to Claimed
#[tokio::test]
async fn claim_sets_claimant_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_ticket(db, "100", "somebody").await?;

    let repo = TicketRepository::new(db);
    repo.set_claimant(100, Some("77".to_string())).await?;

    let ticket = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(ticket.claimed_by.as_deref(), Some("77"));
    assert_eq!(ticket.status, TicketStatus::Claimed);

    Ok(())
}

/// Tests unclaiming a claimed ticket.
///
/// Expected: Ok with claimant cleared and status back to Open
#[tokio::test]
async fn unclaim_clears_claimant_and_reopens() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket::TicketFactory::new(db, "100")
        .status("claimed")
        .claimed_by(Some("77".to_string()))
        .build()
        .await?;

    let repo = TicketRepository::new(db);
    repo.set_claimant(100, None).await?;

    let ticket = repo.find_by_channel_id(100).await?.unwrap();
    assert!(ticket.claimed_by.is_none());
    assert_eq!(ticket.status, TicketStatus::Open);

    Ok(())
}
