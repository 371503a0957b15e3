use super::*;

/// Tests creating a new ticket record.
///
/// Verifies the record starts Open and unclaimed with `activity_at` equal to
/// `created_at` and no idle-check timestamp.
///
/// Expected: Ok with ticket created
#[tokio::test]
async fn creates_open_ticket_with_matching_timestamps() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    let ticket = repo.create(params("100", "42", "somebody")).await?;

    assert_eq!(ticket.channel_id, "100");
    assert_eq!(ticket.creator_id, "42");
    assert_eq!(ticket.creator_name, "somebody");
    assert_eq!(ticket.category, "billing");
    assert_eq!(ticket.control_message_id, "900");
    assert_eq!(ticket.status, TicketStatus::Open);
    assert!(ticket.claimed_by.is_none());
    assert_eq!(ticket.activity_at, ticket.created_at);
    assert!(ticket.last_check_time.is_none());

    // Verify ticket exists in database
    let db_ticket = entity::prelude::Ticket::find()
        .filter(entity::ticket::Column::ChannelId.eq("100"))
        .one(db)
        .await?;
    assert!(db_ticket.is_some());

    Ok(())
}

/// Tests that two tickets cannot share a channel id.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_channel_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.create(params("100", "42", "somebody")).await?;

    let result = repo.create(params("100", "43", "someone-else")).await;
    assert!(result.is_err());

    Ok(())
}
