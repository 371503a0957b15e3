use super::*;

/// Tests deleting a ticket record.
///
/// Expected: Ok with the record removed
#[tokio::test]
async fn removes_ticket_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_ticket(db, "100", "somebody").await?;

    let repo = TicketRepository::new(db);
    repo.delete(100).await?;

    assert!(repo.find_by_channel_id(100).await?.is_none());

    Ok(())
}

/// Tests that deleting a ticket leaves its rating record behind.
///
/// Ratings arrive after channel deletion, so the rating row must outlive the
/// ticket row.
///
/// Expected: Ok with the rating row intact
#[tokio::test]
async fn leaves_rating_record() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_ticket_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_ticket(db, "100", "somebody").await?;
    factory::ticket_rating::create_unrated(db, "100").await?;

    let repo = TicketRepository::new(db);
    repo.delete(100).await?;

    let rating = entity::prelude::TicketRating::find()
        .filter(entity::ticket_rating::Column::ChannelId.eq("100"))
        .one(db)
        .await?;
    assert!(rating.is_some());

    Ok(())
}

/// Tests deleting a channel with no ticket record.
///
/// Expected: Ok(())
#[tokio::test]
async fn deleting_missing_record_is_ok() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Ticket)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRepository::new(db);
    repo.delete(100).await?;

    Ok(())
}
