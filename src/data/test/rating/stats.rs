use super::*;

/// Tests aggregating rating statistics.
///
/// Unset (0) records count toward the ticket total but not toward the rated
/// count or sum.
///
/// Expected: Ok with totals matching the stored records
#[tokio::test]
async fn aggregates_rated_and_unrated_records() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketRating)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket_rating::create_unrated(db, "100").await?;
    factory::ticket_rating::create_rating(db, "101", 4).await?;
    factory::ticket_rating::create_rating(db, "102", 5).await?;

    let repo = TicketRatingRepository::new(db);
    let stats = repo.stats().await?;

    assert_eq!(stats.total_tickets, 3);
    assert_eq!(stats.rated, 2);
    assert_eq!(stats.sum, 9);
    assert_eq!(stats.average(), Some(4.5));

    Ok(())
}

/// Tests statistics over an empty table.
///
/// Expected: Ok with zero totals and no average
#[tokio::test]
async fn empty_table_yields_no_average() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketRating)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRatingRepository::new(db);
    let stats = repo.stats().await?;

    assert_eq!(stats.total_tickets, 0);
    assert_eq!(stats.rated, 0);
    assert!(stats.average().is_none());

    Ok(())
}
