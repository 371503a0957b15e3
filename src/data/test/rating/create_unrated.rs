use super::*;

/// Tests creating the rating record that accompanies a new ticket.
///
/// Expected: Ok with rating starting at 0 (unset)
#[tokio::test]
async fn starts_at_zero() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketRating)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRatingRepository::new(db);
    let rating = repo.create_unrated(100).await?;

    assert_eq!(rating.channel_id, "100");
    assert_eq!(rating.rating, 0);

    Ok(())
}
