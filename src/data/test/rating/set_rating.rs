use super::*;

/// Tests recording a rating against an existing record.
///
/// Expected: Ok with the rating stored
#[tokio::test]
async fn records_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketRating)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket_rating::create_unrated(db, "100").await?;

    let repo = TicketRatingRepository::new(db);
    repo.set_rating(100, 4).await?;

    let rating = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(rating.rating, 4);

    Ok(())
}

/// Tests that a repeat submission replaces the stored value exactly.
///
/// Expected: Ok with only the latest rating stored
#[tokio::test]
async fn overwrites_prior_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketRating)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket_rating::create_rating(db, "100", 3).await?;

    let repo = TicketRatingRepository::new(db);
    repo.set_rating(100, 5).await?;

    let rating = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(rating.rating, 5);
    assert_eq!(entity::prelude::TicketRating::find().count(db).await?, 1);

    Ok(())
}

/// Tests rating a channel whose record no longer exists.
///
/// The rating prompt outlives the channel, so a submission for an unknown
/// channel id creates the record instead of failing.
///
/// Expected: Ok with a new record created
#[tokio::test]
async fn creates_record_for_unknown_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketRating)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketRatingRepository::new(db);
    repo.set_rating(100, 5).await?;

    let rating = repo.find_by_channel_id(100).await?.unwrap();
    assert_eq!(rating.rating, 5);

    Ok(())
}
