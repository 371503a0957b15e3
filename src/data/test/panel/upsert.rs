use super::*;

/// Tests storing a panel config for a guild without one.
///
/// Expected: Ok with the config created
#[tokio::test]
async fn creates_panel_config() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketPanel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketPanelRepository::new(db);
    let options = vec![option("billing", "Billing"), option("general", "General")];
    repo.upsert(1, &options).await?;

    let panel = repo.find_by_guild_id(1).await?.unwrap();
    assert_eq!(panel.options.len(), 2);
    assert_eq!(panel.options[0].value, "billing");
    assert_eq!(panel.options[1].label, "General");

    Ok(())
}

/// Tests that re-running the panel command replaces the stored option list.
///
/// The new list overwrites the old one wholesale; options absent from the new
/// list are gone.
///
/// Expected: Ok with only the new options stored, in a single row
#[tokio::test]
async fn overwrites_existing_options() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketPanel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::ticket_panel::create_panel(db, "1", &[("billing", "Billing"), ("general", "General")])
        .await?;

    let repo = TicketPanelRepository::new(db);
    repo.upsert(1, &[option("reports", "Reports")]).await?;

    let panel = repo.find_by_guild_id(1).await?.unwrap();
    assert_eq!(panel.options.len(), 1);
    assert_eq!(panel.options[0].value, "reports");

    assert_eq!(entity::prelude::TicketPanel::find().count(db).await?, 1);

    Ok(())
}

/// Tests that guilds keep independent panel configs.
///
/// Expected: Ok with each guild's options untouched by the other's upsert
#[tokio::test]
async fn guilds_are_independent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::TicketPanel)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TicketPanelRepository::new(db);
    repo.upsert(1, &[option("billing", "Billing")]).await?;
    repo.upsert(2, &[option("reports", "Reports")]).await?;

    let first = repo.find_by_guild_id(1).await?.unwrap();
    let second = repo.find_by_guild_id(2).await?.unwrap();
    assert_eq!(first.options[0].value, "billing");
    assert_eq!(second.options[0].value, "reports");

    Ok(())
}
