//! Ticket panel factory for creating test panel config entities.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a panel config for a guild with the given select-menu options.
///
/// The options are serialized to JSON the same way the production panel
/// command stores them.
///
/// # Arguments
/// - `db` - Database connection
/// - `guild_id` - Discord guild ID
/// - `options` - Select-menu option list as (value, label) pairs
///
/// # Returns
/// - `Ok(Model)` - The created panel config entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_panel(
    db: &DatabaseConnection,
    guild_id: impl Into<String>,
    options: &[(&str, &str)],
) -> Result<entity::ticket_panel::Model, DbErr> {
    let options: Vec<serde_json::Value> = options
        .iter()
        .map(|(value, label)| {
            serde_json::json!({
                "value": value,
                "label": label,
                "description": format!("Open a {} ticket", label),
                "emoji": null,
            })
        })
        .collect();

    entity::ticket_panel::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.into()),
        select_menu_options: ActiveValue::Set(
            serde_json::to_string(&options).map_err(|e| DbErr::Custom(e.to_string()))?,
        ),
        ..Default::default()
    }
    .insert(db)
    .await
}
