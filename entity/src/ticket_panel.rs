use sea_orm::entity::prelude::*;

/// Per-guild ticket panel configuration.
///
/// Holds the serialized category select-menu option list posted with the
/// panel. Overwritten wholesale on every panel send.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket_panel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord guild ID (stored as String).
    #[sea_orm(unique)]
    pub guild_id: String,
    /// JSON-encoded ordered list of select-menu options.
    pub select_menu_options: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
