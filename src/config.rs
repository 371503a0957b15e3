//! Application and ticket configuration.
//!
//! Process-level settings (database URL, bot token, config file path) come from
//! the environment. Static ticket configuration (categories, support roles,
//! feature toggles, intervals) is loaded once at startup from a YAML document
//! and shared across handlers via `Arc`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{config::ConfigError, AppError};

/// Process-level configuration read from environment variables.
pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,
    pub ticket_config_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            ticket_config_path: std::env::var("TICKET_CONFIG_PATH")
                .unwrap_or_else(|_| "config.yml".to_string()),
        })
    }
}

/// Cleanup behavior for the ticket record after channel deletion.
///
/// `Verified` only removes the record once the channel deletion succeeded,
/// leaving an orphaned record behind on failure. `BestEffort` removes the
/// record regardless of the deletion outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupMode {
    BestEffort,
    #[default]
    Verified,
}

/// Per-category entry in the static ticket configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategoryConfig {
    /// Label shown in the select menu and used in the channel name.
    pub menu_label: String,
    /// Description shown in the select menu.
    pub menu_description: String,
    /// Optional emoji shown next to the menu entry.
    #[serde(default)]
    pub menu_emoji: Option<String>,
    /// Description posted in the ticket embed when a ticket opens.
    pub embed_description: String,
}

/// Static ticket configuration document.
///
/// Field names match the YAML document keys (camelCase), which in turn mirror
/// the config file format users of the original bot already have.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketConfig {
    /// Role IDs whose members may perform staff-only ticket actions.
    pub support_roles: Vec<String>,
    /// Parent category channel under which ticket channels are created.
    pub ticket_category_id: String,
    /// Maximum concurrently open tickets per user.
    pub max_active_tickets_per_user: u64,
    /// Placeholder text of the category select menu.
    pub menu_placeholder: String,
    pub enable_claim_button: bool,
    pub close_ticket_staff_only: bool,
    pub enable_ticket_reason: bool,
    pub enable_notify_ticket_creator: bool,
    pub enable_transcripts: bool,
    pub enable_ticket_activity_check: bool,
    /// Idle threshold in minutes for the activity sweeper.
    pub ticket_activity_check_interval: u64,
    /// Channel receiving creation/closure/rating log embeds.
    pub log_channel_id: String,
    /// Channel receiving transcript notes when transcripts are enabled.
    pub transcript_logs_channel_id: String,
    /// Record cleanup behavior after channel deletion.
    #[serde(default)]
    pub cleanup_mode: CleanupMode,
    /// Category key to category configuration.
    pub ticket_categories: BTreeMap<String, TicketCategoryConfig>,
}

impl TicketConfig {
    /// Loads and parses the ticket configuration from a YAML file.
    ///
    /// # Arguments
    /// - `path` - Path to the YAML configuration document
    ///
    /// # Returns
    /// - `Ok(TicketConfig)` - Parsed configuration
    /// - `Err(AppError)` - File could not be read or parsed
    pub fn load(path: &str) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_string(),
            source,
        })?;

        let config: TicketConfig =
            serde_yaml::from_str(&contents).map_err(ConfigError::Parse)?;

        Ok(config)
    }

    /// Resolves a category key case-insensitively.
    ///
    /// # Arguments
    /// - `key` - Category key as received from a select menu or command
    ///
    /// # Returns
    /// - `Some((key, config))` - The canonical key and its configuration
    /// - `None` - No category with that key exists
    pub fn resolve_category(&self, key: &str) -> Option<(&str, &TicketCategoryConfig)> {
        self.ticket_categories
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// The idle threshold as a chrono duration.
    pub fn idle_threshold(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.ticket_activity_check_interval as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
supportRoles:
  - "111111111111111111"
ticketCategoryId: "222222222222222222"
maxActiveTicketsPerUser: 2
menuPlaceholder: "Select a category"
enableClaimButton: true
closeTicketStaffOnly: false
enableTicketReason: true
enableNotifyTicketCreator: true
enableTranscripts: false
enableTicketActivityCheck: true
ticketActivityCheckInterval: 30
logChannelId: "333333333333333333"
transcriptLogsChannelId: "444444444444444444"
ticketCategories:
  billing:
    menuLabel: "Billing"
    menuDescription: "Billing questions"
    menuEmoji: "💳"
    embedDescription: "A staff member will assist you with billing shortly."
  support:
    menuLabel: "Support"
    menuDescription: "General support"
    embedDescription: "Describe your issue and staff will be with you."
"#;

    /// Parses the sample document and checks the toggles and intervals land
    /// on the right fields.
    #[test]
    fn parses_sample_document() {
        let config: TicketConfig = serde_yaml::from_str(SAMPLE).unwrap();

        assert_eq!(config.support_roles, vec!["111111111111111111"]);
        assert_eq!(config.max_active_tickets_per_user, 2);
        assert!(config.enable_claim_button);
        assert!(!config.close_ticket_staff_only);
        assert!(config.enable_ticket_activity_check);
        assert_eq!(config.ticket_activity_check_interval, 30);
        assert_eq!(config.idle_threshold(), chrono::Duration::minutes(30));
        assert_eq!(config.ticket_categories.len(), 2);
        assert_eq!(
            config.ticket_categories["billing"].menu_label,
            "Billing"
        );
        assert!(config.ticket_categories["support"].menu_emoji.is_none());
    }

    /// Cleanup mode defaults to verified when the document omits it.
    #[test]
    fn cleanup_mode_defaults_to_verified() {
        let config: TicketConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.cleanup_mode, CleanupMode::Verified);
    }

    /// Category resolution ignores case but not unknown keys.
    #[test]
    fn resolves_categories_case_insensitively() {
        let config: TicketConfig = serde_yaml::from_str(SAMPLE).unwrap();

        let (key, category) = config.resolve_category("BILLING").unwrap();
        assert_eq!(key, "billing");
        assert_eq!(category.menu_label, "Billing");

        assert!(config.resolve_category("refunds").is_none());
    }
}
