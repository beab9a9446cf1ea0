mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{HubSettings, ServerSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server and hub configurations
///
/// Environment variables use a double underscore between section and field
/// (`SERVER__PORT`, `HUB__SEND_BUFFER`), so field names that themselves
/// contain underscores stay addressable.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        hub: HubSettings {
            include_sender: partial
                .hub
                .as_ref()
                .and_then(|h| h.include_sender)
                .unwrap_or(default.hub.include_sender),
            send_buffer: partial
                .hub
                .as_ref()
                .and_then(|h| h.send_buffer)
                .unwrap_or(default.hub.send_buffer),
        },
    })
}
