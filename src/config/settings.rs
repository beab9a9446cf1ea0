use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the server and the broadcast hub.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub hub: HubSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the WebSocket server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the broadcast hub.
#[derive(Debug, Deserialize, Clone)]
pub struct HubSettings {
    /// Whether a sender receives its own broadcasts. On by default, matching
    /// "everyone sees every message" chat semantics.
    pub include_sender: bool,

    /// Capacity of each connection's outbound buffer. A peer that falls this
    /// far behind is evicted rather than allowed to stall fanout.
    pub send_buffer: usize,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub hub: Option<PartialHubSettings>,
}

/// Partial server settings, with every field optional.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial hub settings, with every field optional.
#[derive(Debug, Deserialize)]
pub struct PartialHubSettings {
    pub include_sender: Option<bool>,
    pub send_buffer: Option<usize>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            hub: HubSettings {
                include_sender: true,
                send_buffer: 256,
            },
        }
    }
}
