//! Engine and server configuration.
//!
//! Uses `heapless::String` for short strings so the configuration types stay
//! usable without `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_elevator::config::{Config, EngineConfig, WebConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.engine.move_tick_ms, 2000);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_engine(EngineConfig::default().with_move_tick_ms(50).with_load_tick_ms(20))
//!     .with_web(WebConfig::default().with_port(3000));
//! ```

use core::time::Duration;

use heapless::String as HString;

/// Maximum length for short config strings (names, identifiers)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Cut on a char boundary at or below the capacity
    let valid_end = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= MAX_SHORT_STRING)
        .last()
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Service loop timing
    pub engine: EngineConfig,
    /// Web server configuration
    pub web: WebConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set engine configuration
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set web configuration
    pub fn with_web(mut self, web: WebConfig) -> Self {
        self.web = web;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Engine Config
// ============================================================================

/// Service loop timing.
///
/// Defaults model one second of dwell per stop and two seconds of travel
/// per floor.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Delay before each floor step, in milliseconds
    pub move_tick_ms: u32,
    /// Delay before each loading phase, in milliseconds
    pub load_tick_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_tick_ms: 2000,
            load_tick_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Set the per-floor travel delay
    pub fn with_move_tick_ms(mut self, ms: u32) -> Self {
        self.move_tick_ms = ms;
        self
    }

    /// Set the loading dwell delay
    pub fn with_load_tick_ms(mut self, ms: u32) -> Self {
        self.load_tick_ms = ms;
        self
    }

    /// Travel delay as a `Duration`
    pub fn move_tick(&self) -> Duration {
        Duration::from_millis(self.move_tick_ms as u64)
    }

    /// Dwell delay as a `Duration`
    pub fn load_tick(&self) -> Duration {
        Duration::from_millis(self.load_tick_ms as u64)
    }
}

// ============================================================================
// Web Config
// ============================================================================

/// Web server configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WebConfig {
    /// Port to listen on
    pub port: u16,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
    /// Whether web server is enabled
    pub enabled: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_permissive: true,
            enabled: true,
        }
    }
}

impl WebConfig {
    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS mode
    pub fn with_cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Enable or disable web server
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable building or car name
    pub name: ShortString,
    /// Car identifier
    pub id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("rs-elevator"),
            id: short_string("car1"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the car ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = short_string(id);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
