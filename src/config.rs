// Runtime configuration for the demo window and animation

/// Environment variable forcing vsync on or off.
pub const VSYNC_VAR: &str = "SQUARE_VSYNC";
/// Environment variable overriding the fall speed in pixels per second.
pub const FALL_SPEED_VAR: &str = "SQUARE_FALL_SPEED";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    /// Pixels per second.
    pub fall_speed: f32,
    /// `None` leaves the swap interval at the driver default.
    pub vsync: Option<bool>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "2D Square Rotation".to_string(),
            width: 720,
            height: 480,
            gl_major: 4,
            gl_minor: 6,
            depth_bits: 24,
            stencil_bits: 8,
            fall_speed: 100.0,
            vsync: None,
        }
    }
}

impl DemoConfig {
    /// Defaults with overrides taken from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides taken from `lookup`. Bad values are logged and skipped.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(VSYNC_VAR) {
            match parse_switch(&raw) {
                Some(vsync) => config.vsync = Some(vsync),
                None => log::warn!("Ignoring {VSYNC_VAR}='{raw}', expected 0/1/true/false/on/off"),
            }
        }

        if let Some(raw) = lookup(FALL_SPEED_VAR) {
            match raw.trim().parse::<f32>() {
                Ok(speed) if speed.is_finite() && speed >= 0.0 => config.fall_speed = speed,
                _ => log::warn!("Ignoring {FALL_SPEED_VAR}='{raw}', expected a non-negative number"),
            }
        }

        config
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
