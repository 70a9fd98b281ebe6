//! Application-level configuration constants.

// Map
pub const MAP_CONTAINER_ID: &str = "map";
pub const MAP_ZOOM_LEVEL: u8 = 13;
pub const PAN_DURATION_SEC: f64 = 1.0;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

// Popups
pub const POPUP_MAX_WIDTH: u32 = 250;
pub const POPUP_MIN_WIDTH: u32 = 100;

// Persistence
pub const STORAGE_KEY: &str = "workouts";

// UI behavior
pub const FORM_REDISPLAY_MS: u32 = 1_000;
pub const GEOLOCATION_ALERT: &str = "Could not get your position";
pub const INVALID_INPUT_ALERT: &str = "Inputs have to be positive numbers";

// Logging
pub const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;
