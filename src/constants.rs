/// Page contract of the web shell.
///
/// The host page provides a positioned region element containing the entity
/// element (absolutely positioned at the region's top-left corner), plus an
/// optional hint shown until sound is enabled.
pub const REGION_ID: &str = "arena";
pub const ENTITY_ID: &str = "critter";
pub const SOUND_HINT_ID: &str = "sound-hint";

// Config overrides are read from `data-<key>` attributes on the region element
pub const CONFIG_ATTR_PREFIX: &str = "data-";

// Skip style writes for sub-pixel moves
pub const RENDER_EPSILON_PX: f32 = 0.05;

// Media playback-rate writes below this delta are skipped
pub const RATE_WRITE_EPSILON: f32 = 1e-3;
