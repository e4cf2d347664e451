use log::LevelFilter;

/* CHIP SELECT */
/// Level that selects the peripheral. Chip-select lines are active low.
pub const CS_ACTIVE_LEVEL: bool = false;
pub const CS_INACTIVE_LEVEL: bool = !CS_ACTIVE_LEVEL;
/// Longest setup/hold delay a config may ask for. The delay is a busy wait on
/// the transfer path, anything above this is almost certainly a unit mistake.
pub const MAX_CS_DELAY_US: u32 = 1_000;

/* FRAMES */
pub const BITS_PER_BYTE: u8 = 8;
pub const MAX_WORD_SIZE: u8 = 32;
pub const DEFAULT_WORD_SIZE: u8 = 8;

/* LOGGING */
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
