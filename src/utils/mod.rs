mod format;

pub use format::{
    display_hash, format_difficulty, format_size, format_timestamp, short_hash, DISPLAY_HASH_LEN,
};
