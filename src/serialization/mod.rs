//! Serialization surfaces for played games.
//!
//! This module defines a postcard-based record of a game: the board before
//! every move, the chosen direction and the points it earned, plus summary
//! metadata. Records are written by the binary on request and can be read
//! back for replay or analysis.

mod record;

pub use record::{
    GameRecord,
    RecordFinish,
    RecordMeta,
    RecordStep,
    Recorder,
    SerializationError,
    now_unix_seconds,
    to_postcard_bytes,
    from_postcard_bytes,
    write_postcard_to_path,
    read_postcard_from_path,
};
