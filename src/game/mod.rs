pub mod catalog;
pub mod error;
pub mod evaluate;
pub mod hints;
pub mod normalize;
pub mod session;
pub mod source;

pub use error::GameError;
pub use session::{GuessOutcome, Hint, PlayedEntry, RoundSession};
pub use source::{load_playlist, TrackSource};
