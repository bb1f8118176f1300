pub mod card;
pub mod shuffle;
pub mod state;

pub use card::{Card, CardFace};
pub use state::{Game, Selection};
