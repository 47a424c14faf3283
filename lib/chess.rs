mod board;
mod color;
mod r#move;
mod piece;
mod record;
mod role;
mod rules;
mod square;

pub use board::*;
pub use color::*;
pub use piece::*;
pub use r#move::*;
pub use record::*;
pub use role::*;
pub use rules::*;
pub use square::*;
