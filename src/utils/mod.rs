pub mod poise;
pub use self::poise::Context;

pub mod text;
pub mod words;
