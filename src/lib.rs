pub mod console;
pub mod game;
