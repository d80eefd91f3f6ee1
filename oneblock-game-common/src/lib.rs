pub mod components;
pub mod data;
