pub mod app;
mod board;
mod controller;
mod dialogs;
mod display;
mod error;
mod hud;
mod progression;
pub mod settings;
mod state;
#[cfg(test)]
mod testing;
mod timers;
