pub mod app;
mod board;
mod dialogs;
mod hud;
mod scene;
mod state;
mod textures;
