pub mod app;
pub mod input;
pub mod render;
pub mod theme;
pub mod ticker;

pub use app::run;
