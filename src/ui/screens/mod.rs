mod alert_screen;
mod main_screen;

pub use alert_screen::render_alert;
pub use main_screen::render_main;
