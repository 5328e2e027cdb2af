pub mod audio;
pub mod log;
pub mod notify;
