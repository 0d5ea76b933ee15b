mod status;

pub use status::StatusBar;
