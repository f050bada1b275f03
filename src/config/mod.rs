mod options;

pub use options::{ConnectOptions, OptionsError};
