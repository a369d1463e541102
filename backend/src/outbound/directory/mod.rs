//! Adapters for the external identity directory.

mod http_user_directory;

pub use http_user_directory::HttpUserDirectory;
