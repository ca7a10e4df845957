pub mod catalog;
pub mod config;
pub mod download_client;
pub mod error;
pub mod github;
pub mod logging;
pub mod resolver;

#[cfg(test)]
pub mod test_helpers;
