//! Terminal front end for the long-polling chat client.
pub mod platform;
