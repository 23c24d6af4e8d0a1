//! One module per screen of the web client.

pub mod auth;
pub mod equipment;
pub mod experiments;
pub mod navigation;
pub mod papers;
pub mod projects;
pub mod reservations;
pub mod users;
