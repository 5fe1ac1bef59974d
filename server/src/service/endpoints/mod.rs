//! Endpoint handlers organized by domain

pub mod cards;
pub mod packs;
pub mod review;
pub mod users;
