//! Request handlers

pub mod health;
pub mod invitations;
pub mod venues;
