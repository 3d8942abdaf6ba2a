//! Request and response bodies

pub mod invitations;
pub mod venues;
