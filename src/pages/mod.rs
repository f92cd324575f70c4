//! Route components. Pages stay thin: forms collect input, the session
//! controller does the work, guards decide who gets here at all.

pub mod dashboard;
pub mod forgot_password;
pub mod home;
pub mod login;
pub mod register;
pub mod reset_password;
pub mod settings;
