pub mod classify;
pub mod data;
pub mod layout;
pub mod solve;
