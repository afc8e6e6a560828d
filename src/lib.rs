pub mod error;
pub mod layout;
pub mod packages;
pub mod search;
pub mod util;
pub mod views;
