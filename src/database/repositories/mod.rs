pub mod addresses;
pub mod contacts;
pub mod sessions;
pub mod users;
