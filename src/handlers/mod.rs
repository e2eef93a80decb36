// Two security tiers: public (registration + login) and protected
// (everything else, behind the session token middleware).
pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod users;
