pub mod address;
pub mod contact;
pub mod session;
pub mod user;

pub use address::Address;
pub use contact::Contact;
pub use session::Session;
pub use user::User;
