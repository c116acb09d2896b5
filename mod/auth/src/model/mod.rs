pub mod policy;
pub mod session;
pub mod user;

pub use policy::{AccessDecision, AccessPolicy, Section};
pub use session::Session;
pub use user::{NewUser, Role, User, UserPatch};
