mod authenticator;
mod repository;

pub use authenticator::Authenticator;
pub use repository::Repository;
