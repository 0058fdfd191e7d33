mod authenticator;
mod memory;

pub use authenticator::InMemoryAuthenticator;
pub use memory::InMemoryRepository;
