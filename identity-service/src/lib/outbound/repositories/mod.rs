pub mod memory;
pub mod principal;

pub use memory::InMemoryPrincipalRepository;
pub use principal::PostgresPrincipalRepository;
