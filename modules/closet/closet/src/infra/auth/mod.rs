pub mod memory;

pub use memory::InMemoryAuthProvider;
