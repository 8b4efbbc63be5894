pub mod walk;

// Re-export use cases
pub use walk::WalkPrefixUseCase;
