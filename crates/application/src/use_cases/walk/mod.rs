mod walk_prefix;

pub use walk_prefix::WalkPrefixUseCase;
