pub mod response_classifier;
pub mod zone_hider;

pub use response_classifier::ResponseClassifier;
pub use zone_hider::ZoneHider;
