pub mod detector;
pub mod fingerprint;
pub mod observation;
pub mod tracker;

pub use detector::{ChangeDecision, ChangeDetector, ChangeReason};
pub use fingerprint::ContentFingerprint;
pub use observation::{CapturedRoom, RoomKey, RoomObservation};
pub use tracker::SessionTracker;
