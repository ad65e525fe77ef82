pub mod metafields;
pub mod payload;
pub mod snapshot;

pub use metafields::{DEFAULT_NAMESPACE, Metafield, PayloadSink};
pub use payload::*;
pub use snapshot::*;
