pub mod definition;
pub mod id;
pub mod kind;
pub mod patch;
pub mod price;

pub use definition::*;
pub use id::*;
pub use kind::*;
pub use patch::*;
pub use price::PriceAdjustment;
