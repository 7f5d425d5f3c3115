pub mod repository;
pub mod serialization;
pub mod store;
pub mod traits;
pub mod transfer;

pub use repository::{GatewayRepository, LAST_END_KEY, SPRINTS_KEY};
pub use serialization::*;
pub use store::*;
pub use traits::*;
pub use transfer::*;
