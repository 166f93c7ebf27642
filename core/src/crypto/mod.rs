pub mod types;
pub mod keys;
pub mod nonce;
pub mod sealed_box;

pub use types::*;
pub use keys::*;
pub use nonce::*;
pub use sealed_box::*;
