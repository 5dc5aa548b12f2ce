mod types;
pub use self::types::*;

mod error;
pub use self::error::Error;

mod arp;
pub use self::arp::*;

mod classifier;
pub use self::classifier::*;
