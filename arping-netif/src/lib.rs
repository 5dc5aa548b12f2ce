//! This crate decides which local network interface, and which of its addresses, an ARP probe
//! for a given target should go out from. Listing the interfaces is delegated to an
//! `InterfaceSource`; the system implementation lives in `system` and is Linux only.

mod error;
pub use error::Error;

mod interface;
pub use interface::{InterfaceSource, NetworkInterface};

mod resolver;
pub use resolver::{find_source_address, find_usable_interface};

#[cfg(target_os = "linux")]
mod system;
#[cfg(target_os = "linux")]
pub use system::SystemInterfaces;

pub use cidr::IpInet;
