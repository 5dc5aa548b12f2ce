use failure::Fail;
use std::io;
use std::net::IpAddr;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "iface: '{}' does not contain any ip", name)]
    NoAddressOnInterface { name: String },

    #[fail(display = "iface: '{}' can't reach ip: '{}'", name, target)]
    InterfaceUnreachable { name: String, target: IpAddr },

    #[fail(display = "no usable interface found for ip: '{}'", target)]
    NoUsableInterface { target: IpAddr },

    /// Listing the system's interfaces failed.
    #[fail(display = "failed to enumerate interfaces: {}", _0)]
    Enumeration(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Enumeration(err)
    }
}
