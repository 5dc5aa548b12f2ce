use std::convert::TryFrom;
use std::fmt;

pub const ARP_ETHER_TYPE: u16 = 0x0806;
pub const IPV4_PROTOCOL_TYPE: u16 = 0x0800;

/// Destination MAC, source MAC and EtherType.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// htype, ptype, hlen, plen and oper, before the variable-length address fields.
pub const ARP_HEADER_LEN: usize = 8;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct MacAddr {
    pub bytes: [u8; 6],
}

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr { bytes: [0xff; 6] };
    pub const ZERO: MacAddr = MacAddr { bytes: [0; 6] };

    pub fn new(bytes: [u8; 6]) -> MacAddr {
        MacAddr { bytes }
    }
}

impl TryFrom<&[u8]> for MacAddr {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 6]>::try_from(slice).map(MacAddr::new)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.bytes;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}
