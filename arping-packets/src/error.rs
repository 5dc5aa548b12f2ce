use failure::Fail;

#[derive(Debug, Fail, PartialEq)]
pub enum Error {
    /// The buffer ends before the address fields declared by its own header.
    #[fail(
        display = "buffer holds {} bytes but the datagram needs {}",
        actual, needed
    )]
    TruncatedBuffer { needed: usize, actual: usize },

    #[fail(display = "frame has ether type {:#06x}, not ARP", ether_type)]
    NotArp { ether_type: u16 },
}
