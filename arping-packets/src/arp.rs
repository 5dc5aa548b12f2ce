use crate::{
    Error, MacAddr, ARP_ETHER_TYPE, ARP_HEADER_LEN, ETHERNET_HEADER_LEN, IPV4_PROTOCOL_TYPE,
};
use std::convert::TryFrom;
use std::net::Ipv4Addr;

pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

pub enum ArpHardwareType {
    Ethernet = 1,
}

const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_OFFSET: usize = 4;
const PROTOCOL_ADDR_LEN_OFFSET: usize = 5;
const OPCODE_RANGE: (usize, usize) = (6, 8);

///
/// A single ARP message as described in RFC 826
/// https://tools.ietf.org/html/rfc826
///
/// The address fields keep whatever length they were built or parsed with. The header lengths
/// are expected to agree with them, but nothing here enforces it: the encoder writes the slices
/// verbatim and the decoder trusts `hlen`/`plen`.
///
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArpDatagram {
    htype: u16,
    ptype: u16,
    hlen: u8,
    plen: u8,
    oper: u16,
    sha: Vec<u8>,
    spa: Vec<u8>,
    tha: Vec<u8>,
    tpa: Vec<u8>,
}

impl ArpDatagram {
    ///
    /// Builds an Ethernet/IPv4 request asking who has `dst_ip`, to be answered to
    /// `src_mac`/`src_ip`. For a plain probe `dst_mac` is usually `MacAddr::ZERO`.
    ///
    pub fn request(src_mac: MacAddr, src_ip: Ipv4Addr, dst_mac: MacAddr, dst_ip: Ipv4Addr) -> Self {
        Self::ethernet_ipv4(ArpOp::Request, src_mac, src_ip, dst_mac, dst_ip)
    }

    /// Same layout as `request`, with the reply opcode.
    pub fn reply(src_mac: MacAddr, src_ip: Ipv4Addr, dst_mac: MacAddr, dst_ip: Ipv4Addr) -> Self {
        Self::ethernet_ipv4(ArpOp::Reply, src_mac, src_ip, dst_mac, dst_ip)
    }

    fn ethernet_ipv4(
        op: ArpOp,
        src_mac: MacAddr,
        src_ip: Ipv4Addr,
        dst_mac: MacAddr,
        dst_ip: Ipv4Addr,
    ) -> Self {
        ArpDatagram {
            htype: ArpHardwareType::Ethernet as u16,
            ptype: IPV4_PROTOCOL_TYPE,
            hlen: 6,
            plen: 4,
            oper: op as u16,
            sha: src_mac.bytes.to_vec(),
            spa: src_ip.octets().to_vec(),
            tha: dst_mac.bytes.to_vec(),
            tpa: dst_ip.octets().to_vec(),
        }
    }

    ///
    /// Parses an ARP payload (no link-layer header). The four address fields are sliced using the
    /// `hlen`/`plen` read from the buffer itself; bytes past the last field are ignored, since
    /// short Ethernet frames arrive padded to the 60 byte minimum.
    ///
    pub fn decode(buffer: &[u8]) -> Result<Self, Error> {
        if buffer.len() < ARP_HEADER_LEN {
            return Err(Error::TruncatedBuffer {
                needed: ARP_HEADER_LEN,
                actual: buffer.len(),
            });
        }

        let hlen = buffer[HARDWARE_ADDR_LEN_OFFSET];
        let plen = buffer[PROTOCOL_ADDR_LEN_OFFSET];
        let (hl, pl) = (hlen as usize, plen as usize);

        let needed = ARP_HEADER_LEN + 2 * (hl + pl);
        if buffer.len() < needed {
            return Err(Error::TruncatedBuffer {
                needed,
                actual: buffer.len(),
            });
        }

        let sha_start = ARP_HEADER_LEN;
        let spa_start = sha_start + hl;
        let tha_start = spa_start + pl;
        let tpa_start = tha_start + hl;

        Ok(ArpDatagram {
            htype: read_u16(buffer, HARDWARE_TYPE_RANGE),
            ptype: read_u16(buffer, PROTOCOL_TYPE_RANGE),
            hlen,
            plen,
            oper: read_u16(buffer, OPCODE_RANGE),
            sha: buffer[sha_start..spa_start].to_vec(),
            spa: buffer[spa_start..tha_start].to_vec(),
            tha: buffer[tha_start..tpa_start].to_vec(),
            tpa: buffer[tpa_start..needed].to_vec(),
        })
    }

    ///
    /// Parses a frame as read off a raw link-layer socket: a 14 byte Ethernet header carrying the
    /// ARP ether type, followed by the ARP payload.
    ///
    pub fn decode_frame(frame: &[u8]) -> Result<Self, Error> {
        if frame.len() < ETHERNET_HEADER_LEN {
            return Err(Error::TruncatedBuffer {
                needed: ETHERNET_HEADER_LEN,
                actual: frame.len(),
            });
        }

        let ether_type = read_u16(frame, (12, ETHERNET_HEADER_LEN));
        if ether_type != ARP_ETHER_TYPE {
            return Err(Error::NotArp { ether_type });
        }

        Self::decode(&frame[ETHERNET_HEADER_LEN..]).map_err(|err| match err {
            Error::TruncatedBuffer { needed, actual } => Error::TruncatedBuffer {
                needed: needed + ETHERNET_HEADER_LEN,
                actual: actual + ETHERNET_HEADER_LEN,
            },
            other => other,
        })
    }

    /// Size of `encode()`'s output, taken from the address slices rather than `hlen`/`plen`.
    pub fn wire_len(&self) -> usize {
        ARP_HEADER_LEN + self.sha.len() + self.spa.len() + self.tha.len() + self.tpa.len()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.wire_len());
        self.write_payload(&mut data);
        data
    }

    ///
    /// Prepends a synthetic Ethernet header to the payload: `tha` as destination, `sha` as
    /// source, and the ARP ether type.
    ///
    pub fn encode_with_ethernet_header(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(ETHERNET_HEADER_LEN + self.wire_len());
        data.extend_from_slice(&self.tha);
        data.extend_from_slice(&self.sha);
        data.extend_from_slice(&ARP_ETHER_TYPE.to_be_bytes());
        self.write_payload(&mut data);
        data
    }

    fn write_payload(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&self.htype.to_be_bytes());
        data.extend_from_slice(&self.ptype.to_be_bytes());
        data.push(self.hlen);
        data.push(self.plen);
        data.extend_from_slice(&self.oper.to_be_bytes());
        data.extend_from_slice(&self.sha);
        data.extend_from_slice(&self.spa);
        data.extend_from_slice(&self.tha);
        data.extend_from_slice(&self.tpa);
    }

    pub fn hardware_type(&self) -> u16 {
        self.htype
    }

    pub fn protocol_type(&self) -> u16 {
        self.ptype
    }

    pub fn hardware_addr_len(&self) -> u8 {
        self.hlen
    }

    pub fn protocol_addr_len(&self) -> u8 {
        self.plen
    }

    pub fn opcode(&self) -> u16 {
        self.oper
    }

    pub fn sender_hardware_addr(&self) -> &[u8] {
        &self.sha
    }

    pub fn sender_protocol_addr(&self) -> &[u8] {
        &self.spa
    }

    pub fn target_hardware_addr(&self) -> &[u8] {
        &self.tha
    }

    pub fn target_protocol_addr(&self) -> &[u8] {
        &self.tpa
    }

    /// The sender's MAC, if the hardware address is 6 bytes long.
    pub fn sender_mac(&self) -> Option<MacAddr> {
        MacAddr::try_from(self.sha.as_slice()).ok()
    }

    /// The sender's IPv4 address, if the protocol address is 4 bytes long.
    pub fn sender_ip(&self) -> Option<Ipv4Addr> {
        <[u8; 4]>::try_from(self.spa.as_slice())
            .ok()
            .map(Ipv4Addr::from)
    }
}

// Callers check the buffer length before reading fixed header fields.
fn read_u16(data: &[u8], (start, end): (usize, usize)) -> u16 {
    let mut bytes = [0u8; 2];
    bytes.copy_from_slice(&data[start..end]);
    u16::from_be_bytes(bytes)
}

impl TryFrom<&[u8]> for ArpDatagram {
    type Error = Error;

    fn try_from(buffer: &[u8]) -> Result<Self, Self::Error> {
        ArpDatagram::decode(buffer)
    }
}
