use crate::{Error, InterfaceSource, NetworkInterface};
use arping_packets::MacAddr;
use cidr::{Inet, IpInet};
use std::{
    ffi::CStr,
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    ptr,
};

/// Lists the host's interfaces with `getifaddrs(3)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemInterfaces;

impl SystemInterfaces {
    pub fn new() -> Self {
        SystemInterfaces
    }
}

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, Error> {
        let mut ifaces: Vec<NetworkInterface> = Vec::new();

        // This block is marked as unsafe because it uses FFI. The list returned by getifaddrs is
        // only read while it is alive, every pointer in it is checked for null before being
        // dereferenced, and it is released with freeifaddrs before leaving the block.
        // Resources:
        // man 3 getifaddrs
        // man 7 packet regarding sockaddr_ll
        unsafe {
            let mut head: *mut libc::ifaddrs = ptr::null_mut();
            if libc::getifaddrs(&mut head) < 0 {
                return Err(io::Error::last_os_error().into());
            }

            let mut cursor = head;
            while !cursor.is_null() {
                let entry = &*cursor;
                cursor = entry.ifa_next;

                if entry.ifa_name.is_null() {
                    continue;
                }
                let name = CStr::from_ptr(entry.ifa_name).to_string_lossy();
                let is_up = entry.ifa_flags & libc::IFF_UP as libc::c_uint != 0;

                // one entry per address family, each repeating the interface name and flags
                let index = match ifaces.iter().position(|iface| iface.name == name) {
                    Some(index) => index,
                    None => {
                        ifaces.push(NetworkInterface::new(name.into_owned(), None, is_up));
                        ifaces.len() - 1
                    }
                };
                let iface = &mut ifaces[index];

                if let Some(mac) = hardware_addr(entry.ifa_addr) {
                    iface.hardware_addr = Some(mac);
                } else if let Some(addr) = ip_addr(entry.ifa_addr) {
                    let len = ip_addr(entry.ifa_netmask)
                        .map(prefix_len)
                        .unwrap_or_else(|| full_len(addr));
                    if let Ok(inet) = IpInet::new(addr, len) {
                        iface.addrs.push(inet);
                    }
                }
            }

            libc::freeifaddrs(head);
        }

        Ok(ifaces)
    }
}

unsafe fn ip_addr(addr: *const libc::sockaddr) -> Option<IpAddr> {
    if addr.is_null() {
        return None;
    }

    match (*addr).sa_family as libc::c_int {
        libc::AF_INET => {
            let addr = &*(addr as *const libc::sockaddr_in);
            Some(IpAddr::V4(Ipv4Addr::from(u32::from_be(addr.sin_addr.s_addr))))
        }
        libc::AF_INET6 => {
            let addr = &*(addr as *const libc::sockaddr_in6);
            Some(IpAddr::V6(Ipv6Addr::from(addr.sin6_addr.s6_addr)))
        }
        _ => None,
    }
}

unsafe fn hardware_addr(addr: *const libc::sockaddr) -> Option<MacAddr> {
    if addr.is_null() || (*addr).sa_family as libc::c_int != libc::AF_PACKET {
        return None;
    }

    let ll = &*(addr as *const libc::sockaddr_ll);
    if ll.sll_halen != 6 {
        return None;
    }
    let mut bytes = [0u8; 6];
    bytes.copy_from_slice(&ll.sll_addr[..6]);
    Some(MacAddr::new(bytes))
}

fn prefix_len(netmask: IpAddr) -> u8 {
    match netmask {
        IpAddr::V4(mask) => u32::from(mask).count_ones() as u8,
        IpAddr::V6(mask) => u128::from(mask).count_ones() as u8,
    }
}

fn full_len(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}
