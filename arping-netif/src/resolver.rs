use crate::{Error, InterfaceSource, NetworkInterface};
use cidr::Inet;
use log::debug;
use std::net::IpAddr;

///
/// Picks the address on `iface` to use as the sender of a probe for `target`.
///
/// Addresses are tried in the order the interface reports them and the first network containing
/// `target` wins. When none does and `ignore_net` is set, the interface's first address is used
/// anyway; otherwise the interface can't reach the target.
///
pub fn find_source_address(
    target: IpAddr,
    iface: &NetworkInterface,
    ignore_net: bool,
) -> Result<IpAddr, Error> {
    let first = match iface.addrs.first() {
        Some(addr) => addr.address(),
        None => {
            return Err(Error::NoAddressOnInterface {
                name: iface.name.clone(),
            })
        }
    };

    if let Some(addr) = iface.addrs.iter().find(|addr| addr.contains(&target)) {
        return Ok(addr.address());
    }

    if ignore_net {
        Ok(first)
    } else {
        Err(Error::InterfaceUnreachable {
            name: iface.name.clone(),
            target,
        })
    }
}

///
/// Returns the first interface, in enumeration order, that is up and has an address in a network
/// containing `target`. This is first fit: a later interface with a more specific network is
/// never preferred.
///
pub fn find_usable_interface<S>(source: &S, target: IpAddr) -> Result<NetworkInterface, Error>
where
    S: InterfaceSource + ?Sized,
{
    let ifaces = source.interfaces()?;

    debug!("search usable interface");
    for iface in ifaces {
        if !iface.is_up {
            debug!("{:>10}: {}", "DOWN", iface);
            continue;
        }

        if find_source_address(target, &iface, false).is_err() {
            debug!("{:>10}: {}", "OTHER NET", iface);
            continue;
        }

        debug!("{:>10}: {}", "USABLE", iface);
        return Ok(iface);
    }

    Err(Error::NoUsableInterface { target })
}
