use crate::Error;
use arping_packets::MacAddr;
use cidr::IpInet;
use std::fmt;

/// A snapshot of one network interface, as reported by an `InterfaceSource`.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkInterface {
    pub name: String,
    pub hardware_addr: Option<MacAddr>,
    pub is_up: bool,
    /// Bound addresses with their prefix length, in the order the OS reports them.
    pub addrs: Vec<IpInet>,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>, hardware_addr: Option<MacAddr>, is_up: bool) -> Self {
        NetworkInterface {
            name: name.into(),
            hardware_addr,
            is_up,
            addrs: Vec::new(),
        }
    }

    pub fn with_addr(mut self, addr: IpInet) -> Self {
        self.addrs.push(addr);
        self
    }
}

impl fmt::Display for NetworkInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hardware_addr = self
            .hardware_addr
            .map(|mac| mac.to_string())
            .unwrap_or_default();
        let state = if self.is_up { "up" } else { "down" };
        write!(f, "{:>6} {:>18}  {}", self.name, hardware_addr, state)
    }
}

/// Lists the interfaces of the host. Every call is a fresh query; nothing is cached.
pub trait InterfaceSource {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, Error>;
}

impl<F> InterfaceSource for F
where
    F: Fn() -> Result<Vec<NetworkInterface>, Error>,
{
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, Error> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_columns() {
        let iface = NetworkInterface::new("eth0", Some(MacAddr::new([2, 0, 0, 0, 0, 1])), true);
        assert_eq!(iface.to_string(), "  eth0  02:00:00:00:00:01  up");

        let iface = NetworkInterface::new("lo", None, false);
        assert_eq!(iface.to_string(), format!("    lo {:>18}  down", ""));
    }

    #[test]
    fn closures_are_sources() -> Result<(), Error> {
        let source = || -> Result<Vec<NetworkInterface>, Error> {
            Ok(vec![NetworkInterface::new("eth0", None, true)])
        };
        let ifaces = source.interfaces()?;
        assert_eq!(ifaces.len(), 1);
        assert_eq!(ifaces[0].name, "eth0");
        Ok(())
    }
}
