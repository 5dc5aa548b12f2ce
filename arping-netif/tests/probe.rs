use arping_netif::{
    find_source_address, find_usable_interface, Error, InterfaceSource, IpInet, NetworkInterface,
};
use arping_packets::{ArpClass, ArpDatagram, Classifier, MacAddr, ResponseClassifier};
use std::net::{IpAddr, Ipv4Addr};

struct Lab;

impl InterfaceSource for Lab {
    fn interfaces(&self) -> Result<Vec<NetworkInterface>, Error> {
        let inet = |s: &str| s.parse::<IpInet>().unwrap();
        Ok(vec![
            NetworkInterface::new("lo", None, true).with_addr(inet("127.0.0.1/8")),
            NetworkInterface::new("eth0", Some(MacAddr::new([2, 0, 0, 0, 0, 1])), false)
                .with_addr(inet("192.168.1.2/24")),
            NetworkInterface::new("eth1", Some(MacAddr::new([2, 0, 0, 0, 0, 2])), true)
                .with_addr(inet("fe80::2/64"))
                .with_addr(inet("192.168.1.10/24")),
        ])
    }
}

fn ipv4(addr: IpAddr) -> Ipv4Addr {
    match addr {
        IpAddr::V4(addr) => addr,
        IpAddr::V6(addr) => panic!("expected an IPv4 address, got {}", addr),
    }
}

#[test]
fn probe_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let target = Ipv4Addr::new(192, 168, 1, 1);
    let iface = find_usable_interface(&Lab, IpAddr::V4(target)).unwrap();
    assert_eq!(iface.name, "eth1");

    let src_ip = ipv4(find_source_address(IpAddr::V4(target), &iface, false).unwrap());
    assert_eq!(src_ip, Ipv4Addr::new(192, 168, 1, 10));
    let src_mac = iface.hardware_addr.unwrap();

    let request = ArpDatagram::request(src_mac, src_ip, MacAddr::ZERO, target);
    let frame = request.encode_with_ethernet_header();
    assert_eq!(frame.len(), 42);
    assert_eq!(ArpDatagram::decode_frame(&frame).unwrap(), request);

    let peer_mac = MacAddr::new([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
    let answer = ArpDatagram::reply(peer_mac, target, src_mac, src_ip);
    let mut received = answer.encode_with_ethernet_header();
    // minimum Ethernet frame size without FCS
    received.resize(60, 0);

    let parsed = ArpDatagram::decode_frame(&received).unwrap();
    let classifier = ResponseClassifier::new(request, false);
    assert_eq!(classifier.classify(&parsed), ArpClass::Response);
    assert_eq!(parsed.sender_mac(), Some(peer_mac));
    assert_eq!(parsed.sender_ip(), Some(target));
}

#[test]
fn unreachable_target_falls_back_when_ignoring_networks() {
    let target = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
    match find_usable_interface(&Lab, target) {
        Err(Error::NoUsableInterface { .. }) => {}
        other => panic!("unexpected result: {:?}", other),
    }

    let ifaces = Lab.interfaces().unwrap();
    let eth1 = ifaces.iter().find(|iface| iface.name == "eth1").unwrap();
    assert_eq!(
        find_source_address(target, eth1, true).unwrap(),
        "fe80::2".parse::<IpAddr>().unwrap()
    );
}
