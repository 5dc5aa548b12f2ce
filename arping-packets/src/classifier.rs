//! Matching received datagrams against the request that is waiting for an answer.
//!
//! Only `is_response_of` is what RFC 826 would call an answer. The looser predicates exist because
//! real equipment gets this wrong in a few recurring ways, so the exact conditions are a
//! compatibility table and must not be tidied up. All address comparisons are byte-for-byte.
use crate::{ArpDatagram, ArpOp};

/// Used to determine the kind of datagram we have received. `Classifier::Class` is then consumed
/// by the caller to decide whether to accept, ignore or keep waiting.
pub trait Classifier {
    type Packet;
    type Class: Sized;

    fn classify(&self, packet: &Self::Packet) -> Self::Class;
}

impl ArpDatagram {
    /// A reply from the probed address, echoing our own address as its target.
    pub fn is_response_of(&self, request: &ArpDatagram) -> bool {
        self.opcode() == ArpOp::Reply as u16
            && self.sender_protocol_addr() == request.target_protocol_addr()
            && self.target_protocol_addr() == request.sender_protocol_addr()
    }

    /// A reply from the probed address, for peers that don't copy the target address back.
    pub fn is_response_of_target(&self, request: &ArpDatagram) -> bool {
        self.opcode() == ArpOp::Reply as u16
            && self.sender_protocol_addr() == request.target_protocol_addr()
    }

    ///
    /// Some switches (seen on Cisco) re-broadcast a duplicate address detection request they
    /// received, claiming the probed address as the sender. That is our own probe coming back
    /// and not an answer.
    ///
    pub fn is_duplicate_request_of(&self, request: &ArpDatagram, ignore_check: bool) -> bool {
        self.opcode() == ArpOp::Request as u16
            && self.sender_protocol_addr() == request.target_protocol_addr()
            && (ignore_check || self.target_protocol_addr() == request.target_protocol_addr())
    }

    /// Some switches (seen on H3C) reply to a duplicate address detection request themselves.
    pub fn is_response_of_dad_request(&self, request: &ArpDatagram, ignore_check: bool) -> bool {
        self.opcode() == ArpOp::Reply as u16
            && self.sender_protocol_addr() == request.target_protocol_addr()
            && (ignore_check || self.target_protocol_addr() == request.target_protocol_addr())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArpClass {
    Response,
    DuplicateRequest,
    DadResponse,
    TargetResponse,
    Unrelated,
}

///
/// Classifies received datagrams against one outstanding request. The strict match is tried
/// first, then the switch quirks, then the lenient target-only match; `TargetResponse` overlaps
/// `DadResponse` so the more specific one has to win.
///
#[derive(Clone, Debug)]
pub struct ResponseClassifier {
    request: ArpDatagram,
    ignore_check: bool,
}

impl ResponseClassifier {
    pub fn new(request: ArpDatagram, ignore_check: bool) -> Self {
        ResponseClassifier {
            request,
            ignore_check,
        }
    }

    pub fn request(&self) -> &ArpDatagram {
        &self.request
    }
}

impl Classifier for ResponseClassifier {
    type Packet = ArpDatagram;
    type Class = ArpClass;

    fn classify(&self, packet: &Self::Packet) -> Self::Class {
        let request = &self.request;
        if packet.is_response_of(request) {
            ArpClass::Response
        } else if packet.is_duplicate_request_of(request, self.ignore_check) {
            ArpClass::DuplicateRequest
        } else if packet.is_response_of_dad_request(request, self.ignore_check) {
            ArpClass::DadResponse
        } else if packet.is_response_of_target(request) {
            ArpClass::TargetResponse
        } else {
            ArpClass::Unrelated
        }
    }
}
