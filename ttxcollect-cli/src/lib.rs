//! Library entry for ttxcollect-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use ttxcollect_core::constants::LOP_DATA_LENGTH;
use ttxcollect_core::{
    CollectorListener, DecodeError, Packet, PacketContext, PacketRequest,
};

/// Request chosen for a packet address, keyed the way EN 300 706 assigns
/// packet-structure grammars to addresses.
pub fn default_request(packet_address: u8) -> PacketRequest {
    match packet_address {
        0 => PacketRequest::Header,
        1..=25 => PacketRequest::LopData {
            length: LOP_DATA_LENGTH,
        },
        26 | 28 | 29 => PacketRequest::Triplets,
        27 => PacketRequest::EditorialLinks,
        30 => PacketRequest::BcastServiceData,
        _ => PacketRequest::Raw {
            length: LOP_DATA_LENGTH,
        },
    }
}

/// A consume failure with the addressing it happened under.
#[derive(Debug, Clone)]
pub struct ConsumeFailure {
    /// Magazine number of the failed packet.
    pub magazine_number: u8,
    /// Packet address of the failed packet.
    pub packet_address: u8,
    /// The decode error.
    pub error: DecodeError,
}

/// Listener consuming every packet with [`default_request`], keeping both
/// the decoded packets and the failures for reporting.
#[derive(Default)]
pub struct StreamListener {
    /// Successfully decoded packets, in transmission order.
    pub packets: Vec<Packet>,
    /// Packets whose body failed to decode.
    pub failures: Vec<ConsumeFailure>,
}

impl CollectorListener for StreamListener {
    fn on_packet_ready(&mut self, context: &mut PacketContext<'_, '_>) {
        let request = default_request(context.packet_address());
        match context.consume(request) {
            Ok(packet) => self.packets.push(packet),
            Err(error) => self.failures.push(ConsumeFailure {
                magazine_number: context.magazine_number(),
                packet_address: context.packet_address(),
                error,
            }),
        }
    }
}
