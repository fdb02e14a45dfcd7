//! Fuzzing placeholder for the ttxcollect-core collector
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_collector

use ttxcollect_core::constants::LOP_DATA_LENGTH;
use ttxcollect_core::types::PacketRequest;
use ttxcollect_core::{Collector, CollectorListener, PacketContext, PesReader};

struct GreedyListener;

impl CollectorListener for GreedyListener {
    fn on_packet_ready(&mut self, context: &mut PacketContext<'_, '_>) {
        let request = match context.packet_address() {
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
        };
        let _ = context.consume(request);
    }
}

pub fn fuzz_collector(data: &[u8]) {
    // Walk and consume arbitrary bytes - should never panic
    let mut collector = Collector::new(GreedyListener);
    let _ = collector.process_packet_data(&mut PesReader::new(data));
}

pub fn fuzz_hamming(data: &[u8]) {
    use ttxcollect_core::hamming::{decode_hamming2418, decode_hamming84, decode_parity};

    for &byte in data {
        let _ = decode_hamming84(byte);
        let _ = decode_parity(byte);
    }
    for triplet in data.chunks_exact(3) {
        let _ = decode_hamming2418(triplet[0], triplet[1], triplet[2]);
    }
}
