use crate::StreamListener;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;
use ttxcollect_core::types::PacketBody;
use ttxcollect_core::{Collector, PesReader};

/// Summary of one decoded PES data field.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StreamStats {
    pub bytes_read: usize,
    pub packets_decoded: usize,
    pub decode_failures: usize,
    pub headers: usize,
    pub lop_rows: usize,
    pub btt_rows: usize,
    pub editorial_links: usize,
    pub bcast_service_data: usize,
    pub triplet_packets: usize,
    pub raw_packets: usize,
    /// Number of packets seen per magazine (wire values 0-7)
    pub packets_per_magazine: [usize; 8],
}

impl StreamStats {
    /// Share of ready packets whose body decoded cleanly.
    pub fn decode_rate(&self) -> f64 {
        let total = self.packets_decoded + self.decode_failures;
        if total == 0 {
            return 0.0;
        }
        self.packets_decoded as f64 * 100.0 / total as f64
    }
}

pub fn execute(input: &str, json: bool) -> Result<()> {
    info!("Collecting stats for file: {}", input);

    let data = fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?;

    let mut collector = Collector::new(StreamListener::default());
    collector
        .process_packet_data(&mut PesReader::new(&data))
        .with_context(|| "Payload is structurally truncated")?;

    let listener = collector.into_listener();

    let mut stats = StreamStats {
        bytes_read: data.len(),
        packets_decoded: listener.packets.len(),
        decode_failures: listener.failures.len(),
        ..StreamStats::default()
    };

    for packet in &listener.packets {
        stats.packets_per_magazine[(packet.magazine_number & 0x07) as usize] += 1;
        match &packet.body {
            PacketBody::Header(_) => stats.headers += 1,
            PacketBody::LopData(_) => stats.lop_rows += 1,
            PacketBody::BttPageType(_) => stats.btt_rows += 1,
            PacketBody::EditorialLinks(_) => stats.editorial_links += 1,
            PacketBody::BcastServiceData(_) => stats.bcast_service_data += 1,
            PacketBody::Triplets(_) => stats.triplet_packets += 1,
            PacketBody::Raw(_) => stats.raw_packets += 1,
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("\n=== Stream Stats ===");
    println!("Bytes read:          {} bytes", stats.bytes_read);
    println!("Packets decoded:     {}", stats.packets_decoded);
    println!("Decode failures:     {}", stats.decode_failures);
    println!("Decode rate:         {:.2}%", stats.decode_rate());
    println!();
    println!("Headers:             {}", stats.headers);
    println!("LOP rows:            {}", stats.lop_rows);
    println!("BTT rows:            {}", stats.btt_rows);
    println!("Editorial links:     {}", stats.editorial_links);
    println!("Bcast service data:  {}", stats.bcast_service_data);
    println!("Triplet packets:     {}", stats.triplet_packets);
    println!("Raw packets:         {}", stats.raw_packets);
    println!();
    for (magazine, count) in stats.packets_per_magazine.iter().enumerate() {
        if *count > 0 {
            let display = if magazine == 0 { 8 } else { magazine };
            println!("Magazine {}:          {}", display, count);
        }
    }

    Ok(())
}
