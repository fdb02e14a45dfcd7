use crate::StreamListener;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;
use ttxcollect_core::types::{PacketBody, PageId};
use ttxcollect_core::{Collector, Packet, PesReader};

/// JSON-friendly view of one decoded packet.
#[derive(Serialize, Deserialize)]
pub struct PacketRecord {
    pub magazine: u8,
    pub address: u8,
    pub kind: String,
    /// Magazine/page in hex ("342") where the body carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Subpage in hex where the body carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpage: Option<String>,
    /// Readable text (header row, LOP row, status display)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Decoded 18-bit triplet values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triplets: Option<Vec<u32>>,
    /// Linked pages of an editorial links packet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    /// Hex dump of an uncorrected body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

fn format_page(page: &PageId) -> String {
    format!("{:03X}", page.magazine_page)
}

impl From<&Packet> for PacketRecord {
    fn from(packet: &Packet) -> Self {
        let mut record = PacketRecord {
            magazine: packet.magazine_number,
            address: packet.packet_address,
            kind: String::new(),
            page: None,
            subpage: None,
            text: None,
            triplets: None,
            links: None,
            raw: None,
        };

        match &packet.body {
            PacketBody::Raw(bytes) => {
                record.kind = "raw".into();
                record.raw = Some(hex::encode(bytes));
            }
            PacketBody::Header(header) => {
                record.kind = "header".into();
                record.page = Some(format_page(&header.page));
                record.subpage = Some(format!("{:04X}", header.page.subpage));
                record.text = Some(String::from_utf8_lossy(&header.text).into_owned());
            }
            PacketBody::LopData(text) => {
                record.kind = "lop".into();
                record.text = Some(String::from_utf8_lossy(text).into_owned());
            }
            PacketBody::BttPageType(nibbles) => {
                record.kind = "btt".into();
                record.raw = Some(hex::encode(nibbles));
            }
            PacketBody::EditorialLinks(links) => {
                record.kind = "links".into();
                record.links = Some(
                    links
                        .links
                        .iter()
                        .filter(|link| !link.is_null())
                        .map(format_page)
                        .collect(),
                );
            }
            PacketBody::BcastServiceData(bsd) => {
                record.kind = "bcast".into();
                record.page = Some(format_page(&bsd.initial_page));
                record.text = Some(String::from_utf8_lossy(&bsd.status_display).into_owned());
            }
            PacketBody::Triplets(triplets) => {
                record.kind = "triplets".into();
                record.triplets = Some(triplets.values.to_vec());
            }
        }

        record
    }
}

pub fn execute(
    input: &str,
    output: Option<&str>,
    limit: Option<usize>,
    magazine: Option<u8>,
) -> Result<()> {
    info!("Inspecting file: {}", input);

    let data = fs::read(input).with_context(|| format!("Failed to read input file: {}", input))?;

    info!("File size: {} bytes", data.len());

    let mut collector = Collector::new(StreamListener::default());
    collector
        .process_packet_data(&mut PesReader::new(&data))
        .with_context(|| "Payload is structurally truncated")?;

    let listener = collector.into_listener();

    let mut records: Vec<PacketRecord> = listener
        .packets
        .iter()
        .filter(|packet| magazine.map_or(true, |m| packet.magazine_number == m & 0x07))
        .map(PacketRecord::from)
        .collect();
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&records)
            .with_context(|| "Failed to serialize decoded packets")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded packets written to: {}", output_path);
    } else {
        for record in &records {
            let kind = match record.kind.as_str() {
                "header" => record.kind.green(),
                "lop" => record.kind.normal(),
                "links" | "bcast" => record.kind.cyan(),
                "triplets" => record.kind.yellow(),
                _ => record.kind.dimmed(),
            };
            let location = format!("{}/{}", record.magazine, record.address);
            match (&record.page, &record.text) {
                (Some(page), Some(text)) => {
                    println!("{:>5}  {:<8} page {}  |{}|", location, kind, page, text)
                }
                (None, Some(text)) => println!("{:>5}  {:<8} |{}|", location, kind, text),
                (Some(page), None) => println!("{:>5}  {:<8} page {}", location, kind, page),
                (None, None) => println!("{:>5}  {:<8}", location, kind),
            }
        }
    }

    if !listener.failures.is_empty() {
        println!();
        for failure in &listener.failures {
            println!(
                "{} {}/{}: {}",
                "dropped".red(),
                failure.magazine_number,
                failure.packet_address,
                failure.error
            );
        }
    }

    Ok(())
}
