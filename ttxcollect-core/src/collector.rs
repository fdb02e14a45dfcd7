//! Data unit walking and per-kind packet collection
//!
//! The collector walks the data units of one PES payload, validates framing
//! and magazine/packet addressing, and notifies a listener for every
//! structurally valid packet. The listener decides, per packet, whether and
//! how the body is decoded by calling [`PacketContext::consume`].

use crate::constants::{
    ControlInfo, DESIGNATION_ADDRESS_MAX, DESIGNATION_ADDRESS_MIN, EDITORIAL_LINK_COUNT,
    FRAMING_CODE, HEADER_CODED_BYTES, HEADER_TEXT_LENGTH, SERVICE_INFO_LENGTH,
    STATUS_DISPLAY_LENGTH, SUBTITLE_UNIT_ID, TELETEXT_UNIT_ID, TRIPLET_COUNT,
};
#[cfg(feature = "logging")]
use crate::constants::TELETEXT_UNIT_LENGTH;
use crate::error::DecodeError;
use crate::hamming::{decode_hamming2418, decode_hamming84, decode_parity};
use crate::reader::PesReader;
use crate::types::{
    BcastServiceDataPacket, EditorialLinksPacket, HeaderPacket, Packet, PacketBody, PacketRequest,
    PageId, TripletsPacket,
};
use alloc::vec::Vec;
use bytes::Bytes;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Listener notified for every structurally valid low-level packet.
pub trait CollectorListener {
    /// Called when a packet is ready to be collected.
    ///
    /// The context carries the decoded addressing and allows the packet body
    /// to be consumed. Not calling [`PacketContext::consume`] skips the
    /// packet without cost.
    fn on_packet_ready(&mut self, context: &mut PacketContext<'_, '_>);
}

/// Context handed to the listener for one ready packet.
///
/// Consuming reads from the data unit's bounded reader, so `consume` must be
/// called at most once per context.
pub struct PacketContext<'r, 'd> {
    magazine_number: u8,
    packet_address: u8,
    designation_code: i8,
    reader: &'r mut PesReader<'d>,
}

impl PacketContext<'_, '_> {
    /// Magazine number (0-7, wire value; 0 means magazine 8).
    pub fn magazine_number(&self) -> u8 {
        self.magazine_number
    }

    /// Packet address (0-31).
    pub fn packet_address(&self) -> u8 {
        self.packet_address
    }

    /// Designation code for packet addresses 26-31.
    ///
    /// -1 when the address carries no designation code or its Hamming
    /// decoding failed; per-kind validity is checked by `consume`.
    pub fn designation_code(&self) -> i8 {
        self.designation_code
    }

    /// Decode the packet body as the requested kind.
    ///
    /// On error the body is dropped; broadcast data is lossy by nature and
    /// the next repetition of the packet is expected to succeed.
    pub fn consume(&mut self, request: PacketRequest) -> Result<Packet, DecodeError> {
        #[cfg(feature = "logging")]
        trace!(
            magazine = self.magazine_number,
            address = self.packet_address,
            ?request,
            "consuming packet"
        );

        let body = match request {
            PacketRequest::Raw { length } => collect_raw(self.reader, length)?,
            PacketRequest::Header => collect_header(self.reader, self.magazine_number)?,
            PacketRequest::LopData { length } => collect_lop_data(self.reader, length)?,
            PacketRequest::BttPageType { length } => collect_btt_page_type(self.reader, length)?,
            PacketRequest::EditorialLinks => {
                collect_editorial_links(self.reader, self.magazine_number)?
            }
            PacketRequest::BcastServiceData => collect_bcast_service_data(self.reader)?,
            PacketRequest::Triplets => collect_triplets(self.reader)?,
        };

        Ok(Packet {
            magazine_number: self.magazine_number,
            packet_address: self.packet_address,
            body,
        })
    }
}

/// Teletext packet collector.
///
/// Holds no mutable state across calls beyond the listener itself; the
/// Hamming tables are process-wide immutable constants.
pub struct Collector<L: CollectorListener> {
    listener: L,
}

impl<L: CollectorListener> Collector<L> {
    /// Create a collector notifying the given listener.
    pub fn new(listener: L) -> Self {
        Self { listener }
    }

    /// Access the listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Access the listener mutably.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Consume the collector, returning the listener.
    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Process the data units of one PES payload.
    ///
    /// Malformed data units are dropped silently and processing continues
    /// with the next unit. The only error that aborts the call is a buffer
    /// underrun at the framing layer, signalling a structurally truncated
    /// payload.
    pub fn process_packet_data(&mut self, reader: &mut PesReader<'_>) -> Result<(), DecodeError> {
        let data_identifier = reader.read_u8()?;

        #[cfg(feature = "logging")]
        trace!(data_identifier, "processing packet data");
        #[cfg(not(feature = "logging"))]
        let _ = data_identifier;

        while reader.bytes_left() > 0 {
            let unit_id = reader.read_u8()?;
            let unit_length = reader.read_u8()? as usize;

            if unit_id != TELETEXT_UNIT_ID && unit_id != SUBTITLE_UNIT_ID {
                #[cfg(feature = "logging")]
                trace!(unit_id, unit_length, "unsupported unit id, skipping");
                reader.skip(unit_length)?;
                continue;
            }

            #[cfg(feature = "logging")]
            if unit_length != TELETEXT_UNIT_LENGTH as usize {
                debug!(unit_id, unit_length, "unusual data unit length");
            }

            let mut unit_reader = reader.sub_reader(unit_length)?;
            self.process_data_unit(&mut unit_reader)?;

            reader.skip(unit_length)?;
        }

        Ok(())
    }

    /// Validate one data unit's framing and addressing and notify the
    /// listener when they hold.
    fn process_data_unit(&mut self, reader: &mut PesReader<'_>) -> Result<(), DecodeError> {
        let _unit_control = reader.read_u8()?;
        let framing_code = reader.read_u8()?;
        let mp_hamming1 = reader.read_u8()?;
        let mp_hamming2 = reader.read_u8()?;

        if framing_code != FRAMING_CODE {
            #[cfg(feature = "logging")]
            trace!(framing_code, "invalid framing code (not teletext?)");
            return Ok(());
        }

        let (Some(mp1), Some(mp2)) = (
            decode_hamming84(mp_hamming1),
            decode_hamming84(mp_hamming2),
        ) else {
            #[cfg(feature = "logging")]
            debug!("invalid magazine/packet encoding");
            return Ok(());
        };

        let magazine_number = mp1 & 0x07;
        let packet_address = ((mp1 & 0x08) >> 3) | ((mp2 & 0x0F) << 1);

        let designation_code = if (DESIGNATION_ADDRESS_MIN..=DESIGNATION_ADDRESS_MAX)
            .contains(&packet_address)
        {
            // Peeked, not consumed: the per-kind collect reads it again and
            // checks validity for its own grammar.
            match decode_hamming84(reader.peek_u8()?) {
                Some(value) => value as i8,
                None => -1,
            }
        } else {
            -1
        };

        #[cfg(feature = "logging")]
        trace!(
            magazine = magazine_number,
            address = packet_address,
            designation_code,
            "packet ready"
        );

        let mut context = PacketContext {
            magazine_number,
            packet_address,
            designation_code,
            reader,
        };

        self.listener.on_packet_ready(&mut context);

        Ok(())
    }
}

/// Copy bytes verbatim without correction. Never fails short of underrun.
fn collect_raw(reader: &mut PesReader<'_>, length: usize) -> Result<PacketBody, DecodeError> {
    let mut buffer = Vec::with_capacity(length);
    for _ in 0..length {
        buffer.push(reader.read_u8()?);
    }
    Ok(PacketBody::Raw(Bytes::from(buffer)))
}

/// Parity-decode readable text, substituting a space for every byte that
/// fails the parity check.
fn collect_readable(reader: &mut PesReader<'_>, length: usize) -> Result<Vec<u8>, DecodeError> {
    let mut buffer = Vec::with_capacity(length);
    for _ in 0..length {
        let byte = reader.read_u8()?;
        buffer.push(decode_parity(byte).unwrap_or(b' '));
    }
    Ok(buffer)
}

fn collect_header(
    reader: &mut PesReader<'_>,
    magazine_number: u8,
) -> Result<PacketBody, DecodeError> {
    let mut coded = [0u8; HEADER_CODED_BYTES];
    for (offset, slot) in coded.iter_mut().enumerate() {
        *slot = decode_hamming84(reader.read_u8()?)
            .ok_or(DecodeError::InvalidHamming { offset })?;
    }

    // Wire magazine 0 addresses magazine 8.
    let magazine = if magazine_number == 0 {
        8
    } else {
        magazine_number
    };

    let magazine_page = (coded[0] & 0x0F) as u16
        | ((coded[1] & 0x0F) as u16) << 4
        | (magazine as u16) << 8;

    let subpage = (coded[2] & 0x0F) as u16
        | ((coded[3] & 0x07) as u16) << 4
        | ((coded[4] & 0x0F) as u16) << 8
        | ((coded[5] & 0x03) as u16) << 12;

    let mut control = ControlInfo::NONE;
    if coded[3] & 0x08 != 0 {
        control |= ControlInfo::ERASE_PAGE;
    }
    if coded[5] & 0x04 != 0 {
        control |= ControlInfo::NEWSFLASH;
    }
    if coded[5] & 0x08 != 0 {
        control |= ControlInfo::SUBTITLE;
    }
    if coded[6] & 0x01 != 0 {
        control |= ControlInfo::SUPPRESS_HEADER;
    }
    if coded[6] & 0x02 != 0 {
        control |= ControlInfo::UPDATE_INDICATOR;
    }
    if coded[6] & 0x04 != 0 {
        control |= ControlInfo::INTERRUPTED_SEQUENCE;
    }
    if coded[6] & 0x08 != 0 {
        control |= ControlInfo::INHIBIT_DISPLAY;
    }
    if coded[7] & 0x01 != 0 {
        control |= ControlInfo::MAGAZINE_SERIAL;
    }

    let mut national_option = 0u8;
    if coded[7] & 0x08 != 0 {
        national_option |= 0x01;
    }
    if coded[7] & 0x04 != 0 {
        national_option |= 0x02;
    }
    if coded[7] & 0x02 != 0 {
        national_option |= 0x04;
    }

    let text = collect_readable(reader, HEADER_TEXT_LENGTH)?;

    Ok(PacketBody::Header(HeaderPacket {
        page: PageId::new(magazine_page, subpage),
        control: ControlInfo::new(control),
        national_option,
        text,
    }))
}

fn collect_lop_data(reader: &mut PesReader<'_>, length: usize) -> Result<PacketBody, DecodeError> {
    Ok(PacketBody::LopData(collect_readable(reader, length)?))
}

fn collect_btt_page_type(
    reader: &mut PesReader<'_>,
    length: usize,
) -> Result<PacketBody, DecodeError> {
    let mut buffer = Vec::with_capacity(length);
    for offset in 0..length {
        let nibble = decode_hamming84(reader.read_u8()?)
            .ok_or(DecodeError::InvalidHamming { offset })?;
        buffer.push(nibble);
    }
    Ok(PacketBody::BttPageType(buffer))
}

fn collect_editorial_links(
    reader: &mut PesReader<'_>,
    magazine_number: u8,
) -> Result<PacketBody, DecodeError> {
    let designation_code = read_designation(reader)?;
    if designation_code > 3 {
        return Err(DecodeError::InvalidDesignation(designation_code));
    }

    let mut links = [PageId::default(); EDITORIAL_LINK_COUNT];
    for link in links.iter_mut() {
        let mut coded = [0u8; 6];
        for (offset, slot) in coded.iter_mut().enumerate() {
            *slot = decode_hamming84(reader.read_u8()?)
                .ok_or(DecodeError::InvalidHamming { offset })?;
        }

        let mut relative_magazine = 0u8;
        if coded[3] & 0x08 != 0 {
            relative_magazine |= 0x01;
        }
        if coded[5] & 0x04 != 0 {
            relative_magazine |= 0x02;
        }
        if coded[5] & 0x08 != 0 {
            relative_magazine |= 0x04;
        }

        let mut link_magazine = magazine_number ^ relative_magazine;
        if link_magazine == 0 {
            link_magazine = 8;
        }

        let magazine_page = (coded[0] & 0x0F) as u16
            | ((coded[1] & 0x0F) as u16) << 4
            | (link_magazine as u16) << 8;

        let subpage = (coded[2] & 0x0F) as u16
            | ((coded[3] & 0x07) as u16) << 4
            | ((coded[4] & 0x0F) as u16) << 8
            | ((coded[5] & 0x03) as u16) << 12;

        // Page FF with subpage 3F7F means no page is specified; kept as-is
        // for the consumer to test via PageId::is_null.
        *link = PageId::new(magazine_page, subpage);
    }

    let (link_control, crc) = if designation_code == 0 {
        let link_control = decode_hamming84(reader.read_u8()?)
            .ok_or(DecodeError::InvalidHamming { offset: 0 })?;
        let crc_high = reader.read_u8()? as u16;
        let crc_low = reader.read_u8()? as u16;
        (link_control, (crc_high << 8) | crc_low)
    } else {
        reader.skip(3)?;
        (0xFF, 0xFFFF)
    };

    Ok(PacketBody::EditorialLinks(EditorialLinksPacket {
        designation_code,
        links,
        link_control,
        crc,
    }))
}

fn collect_bcast_service_data(reader: &mut PesReader<'_>) -> Result<PacketBody, DecodeError> {
    let designation_code = read_designation(reader)?;
    if designation_code > 3 {
        return Err(DecodeError::InvalidDesignation(designation_code));
    }

    let mut coded = [0u8; 6];
    for (offset, slot) in coded.iter_mut().enumerate() {
        *slot = decode_hamming84(reader.read_u8()?)
            .ok_or(DecodeError::InvalidHamming { offset })?;
    }

    let magazine = ((coded[3] & 0x08) >> 3) as u16 | ((coded[3] & 0x0C) >> 1) as u16;

    let magazine_page = (coded[0] & 0x0F) as u16 | ((coded[1] & 0x0F) as u16) << 4 | magazine << 8;

    let subpage = (coded[2] & 0x0F) as u16
        | ((coded[3] & 0x07) as u16) << 4
        | ((coded[4] & 0x0F) as u16) << 8
        | ((coded[5] & 0x03) as u16) << 12;

    reader.skip(SERVICE_INFO_LENGTH)?;

    // No substitution tolerance here: a single parity error rejects the
    // whole packet.
    let mut status_display = Vec::with_capacity(STATUS_DISPLAY_LENGTH);
    for offset in 0..STATUS_DISPLAY_LENGTH {
        let byte = decode_parity(reader.read_u8()?)
            .ok_or(DecodeError::InvalidParity { offset })?;
        status_display.push(byte);
    }

    Ok(PacketBody::BcastServiceData(BcastServiceDataPacket {
        designation_code,
        initial_page: PageId::new(magazine_page, subpage),
        status_display,
    }))
}

fn collect_triplets(reader: &mut PesReader<'_>) -> Result<PacketBody, DecodeError> {
    let designation_code = read_designation(reader)?;

    let mut values = [0u32; TRIPLET_COUNT];
    for (index, value) in values.iter_mut().enumerate() {
        let byte1 = reader.read_u8()?;
        let byte2 = reader.read_u8()?;
        let byte3 = reader.read_u8()?;

        *value = decode_hamming2418(byte1, byte2, byte3)
            .ok_or(DecodeError::BrokenTriplet { index })?;
    }

    Ok(PacketBody::Triplets(TripletsPacket {
        designation_code,
        values,
    }))
}

/// Read and Hamming-decode a designation code byte.
fn read_designation(reader: &mut PesReader<'_>) -> Result<i8, DecodeError> {
    decode_hamming84(reader.read_u8()?)
        .map(|value| value as i8)
        .ok_or(DecodeError::InvalidDesignation(-1))
}
