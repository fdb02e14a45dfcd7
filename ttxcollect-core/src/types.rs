//! Core types of the teletext packet data model

use crate::constants::{ControlInfo, EDITORIAL_LINK_COUNT, TRIPLET_COUNT};
use alloc::vec::Vec;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Teletext page identifier.
///
/// `magazine_page` packs the magazine number (1-8) into its top nibble and
/// the two-hex-digit page number into the low byte; `subpage` is the 16-bit
/// sub-identifier. Magazine number 0 on the wire means magazine 8 and is
/// normalized before a `PageId` is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId {
    /// Combined magazine and page number
    pub magazine_page: u16,

    /// Subpage number
    pub subpage: u16,
}

impl PageId {
    /// Invalid magazine page number.
    pub const INVALID_MAGAZINE_PAGE: u16 = 0xFFFF;

    /// Any subpage number.
    pub const ANY_SUBPAGE: u16 = 0xFFFF;

    /// NULL page mask.
    pub const NULL_MAGAZINE_PAGE_MASK: u16 = 0x00FF;

    /// NULL subpage number.
    pub const NULL_SUBPAGE: u16 = 0x3F7F;

    /// Create a page identifier.
    pub const fn new(magazine_page: u16, subpage: u16) -> Self {
        Self {
            magazine_page,
            subpage,
        }
    }

    /// Check for the NULL page address (page FF, subpage 3F7F) that
    /// broadcasters transmit when no page is specified.
    pub const fn is_null(&self) -> bool {
        (self.magazine_page & Self::NULL_MAGAZINE_PAGE_MASK) == Self::NULL_MAGAZINE_PAGE_MASK
            && self.subpage == Self::NULL_SUBPAGE
    }

    /// Check whether the subpage matches any subpage.
    pub const fn is_any_subpage(&self) -> bool {
        self.subpage == Self::ANY_SUBPAGE || self.subpage == Self::NULL_SUBPAGE
    }

    /// Check whether the subpage digits are within the transmission limits.
    pub const fn is_valid_subpage(&self) -> bool {
        if self.is_any_subpage() {
            true
        } else {
            let d1 = (self.subpage >> 12) & 0x0F;
            let d3 = (self.subpage >> 4) & 0x0F;
            (d1 <= 3) && (d3 <= 7)
        }
    }

    /// Check whether the page can be expressed as a decimal page number.
    pub const fn is_valid_decimal(&self) -> bool {
        if self.is_valid_subpage() {
            let m = self.magazine_page >> 8;
            let p1 = (self.magazine_page >> 4) & 0x0F;
            let p2 = self.magazine_page & 0x0F;
            (m >= 1) && (m <= 8) && (p1 <= 9) && (p2 <= 9)
        } else {
            false
        }
    }

    /// Decimal page number (100-899), or [`Self::INVALID_MAGAZINE_PAGE`]
    /// when the identifier holds hexadecimal digits.
    pub const fn decimal_magazine_page(&self) -> u16 {
        if self.is_valid_decimal() {
            let m = self.magazine_page >> 8;
            let p1 = (self.magazine_page >> 4) & 0x0F;
            let p2 = self.magazine_page & 0x0F;
            m * 100 + p1 * 10 + p2
        } else {
            Self::INVALID_MAGAZINE_PAGE
        }
    }

    /// Magazine number (1-8).
    pub const fn magazine(&self) -> u8 {
        (self.magazine_page >> 8) as u8
    }

    /// Two-hex-digit page number.
    pub const fn page(&self) -> u8 {
        (self.magazine_page & 0xFF) as u8
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self {
            magazine_page: Self::INVALID_MAGAZINE_PAGE,
            subpage: Self::ANY_SUBPAGE,
        }
    }
}

/// Decoded page header packet (packet X/0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPacket {
    /// Page identifier with the wire magazine normalized (0 means 8)
    pub page: PageId,

    /// Page control bits
    pub control: ControlInfo,

    /// National option character subset group (3 bits)
    pub national_option: u8,

    /// Header row text, parity-decoded with spaces substituted for
    /// broken characters
    pub text: Vec<u8>,
}

/// Decoded editorial links packet (packet X/27).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorialLinksPacket {
    /// Designation code (0-3)
    pub designation_code: i8,

    /// Linked pages; magazine numbers are relative to the carrying magazine
    pub links: [PageId; EDITORIAL_LINK_COUNT],

    /// Link control byte (0xFF when the designation code carries none)
    pub link_control: u8,

    /// Page CRC (0xFFFF when the designation code carries none)
    pub crc: u16,
}

/// Broadcast service data format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BcastServiceFormat {
    /// Format 1.
    F1,
    /// Format 2.
    F2,
    /// Unknown format.
    Unknown,
}

/// Broadcast service data function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BcastServiceFunction {
    /// Teletext multiplexed with video.
    Multiplexed,
    /// Full-channel teletext.
    NonMultiplexed,
    /// Unknown function.
    Unknown,
}

/// Decoded broadcast service data packet (packet 8/30).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BcastServiceDataPacket {
    /// Designation code (0-3)
    pub designation_code: i8,

    /// Initial teletext page of the service
    pub initial_page: PageId,

    /// Status display text (parity-decoded, no substitution)
    pub status_display: Vec<u8>,
}

impl BcastServiceDataPacket {
    /// Service data format derived from the designation code.
    pub const fn format(&self) -> BcastServiceFormat {
        match self.designation_code {
            0 | 1 => BcastServiceFormat::F1,
            2 | 3 => BcastServiceFormat::F2,
            _ => BcastServiceFormat::Unknown,
        }
    }

    /// Service function derived from the designation code.
    pub const fn function(&self) -> BcastServiceFunction {
        match self.designation_code {
            0 | 2 => BcastServiceFunction::Multiplexed,
            1 | 3 => BcastServiceFunction::NonMultiplexed,
            _ => BcastServiceFunction::Unknown,
        }
    }
}

/// Decoded enhancement triplets packet (packets X/26, X/28, X/29).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripletsPacket {
    /// Designation code (0-15)
    pub designation_code: i8,

    /// 13 decoded 18-bit triplet values
    pub values: [u32; TRIPLET_COUNT],
}

/// Decoded packet body, one variant per packet-structure grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PacketBody {
    /// Verbatim bytes, no error correction
    Raw(Bytes),

    /// Page header (X/0)
    Header(HeaderPacket),

    /// Level-one-page row text (X/1..X/25), parity-decoded with space
    /// substitution
    LopData(Vec<u8>),

    /// Basic TOP table page types, Hamming 8/4 decoded nibbles
    BttPageType(Vec<u8>),

    /// Editorial links (X/27)
    EditorialLinks(EditorialLinksPacket),

    /// Broadcast service data (8/30)
    BcastServiceData(BcastServiceDataPacket),

    /// Enhancement triplets (X/26, X/28, X/29)
    Triplets(TripletsPacket),
}

/// A collected low-level teletext packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Magazine number from the packet address group (0-7, wire value)
    pub magazine_number: u8,

    /// Packet address (0-31)
    pub packet_address: u8,

    /// Kind-specific decoded body
    pub body: PacketBody,
}

/// Selector passed to [`crate::collector::PacketContext::consume`] naming the
/// packet kind (and, for the buffer kinds, the length) the caller wants
/// decoded.
///
/// Kind selection is the caller's responsibility, typically keyed on the
/// packet address exposed by the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketRequest {
    /// Copy `length` bytes verbatim
    Raw {
        /// Number of bytes to copy.
        length: usize,
    },

    /// Decode a page header
    Header,

    /// Parity-decode `length` row text bytes
    LopData {
        /// Number of text bytes to decode.
        length: usize,
    },

    /// Hamming 8/4 decode `length` page-type nibbles
    BttPageType {
        /// Number of coded bytes to decode.
        length: usize,
    },

    /// Decode an editorial links packet
    EditorialLinks,

    /// Decode a broadcast service data packet
    BcastServiceData,

    /// Decode an enhancement triplets packet
    Triplets,
}
