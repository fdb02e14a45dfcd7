//! Constants of the EN 300 706 transmission format

use serde::{Deserialize, Serialize};

/// Data unit identifier for EBU teletext non-subtitle data
pub const TELETEXT_UNIT_ID: u8 = 0x02;

/// Data unit identifier for EBU teletext subtitle data
pub const SUBTITLE_UNIT_ID: u8 = 0x03;

/// Nominal data unit length for a teletext packet (44 bytes)
pub const TELETEXT_UNIT_LENGTH: u8 = 0x2C;

/// Framing code expected as the second byte of every teletext data unit
pub const FRAMING_CODE: u8 = 0xE4;

/// Number of Hamming 8/4 coded bytes opening a page header packet
pub const HEADER_CODED_BYTES: usize = 8;

/// Number of odd-parity text bytes following the header coded block
pub const HEADER_TEXT_LENGTH: usize = 32;

/// Number of odd-parity text bytes in a level-one-page row (packets X/1..X/25)
pub const LOP_DATA_LENGTH: usize = 40;

/// Number of Hamming 8/4 coded nibbles in a basic TOP table row
pub const BTT_PAGE_TYPE_LENGTH: usize = 40;

/// Number of editorial links in an X/27 packet
pub const EDITORIAL_LINK_COUNT: usize = 6;

/// Number of Hamming 24/18 triplets in an X/26..X/29 packet
pub const TRIPLET_COUNT: usize = 13;

/// Number of odd-parity status display bytes in an 8/30 packet
pub const STATUS_DISPLAY_LENGTH: usize = 20;

/// Raw service info bytes of an 8/30 packet skipped between the initial
/// page and the status display
pub const SERVICE_INFO_LENGTH: usize = 13;

/// First packet address carrying a designation code
pub const DESIGNATION_ADDRESS_MIN: u8 = 26;

/// Last packet address carrying a designation code
pub const DESIGNATION_ADDRESS_MAX: u8 = 31;

/// Page control bits decoded from a header packet (stored as a single byte)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlInfo(u8);

impl ControlInfo {
    /// No control bits set
    pub const NONE: u8 = 0b0000_0000;

    /// Page memory must be cleared before this page is written (C4)
    pub const ERASE_PAGE: u8 = 0b0000_0001;

    /// Page is a newsflash box (C5)
    pub const NEWSFLASH: u8 = 0b0000_0010;

    /// Page is a subtitle box (C6)
    pub const SUBTITLE: u8 = 0b0000_0100;

    /// Header row must not be displayed (C7)
    pub const SUPPRESS_HEADER: u8 = 0b0000_1000;

    /// Page content changed since previous transmission (C8)
    pub const UPDATE_INDICATOR: u8 = 0b0001_0000;

    /// Rows transmitted out of sequence (C9)
    pub const INTERRUPTED_SEQUENCE: u8 = 0b0010_0000;

    /// Page must not be displayed (C10)
    pub const INHIBIT_DISPLAY: u8 = 0b0100_0000;

    /// Magazine transmitted serially (C11)
    pub const MAGAZINE_SERIAL: u8 = 0b1000_0000;

    /// Create control info from a raw bit set
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// Get the raw bit set
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check whether the erase-page bit is set
    pub const fn erase_page(&self) -> bool {
        (self.0 & Self::ERASE_PAGE) != 0
    }

    /// Check whether the newsflash bit is set
    pub const fn newsflash(&self) -> bool {
        (self.0 & Self::NEWSFLASH) != 0
    }

    /// Check whether the subtitle bit is set
    pub const fn subtitle(&self) -> bool {
        (self.0 & Self::SUBTITLE) != 0
    }

    /// Check whether the suppress-header bit is set
    pub const fn suppress_header(&self) -> bool {
        (self.0 & Self::SUPPRESS_HEADER) != 0
    }

    /// Check whether the update-indicator bit is set
    pub const fn update_indicator(&self) -> bool {
        (self.0 & Self::UPDATE_INDICATOR) != 0
    }

    /// Check whether the interrupted-sequence bit is set
    pub const fn interrupted_sequence(&self) -> bool {
        (self.0 & Self::INTERRUPTED_SEQUENCE) != 0
    }

    /// Check whether the inhibit-display bit is set
    pub const fn inhibit_display(&self) -> bool {
        (self.0 & Self::INHIBIT_DISPLAY) != 0
    }

    /// Check whether the magazine-serial bit is set
    pub const fn magazine_serial(&self) -> bool {
        (self.0 & Self::MAGAZINE_SERIAL) != 0
    }
}
