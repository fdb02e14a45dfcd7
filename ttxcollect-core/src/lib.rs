//! # Ttxcollect Core
//!
//! Recovery of structured, page-addressed teletext packets from raw bytes carried
//! inside MPEG PES payloads, per ETSI EN 300 706.
//!
//! ## Modules
//!
//! - `constants`: Transmission constants, buffer lengths, control bits
//! - `types`: Core types (PageId, Packet, PacketBody)
//! - `hamming`: Hamming 8/4, Hamming 24/18 and odd-parity codecs
//! - `reader`: Bounded PES payload reader
//! - `collector`: Data unit walking and per-kind packet collection
//!
//! Broadcast data is noise-exposed by nature; every decoder in this crate
//! degrades to dropped or blanked packets, never to a panic or an
//! out-of-bounds read.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod collector;
pub mod constants;
pub mod error;
pub mod hamming;
pub mod reader;
pub mod types;

// Re-export commonly used types
pub use collector::{Collector, CollectorListener, PacketContext};
pub use error::DecodeError;
pub use reader::PesReader;
pub use types::{Packet, PacketBody, PacketRequest, PageId};

/// Result type alias for collector operations
pub type Result<T> = core::result::Result<T, DecodeError>;
