// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! OpenPGP ASCII armor envelope checks.
//!
//! Decoding (base64 body, CRC-24 checksum) is done by `pgp`'s dearmor
//! reader. This module locates the first block and looks at the first
//! packet tag. No signature math happens here.

use pgp::armor::{BlockType, Dearmor};
use std::io::Read;

use super::FormatError;

const BEGIN_PREFIX: &str = "-----BEGIN ";
const END_PREFIX: &str = "-----END ";
const DASHES: &str = "-----";

/// A decoded armor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorBlock {
    /// Text between `BEGIN ` and the trailing dashes, e.g. `PGP SIGNATURE`.
    pub block_type: String,
    /// Whether the decoder recognised the block as a detached signature.
    pub is_signature: bool,
    /// Decoded binary payload.
    pub data: Vec<u8>,
}

/// Decode the first armor block in `text`.
pub fn decode(text: &str) -> Result<ArmorBlock, FormatError> {
    let (block_type, block) = first_block(text)?;

    let mut dearmor = Dearmor::new(block.as_bytes());
    let mut data = Vec::new();
    dearmor
        .read_to_end(&mut data)
        .map_err(|e| decode_error(&e.to_string()))?;

    if data.is_empty() {
        return Err(FormatError::MalformedArmor("empty armor body".to_string()));
    }

    Ok(ArmorBlock {
        block_type,
        is_signature: matches!(dearmor.typ, Some(BlockType::Signature)),
        data,
    })
}

/// Slice out the first BEGIN..END block, checking that the END line matches.
fn first_block(text: &str) -> Result<(String, &str), FormatError> {
    let start = text.find(BEGIN_PREFIX).ok_or_else(|| {
        FormatError::MalformedArmor("no BEGIN armor line".to_string())
    })?;
    let rest = &text[start..];
    let begin_line = rest.lines().next().unwrap_or_default().trim();
    let block_type = begin_line
        .strip_prefix(BEGIN_PREFIX)
        .and_then(|line| line.strip_suffix(DASHES))
        .ok_or_else(|| FormatError::MalformedArmor("unreadable BEGIN line".to_string()))?
        .to_string();

    let end_marker = format!("{}{}{}", END_PREFIX, block_type, DASHES);
    match rest.find(&end_marker) {
        Some(end) => Ok((block_type, &rest[..end + end_marker.len()])),
        None if rest.contains(END_PREFIX) => Err(FormatError::MalformedArmor(format!(
            "END line does not match BEGIN type '{}'",
            block_type
        ))),
        None => Err(FormatError::MissingEndMarker),
    }
}

/// The dearmor reader reports everything as `io::Error`; only the checksum
/// failure gets its own kind.
fn decode_error(message: &str) -> FormatError {
    let lower = message.to_lowercase();
    if lower.contains("crc") || lower.contains("checksum") {
        FormatError::ChecksumMismatch
    } else {
        FormatError::MalformedArmor(message.to_string())
    }
}

/// Packet tag of the first packet in `data`, in either header format.
pub fn first_packet_tag(data: &[u8]) -> Result<u8, FormatError> {
    let first = *data
        .first()
        .ok_or_else(|| FormatError::NoPacket("payload is empty".to_string()))?;

    if first & 0x80 == 0 {
        return Err(FormatError::NoPacket(format!(
            "first byte 0x{:02x} is not a packet tag",
            first
        )));
    }
    if data.len() < 2 {
        return Err(FormatError::NoPacket("truncated packet header".to_string()));
    }

    let tag = if first & 0x40 != 0 {
        first & 0x3F
    } else {
        (first >> 2) & 0x0F
    };
    if tag == 0 {
        return Err(FormatError::NoPacket("reserved packet tag 0".to_string()));
    }
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    fn armored(block_type: &str, data: &[u8]) -> String {
        format!(
            "-----BEGIN {bt}-----\nVersion: test\n\n{}\n-----END {bt}-----\n",
            STANDARD.encode(data),
            bt = block_type
        )
    }

    #[test]
    fn test_decode_signature_block() {
        let data = [0xC2, 0x03, 0x04, 0x00, 0x01];
        let block = decode(&armored("PGP SIGNATURE", &data)).unwrap();
        assert_eq!(block.block_type, "PGP SIGNATURE");
        assert!(block.is_signature);
        assert_eq!(block.data, data);
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let text = armored("PGP SIGNATURE", &[0xC2, 0x01, 0x04])
            .replace("-----END", "=AAAA\n-----END");
        assert_eq!(decode(&text), Err(FormatError::ChecksumMismatch));
    }

    #[test]
    fn test_decode_missing_end() {
        let text = "-----BEGIN PGP SIGNATURE-----\n\nwsBcBAAB\n";
        assert_eq!(decode(text), Err(FormatError::MissingEndMarker));
    }

    #[test]
    fn test_decode_mismatched_end() {
        let text = "-----BEGIN PGP SIGNATURE-----\n\nwsBc\n-----END PGP MESSAGE-----\n";
        assert!(matches!(decode(text), Err(FormatError::MalformedArmor(_))));
    }

    #[test]
    fn test_decode_bad_base64() {
        let text = "-----BEGIN PGP SIGNATURE-----\n\n!!!not base64!!!\n-----END PGP SIGNATURE-----\n";
        assert!(matches!(decode(text), Err(FormatError::MalformedArmor(_))));
    }

    #[test]
    fn test_decode_error_kinds() {
        assert_eq!(decode_error("invalid crc24 checksum"), FormatError::ChecksumMismatch);
        assert!(matches!(
            decode_error("invalid base64"),
            FormatError::MalformedArmor(_)
        ));
    }

    #[test]
    fn test_first_packet_tag() {
        // New format, tag 2.
        assert_eq!(first_packet_tag(&[0xC2, 0x03, 0x04, 0x00, 0x01]), Ok(2));
        // Old format, tag 2, one-octet length.
        assert_eq!(first_packet_tag(&[0x88, 0x02, 0x04, 0x00]), Ok(2));
    }

    #[test]
    fn test_first_packet_tag_rejects_garbage() {
        for data in [&[0x12, 0x34][..], &[][..], &[0xC2][..], &[0xC0, 0x01][..]] {
            assert!(matches!(
                first_packet_tag(data),
                Err(FormatError::NoPacket(_))
            ));
        }
    }
}
