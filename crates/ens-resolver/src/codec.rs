//! Call payload encoding and fixed-width result decoding
//!
//! Every call made here takes one `bytes32` argument, so a payload is the
//! 4-byte selector followed by the 32-byte node. Results are 32-byte words
//! with the value right-aligned, so decoding takes the trailing bytes.

use alloy_primitives::{hex, Address, Bytes, B256};

/// 4-byte function selector
pub type Selector = [u8; 4];

/// `resolver(bytes32)` on the registry
pub const RESOLVER_SELECTOR: Selector = [0x01, 0x78, 0xb8, 0xbf];
/// `addr(bytes32)` on a resolver
pub const ADDR_SELECTOR: Selector = [0x3b, 0x3b, 0x57, 0xde];
/// `ttl(bytes32)` on the registry
pub const TTL_SELECTOR: Selector = [0x16, 0xa2, 0x5c, 0xbd];

/// Concatenate a selector and its single 32-byte argument
pub fn encode_call(selector: Selector, argument: &B256) -> Bytes {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector);
    data.extend_from_slice(argument.as_slice());
    Bytes::from(data)
}

/// Last `width` bytes of a hex-encoded return value
///
/// Returns `None` when `raw` is not hex or holds fewer than `width` bytes.
pub fn decode_word(raw: &str, width: usize) -> Option<Vec<u8>> {
    let bytes = hex::decode(raw).ok()?;
    if bytes.len() < width {
        return None;
    }
    Some(bytes[bytes.len() - width..].to_vec())
}

/// Address held in the last 20 bytes of a return word
pub fn decode_address(raw: &str) -> Option<Address> {
    decode_word(raw, 20).map(|bytes| Address::from_slice(&bytes))
}

/// Big-endian integer held in the last 8 bytes of a return word
pub fn decode_u64(raw: &str) -> Option<u64> {
    let bytes: [u8; 8] = decode_word(raw, 8)?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}
