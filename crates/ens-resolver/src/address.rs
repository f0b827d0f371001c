use alloy_primitives::{hex, Address};

/// Parse a `0x`-prefixed, 40 hex digit address literal in any letter case
pub fn parse_address_literal(value: &str) -> Option<Address> {
    let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex::decode(digits).ok()?;
    Some(Address::from_slice(&bytes))
}

/// EIP-55 mixed-case encoding of an address
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}
