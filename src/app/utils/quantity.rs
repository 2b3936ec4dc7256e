use crate::app::chain::error::{ChainError, ChainResult};
use alloy_primitives::U256;

/// 0x-prefixed hex encoding used for JSON-RPC quantities.
pub fn encode_u64(value: u64) -> String {
    format!("{:#x}", value)
}

pub fn encode_u256(value: U256) -> String {
    format!("{:#x}", value)
}

pub fn parse_u64(text: &str) -> ChainResult<u64> {
    let digits = text.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16).map_err(|e| ChainError::CallFailed {
        code: None,
        message: format!("invalid quantity {:?}: {}", text, e),
    })
}

pub fn parse_u256(text: &str) -> ChainResult<U256> {
    let digits = text.trim().trim_start_matches("0x");
    U256::from_str_radix(digits, 16).map_err(|e| ChainError::CallFailed {
        code: None,
        message: format!("invalid quantity {:?}: {}", text, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u64_round_trip() {
        assert_eq!(encode_u64(0), "0x0");
        assert_eq!(encode_u64(1313161894), "0x4e4542a6");
        assert_eq!(parse_u64("0x4e4542a6").unwrap(), 1313161894);
        assert_eq!(parse_u64("0x0").unwrap(), 0);
    }

    #[test]
    fn u256_round_trip() {
        let gas_price = U256::from(1_000_000_000u64);
        assert_eq!(parse_u256(&encode_u256(gas_price)).unwrap(), gas_price);
    }

    #[test]
    fn rejects_non_hex_input() {
        assert!(parse_u64("not-hex").is_err());
        assert!(parse_u64("").is_err());
        assert!(parse_u256("0xzz").is_err());
    }
}
