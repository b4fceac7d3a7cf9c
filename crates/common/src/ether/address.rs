//! Address validation, applied to user input before it reaches the multicall core.

use alloy::primitives::Address;

use crate::{
    constants::{ADDRESS_REGEX, MIXED_CASE_REGEX},
    error::Error,
};

/// Parse and validate an address string.
///
/// All-lowercase and all-uppercase addresses are accepted as-is. A mixed-case address must carry a
/// valid EIP-55 checksum.
///
/// ```
/// use batchcall_common::ether::address::checksum;
///
/// let address = checksum("0x1f98415757620b543a52e61c46b32eb19261f984").expect("valid address");
/// assert_eq!(address.to_checksum(None), "0x1F98415757620B543A52E61c46B32eB19261F984");
/// ```
pub fn checksum(value: &str) -> Result<Address, Error> {
    let value = value.trim();
    if !ADDRESS_REGEX.is_match(value).unwrap_or(false) {
        return Err(Error::InvalidAddress(value.to_string()));
    }

    if MIXED_CASE_REGEX.is_match(&value[2..]).unwrap_or(false) {
        Address::parse_checksummed(value, None)
            .map_err(|_| Error::InvalidAddress(value.to_string()))
    } else {
        value.parse::<Address>().map_err(|_| Error::InvalidAddress(value.to_string()))
    }
}

/// Like [`checksum`], but also rejects the zero address, which can never hold contract code.
pub fn contract_address(value: &str) -> Result<Address, Error> {
    let address = checksum(value)?;
    if address.is_zero() {
        return Err(Error::InvalidAddress(value.to_string()));
    }

    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_lowercase() {
        let address = checksum("0xc2132d05d31c914a87c6611c10748aeb04b58e8f")
            .expect("lowercase address should parse");
        assert_eq!(address.to_checksum(None), "0xc2132D05D31c914a87C6611C10748AEb04B58e8F");
    }

    #[test]
    fn test_checksum_valid_mixed_case() {
        assert!(checksum("0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063").is_ok());
        assert!(checksum("0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270").is_ok());
    }

    #[test]
    fn test_checksum_invalid_mixed_case() {
        // same address as above with a single letter's case flipped
        let result = checksum("0x8F3Cf7ad23Cd3CaDbD9735AFf958023239c6A063");
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn test_checksum_uppercase() {
        assert!(checksum("0x1F98415757620B543A52E61C46B32EB19261F984").is_ok());
    }

    #[test]
    fn test_checksum_malformed() {
        assert!(checksum("").is_err());
        assert!(checksum("0x1234").is_err());
        assert!(checksum("1f98415757620b543a52e61c46b32eb19261f984").is_err());
        assert!(checksum("0xzz98415757620b543a52e61c46b32eb19261f984").is_err());
    }

    #[test]
    fn test_contract_address_rejects_zero() {
        assert!(checksum("0x0000000000000000000000000000000000000000").is_ok());
        assert!(contract_address("0x0000000000000000000000000000000000000000").is_err());
        assert!(contract_address("0x1F98415757620B543A52E61c46B32eB19261F984").is_ok());
    }
}
