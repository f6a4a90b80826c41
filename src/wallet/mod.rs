//! Wallet module - key management and challenge signing

mod wallet;

pub use wallet::*;

use crate::constants::ADDRESS_PREFIX;

/// Decode a registry address back to its 20-byte key hash
/// Address format: "ST" + Base58(key_hash[0:20] + checksum[0:4])
pub fn decode_address(address: &str) -> Result<[u8; 20], WalletError> {
    let encoded = address
        .strip_prefix(ADDRESS_PREFIX)
        .ok_or_else(|| WalletError::InvalidAddress("invalid prefix".to_string()))?;

    let decoded = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| WalletError::InvalidAddress("invalid base58 encoding".to_string()))?;

    if decoded.len() != 24 {
        return Err(WalletError::InvalidAddress("invalid length".to_string()));
    }

    let (addr_bytes, checksum) = decoded.split_at(20);

    let expected_checksum = crate::crypto::double_hash(addr_bytes);
    if checksum != &expected_checksum.0[0..4] {
        return Err(WalletError::InvalidAddress("invalid checksum".to_string()));
    }

    let mut key_hash = [0u8; 20];
    key_hash.copy_from_slice(addr_bytes);
    Ok(key_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rejects_bad_addresses() {
        assert!(decode_address("XX1111").is_err());
        assert!(decode_address("ST0OIl").is_err());
        assert!(decode_address("ST1111").is_err());

        let valid = KeyPair::generate().address;
        let mut chars: Vec<char> = valid.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '2' { '3' } else { '2' };
        let corrupted: String = chars.into_iter().collect();
        assert!(decode_address(&corrupted).is_err());
    }
}
