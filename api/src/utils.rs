use bytemuck::Pod;
use solana_program::hash::hash;

use crate::error::ApiError;

/// Anchor discriminator: first 8 bytes of `sha256("{namespace}:{name}")`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let preimage = format!("{}:{}", namespace, name);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    bytes
}

/// Discriminator of a global anchor instruction.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator("global", name)
}

/// An anchor-owned account whose leading fields are mapped by a Pod layout.
///
/// Only the prefix covered by `Self` is read, trailing data is ignored.
pub trait AnchorAccount: Pod {
    const NAME: &'static str;

    fn discriminator() -> [u8; 8] {
        discriminator("account", Self::NAME)
    }

    fn try_from_bytes(data: &[u8]) -> Result<&Self, ApiError> {
        let len = 8 + std::mem::size_of::<Self>();
        if data.len() < len {
            return Err(ApiError::AccountDataTooSmall {
                expected: len,
                found: data.len(),
            });
        }
        if data[..8].ne(&Self::discriminator()) {
            return Err(ApiError::InvalidDiscriminator);
        }
        Ok(bytemuck::from_bytes(&data[8..len]))
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut data = Self::discriminator().to_vec();
        data.extend_from_slice(bytemuck::bytes_of(self));
        data
    }
}
