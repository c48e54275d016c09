//! WinZip AES (AE-2) entry encryption.
//!
//! Each entry gets its own key material, derived from the archive password
//! and a fresh random salt via PBKDF2-HMAC-SHA1 (1000 iterations). The
//! payload is encrypted with AES-CTR and authenticated with an HMAC-SHA1
//! trailer truncated to 10 bytes, per the public AE-2 convention.
//!
//! Key material is never persisted and never reused across entries.

use cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use sha1::Sha1;

use crate::profile::AesStrength;
use crate::{Error, Result};

type Aes128Ctr = ctr::Ctr128LE<aes::Aes128>;
type Aes192Ctr = ctr::Ctr128LE<aes::Aes192>;
type Aes256Ctr = ctr::Ctr128LE<aes::Aes256>;

type HmacSha1 = Hmac<Sha1>;

/// PBKDF2 iteration count fixed by the AE-2 scheme.
pub const PBKDF2_ITERATIONS: u32 = 1000;

/// Length of the truncated HMAC-SHA1 authentication trailer.
pub const AUTH_CODE_LEN: usize = 10;

/// Length of the derived password-verification value.
pub const VERIFIER_LEN: usize = 2;

/// Key material derived for one entry.
///
/// The 2-byte password verifier is part of the standard AE-2 derivation
/// split; the `.ate` payload layout has no slot for it, so it is derived
/// but not serialized.
pub struct KeyMaterial {
    cipher_key: Vec<u8>,
    mac_key: Vec<u8>,
    verifier: [u8; VERIFIER_LEN],
}

impl KeyMaterial {
    /// AES encryption key, `strength.key_len()` bytes.
    #[inline]
    pub fn cipher_key(&self) -> &[u8] {
        &self.cipher_key
    }

    /// HMAC key for the authentication trailer, `strength.key_len()` bytes.
    #[inline]
    pub fn mac_key(&self) -> &[u8] {
        &self.mac_key
    }

    /// Password verification value.
    #[inline]
    pub fn verifier(&self) -> [u8; VERIFIER_LEN] {
        self.verifier
    }
}

/// An encrypted entry payload, serialized as `salt ++ ciphertext ++ auth`.
pub struct EncryptedEntry {
    /// Per-entry random salt, `strength.salt_len()` bytes.
    pub salt: Vec<u8>,
    /// AES-CTR ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// HMAC-SHA1 over the ciphertext, truncated.
    pub auth_code: [u8; AUTH_CODE_LEN],
}

impl EncryptedEntry {
    /// Total serialized payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.salt.len() + self.ciphertext.len() + AUTH_CODE_LEN
    }

    /// Serialize the payload into `out`.
    pub fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.auth_code);
    }
}

/// Derive the per-entry key material from a password and salt.
///
/// Deterministic for a fixed `(password, salt)` pair. An empty password is
/// valid; PBKDF2 accepts zero-length input keys.
pub fn derive_key_material(password: &str, salt: &[u8], strength: AesStrength) -> KeyMaterial {
    let key_len = strength.key_len();
    let mut derived = vec![0u8; 2 * key_len + VERIFIER_LEN];
    pbkdf2::pbkdf2_hmac::<Sha1>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut derived);

    let mut verifier = [0u8; VERIFIER_LEN];
    verifier.copy_from_slice(&derived[2 * key_len..]);

    KeyMaterial {
        cipher_key: derived[..key_len].to_vec(),
        mac_key: derived[key_len..2 * key_len].to_vec(),
        verifier,
    }
}

/// Initial CTR counter block: the block counter starts at 1 and increments
/// little-endian, with no stored nonce. The per-entry salt is what makes
/// keystreams unique.
fn initial_counter_block() -> [u8; 16] {
    let mut block = [0u8; 16];
    block[0] = 1;
    block
}

/// Apply the AES-CTR keystream to `data` in place.
fn apply_keystream(strength: AesStrength, key: &[u8], data: &mut [u8]) -> Result<()> {
    let iv = initial_counter_block();
    match strength {
        AesStrength::Aes128 => Aes128Ctr::new_from_slices(key, &iv)
            .map_err(|_| Error::Cipher)?
            .apply_keystream(data),
        AesStrength::Aes192 => Aes192Ctr::new_from_slices(key, &iv)
            .map_err(|_| Error::Cipher)?
            .apply_keystream(data),
        AesStrength::Aes256 => Aes256Ctr::new_from_slices(key, &iv)
            .map_err(|_| Error::Cipher)?
            .apply_keystream(data),
    }
    Ok(())
}

/// Compute the truncated HMAC-SHA1 authentication trailer over `data`.
fn auth_code(mac_key: &[u8], data: &[u8]) -> Result<[u8; AUTH_CODE_LEN]> {
    let mut mac = HmacSha1::new_from_slice(mac_key).map_err(|_| Error::Cipher)?;
    mac.update(data);
    let digest = mac.finalize().into_bytes();

    let mut code = [0u8; AUTH_CODE_LEN];
    code.copy_from_slice(&digest[..AUTH_CODE_LEN]);
    Ok(code)
}

/// Encrypt one entry payload.
///
/// Generates a fresh salt from `rng`, derives key material, encrypts with
/// AES-CTR and authenticates the ciphertext. Any failure (RNG exhaustion,
/// primitive rejection) is fatal for the whole archive build.
pub fn encrypt_entry<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    password: &str,
    strength: AesStrength,
    rng: &mut R,
) -> Result<EncryptedEntry> {
    let mut salt = vec![0u8; strength.salt_len()];
    rng.try_fill_bytes(&mut salt)?;

    let keys = derive_key_material(password, &salt, strength);

    let mut ciphertext = plaintext.to_vec();
    apply_keystream(strength, keys.cipher_key(), &mut ciphertext)?;

    let auth_code = auth_code(keys.mac_key(), &ciphertext)?;

    Ok(EncryptedEntry {
        salt,
        ciphertext,
        auth_code,
    })
}
