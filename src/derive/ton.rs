//! TON address deriver
//!
//! The account id is the representation hash of the wallet contract's
//! `StateInit` cell, computed with TON's cell serialization (descriptor
//! bytes, bit padding, child depths and hashes), not an ad hoc digest.
//! We instantiate wallet v3r2: its code fits in a single reference-free
//! cell, so the whole state-init hash is self-contained. The textual form
//! is base64url over `tag || workchain || hash || crc16`.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use lazy_static::lazy_static;
use zeroize::Zeroizing;

use crate::crypto::sha256;
use crate::error::{CoreError, CoreResult};
use crate::hd::Slip10Node;
use crate::path::DerivationPath;
use crate::types::{Chain, DerivedAddress};

/// Workchain ids
pub const BASE_WORKCHAIN: i8 = 0;
pub const MASTER_WORKCHAIN: i8 = -1;

/// Wallet id baked into the v3r2 data cell (mainnet default)
const WALLET_ID: u32 = 698_983_191;

/// Address tag bytes: bit 0x40 marks non-bounceable, 0x80 testnet-only
const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TESTNET: u8 = 0x80;

lazy_static! {
    /// Wallet v3r2 contract code: a single cell, 111 bytes, no references
    static ref WALLET_V3R2_CODE: Vec<u8> = hex::decode(
        "ff0020dd2082014c97ba218201339cbab19f71b0ed44d0d31fd31f31d70bffe3\
         04e0a4f2608308d71820d31fd31fd31ff82313bbf263ed44d0d31fd31fd3ffd1\
         5132baf2a15144baf2a204f901541055f910f2a3f8009320d74a96d307d402fb\
         00e8d101a4c8cb1fcb1fcbffc9ed54"
    )
    .expect("static wallet code hex must decode");
}

// =============================================================================
// Cell representation hashing
// =============================================================================

/// Ordinary TON cell: up to 1023 data bits and 4 references
struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl Cell {
    fn new(data: Vec<u8>, bit_len: usize, refs: Vec<Cell>) -> Self {
        Self { data, bit_len, refs }
    }

    fn depth(&self) -> u16 {
        self.refs
            .iter()
            .map(|r| r.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Standard representation hash: SHA-256 over descriptor bytes, padded
    /// data, then each child's depth and hash
    fn repr_hash(&self) -> [u8; 32] {
        let d1 = self.refs.len() as u8;
        let d2 = ((self.bit_len / 8) + (self.bit_len + 7) / 8) as u8;

        let mut repr = Vec::with_capacity(2 + self.data.len() + self.refs.len() * 34);
        repr.push(d1);
        repr.push(d2);

        let full_bytes = self.bit_len / 8;
        let partial_bits = self.bit_len % 8;
        repr.extend_from_slice(&self.data[..full_bytes]);
        if partial_bits != 0 {
            // Completion tag: a single 1 bit after the payload bits
            let mut last = self.data[full_bytes];
            last &= !(0xFFu8 >> partial_bits);
            last |= 1 << (7 - partial_bits);
            repr.push(last);
        }

        for child in &self.refs {
            repr.extend_from_slice(&child.depth().to_be_bytes());
        }
        for child in &self.refs {
            repr.extend_from_slice(&child.repr_hash());
        }

        sha256(&repr)
    }
}

/// StateInit for wallet v3r2: no split depth, not special, code + data
/// references, empty library dict
fn wallet_v3r2_state_init(public_key: &[u8; 32]) -> Cell {
    let code = Cell::new(WALLET_V3R2_CODE.clone(), WALLET_V3R2_CODE.len() * 8, vec![]);

    // Data cell: seqno(32) = 0 || wallet_id(32) || public_key(256)
    let mut data = Vec::with_capacity(40);
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&WALLET_ID.to_be_bytes());
    data.extend_from_slice(public_key);
    let data = Cell::new(data, 320, vec![]);

    // Maybe bits: split_depth=0, special=0, code=1, data=1, library=0
    Cell::new(vec![0b0011_0000], 5, vec![code, data])
}

// =============================================================================
// Address type
// =============================================================================

/// Parsed TON address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TonAddress {
    pub workchain: i8,
    pub hash: [u8; 32],
    pub bounceable: bool,
    pub testnet: bool,
}

impl TonAddress {
    pub fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self {
            workchain,
            hash,
            bounceable: false,
            testnet: false,
        }
    }

    /// Account id for a wallet v3r2 owned by this public key
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        Self::new(BASE_WORKCHAIN, wallet_v3r2_state_init(public_key).repr_hash())
    }

    /// User-friendly form: base64url(tag || workchain || hash || crc16)
    pub fn to_user_friendly(&self) -> String {
        let mut data = Vec::with_capacity(36);
        let tag = if self.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        } | if self.testnet { TAG_TESTNET } else { 0 };
        data.push(tag);
        data.push(self.workchain as u8);
        data.extend_from_slice(&self.hash);

        let crc = crc16_ccitt(&data);
        data.extend_from_slice(&crc.to_be_bytes());

        URL_SAFE_NO_PAD.encode(data)
    }

    /// Raw form: `workchain:hex_hash`
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Parse the 48-character user-friendly form, verifying the CRC16
    pub fn from_user_friendly(s: &str) -> CoreResult<Self> {
        if s.len() != 48 {
            return Err(CoreError::invalid_input(format!(
                "Invalid TON address length: expected 48, got {}",
                s.len()
            )));
        }

        let bytes = if s.contains('-') || s.contains('_') {
            URL_SAFE_NO_PAD.decode(s)
        } else {
            STANDARD_NO_PAD.decode(s)
        }
        .map_err(|e| CoreError::invalid_input(format!("Base64 decode error: {}", e)))?;

        if bytes.len() != 36 {
            return Err(CoreError::invalid_input("Invalid decoded address length"));
        }

        let crc = u16::from_be_bytes([bytes[34], bytes[35]]);
        if crc != crc16_ccitt(&bytes[..34]) {
            return Err(CoreError::invalid_input("Invalid TON address checksum"));
        }

        let tag = bytes[0];
        let workchain = bytes[1] as i8;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);

        Ok(Self {
            workchain,
            hash,
            bounceable: tag & 0x40 == 0,
            testnet: tag & TAG_TESTNET != 0,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.workchain == BASE_WORKCHAIN || self.workchain == MASTER_WORKCHAIN
    }
}

/// CRC16-CCITT (XModem polynomial), as used by TON addresses
fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

// =============================================================================
// Deriver entry point
// =============================================================================

pub fn derive(
    chain: Chain,
    node: &Slip10Node,
    path: &DerivationPath,
) -> CoreResult<DerivedAddress> {
    let public_key = node.public_key();
    let address = TonAddress::from_public_key(&public_key);

    Ok(DerivedAddress {
        chain,
        address: address.to_user_friendly(),
        public_key: public_key.to_vec(),
        private_key: Zeroizing::new(node.private_key_bytes().to_vec()),
        path: path.to_string(),
    })
}
