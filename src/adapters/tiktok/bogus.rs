//! X-Bogus request signature.
//!
//! The web app appends `X-Bogus` to every API query string. The token binds
//! the exact query string, the request body, the user agent and a timestamp:
//! the server recomputes it, so the query sent on the wire must be byte-equal
//! to the one that was signed.
//!
//! Pipeline: RC4 over the user agent, MD5 digests of params/body/UA, a salt
//! block with an XOR checksum, RC4 again, then base64 with a shuffled
//! alphabet.

use std::time::{SystemTime, UNIX_EPOCH};

use data_encoding::{BASE64, Encoding, Specification};
use md5::{Digest, Md5};

use crate::domain::DomainError;

const SHIFTED_ALPHABET: &str = "Dkdpgh4ZKsQB80/Mfvw36XI1R25-WUAlEi7NLboqYTOPuzmFjJnryx9HVGcaStCe";

const UA_KEY: [u8; 3] = [0, 1, 14];
const OUTPUT_KEY: [u8; 1] = [255];
const OUTPUT_PREFIX: [u8; 2] = [0x02, 0xff];
const MAGIC: u32 = 536_919_696;

/// Signs query strings for one user agent. The UA digest is computed once.
#[derive(Debug, Clone)]
pub struct XBogusSigner {
    ua_digest: [u8; 16],
    output: Encoding,
}

impl XBogusSigner {
    pub fn new(user_agent: &str) -> Result<Self, DomainError> {
        let encrypted = rc4(&UA_KEY, user_agent.as_bytes());
        // Standard base64 with '=' padding; UA length need not be a multiple of 3.
        let encoded = BASE64.encode(&encrypted);
        Ok(Self {
            ua_digest: md5(encoded.as_bytes()),
            output: shifted_base64()?,
        })
    }

    /// Token for `params` (the form-urlencoded query string) and `body`.
    pub fn sign(&self, params: &str, body: &[u8], timestamp: u32) -> String {
        let params_digest = md5(&md5(params.as_bytes()));
        let body_digest = md5(&md5(body));

        let mut salt: Vec<u8> = vec![
            64,
            0,
            1,
            14,
            params_digest[14],
            params_digest[15],
            body_digest[14],
            body_digest[15],
            self.ua_digest[14],
            self.ua_digest[15],
        ];
        salt.extend_from_slice(&timestamp.to_be_bytes());
        salt.extend_from_slice(&MAGIC.to_be_bytes());

        let checksum = salt[1..].iter().fold(64u8, |acc, b| acc ^ b);
        salt.push(checksum);

        // The web client splits these 19 bytes into two halves and zips them
        // back together, which yields the same order; RC4 takes them as is.
        let mut payload = OUTPUT_PREFIX.to_vec();
        payload.extend(rc4(&OUTPUT_KEY, &salt));
        // 21 bytes, so no padding is ever needed.
        self.output.encode(&payload)
    }

    /// Same as [`sign`](Self::sign) with the current wall clock.
    pub fn sign_now(&self, params: &str, body: &[u8]) -> Result<String, DomainError> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| DomainError::Signing(format!("clock before unix epoch: {e}")))?
            .as_secs();
        let timestamp = u32::try_from(secs)
            .map_err(|_| DomainError::Signing(format!("timestamp {secs} does not fit 32 bits")))?;
        Ok(self.sign(params, body, timestamp))
    }
}

/// One-shot signature. Prefer [`XBogusSigner`] when signing repeatedly.
pub fn sign(
    params: &str,
    user_agent: &str,
    timestamp: u32,
    body: &[u8],
) -> Result<String, DomainError> {
    Ok(XBogusSigner::new(user_agent)?.sign(params, body, timestamp))
}

fn md5(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut state: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut j: u8 = 0;
    for i in 0..256 {
        j = j
            .wrapping_add(state[i])
            .wrapping_add(key[i % key.len()]);
        state.swap(i, usize::from(j));
    }

    let (mut i, mut j) = (0u8, 0u8);
    data.iter()
        .map(|byte| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(state[usize::from(i)]);
            state.swap(usize::from(i), usize::from(j));
            let k = state[usize::from(state[usize::from(i)].wrapping_add(state[usize::from(j)]))];
            byte ^ k
        })
        .collect()
}

/// Base64 over [`SHIFTED_ALPHABET`], unpadded.
fn shifted_base64() -> Result<Encoding, DomainError> {
    let mut spec = Specification::new();
    spec.symbols.push_str(SHIFTED_ALPHABET);
    spec.encoding().map_err(|e| DomainError::Signing(format!("invalid output alphabet: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";
    const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    #[test]
    fn test_known_signatures() {
        assert_eq!(
            sign("aid=1988&count=10&msToken=test_token", MAC_UA, 1_700_000_000, b"").unwrap(),
            "DFSzswVOhS2ANyy3tmWx-e9WX7rw"
        );
        assert_eq!(
            sign("", MAC_UA, 1_736_708_547, b"").unwrap(),
            "DFSzswVO0IJANyy3tppXPM9WX7nu"
        );
    }

    #[test]
    fn test_body_changes_signature() {
        let token = sign(
            "aid=1988&count=10&msToken=test_token",
            MAC_UA,
            1_700_000_000,
            b"digg=1",
        )
        .unwrap();
        assert_eq!(token, "DFSzswVOhS2jNLy3tmWx-e9WX7rt");
    }

    #[test]
    fn test_user_agent_length_not_multiple_of_three() {
        assert_eq!(LINUX_UA.len() % 3, 2);
        assert_eq!(
            sign("keyword=cats&count=12", LINUX_UA, 1_710_000_000, b"").unwrap(),
            "DFSzswVOu7iANnuatbipae9WX7nA"
        );
    }

    #[test]
    fn test_deterministic_and_shape() {
        let signer = XBogusSigner::new(MAC_UA).unwrap();
        let a = signer.sign("aid=1988", b"", 1_234_567_890);
        let b = signer.sign("aid=1988", b"", 1_234_567_890);
        assert_eq!(a, b);
        assert_eq!(a.len(), 28);
        assert!(a.chars().all(|c| SHIFTED_ALPHABET.contains(c)));
        assert_ne!(a, signer.sign("aid=1989", b"", 1_234_567_890));
        assert_ne!(a, signer.sign("aid=1988", b"", 1_234_567_891));
    }

    #[test]
    fn test_sign_now_succeeds() {
        let token = XBogusSigner::new(MAC_UA)
            .unwrap()
            .sign_now("aid=1988", b"")
            .unwrap();
        assert_eq!(token.len(), 28);
    }

    #[test]
    fn test_output_alphabet_positions() {
        let output = shifted_base64().unwrap();
        assert_eq!(output.encode(&[0, 0, 0]), "DDDD");
        assert_eq!(output.encode(&[0xff, 0xff, 0xff]), "eeee");
        // Sextets 1, 1, 1, 62.
        assert_eq!(output.encode(&[0x04, 0x10, 0x7e]), "kkkC");
    }

    #[test]
    fn test_rc4_reference_vector() {
        assert_eq!(
            rc4(b"Key", b"Plaintext"),
            vec![0xBB, 0xF3, 0x16, 0xE8, 0xD9, 0x40, 0xAF, 0x0A, 0xD3]
        );
    }
}
