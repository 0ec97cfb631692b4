//! Base64 coding of attachment contents
//!
//! Mandrill expects attachment contents as standard base64 with padding and
//! without line breaks.

pub use base64::DecodeError;

/// Encode binary data to base64 text
#[inline]
pub fn encode<T: AsRef<[u8]>>(input: T) -> String {
    base64::encode(input.as_ref())
}

/// Decode base64 text back to binary data
#[inline]
pub fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>, DecodeError> {
    base64::decode(input.as_ref())
}

#[cfg(test)]
mod test {
    use super::{decode, encode};

    #[test]
    fn encode_text() {
        assert_eq!(encode("FILE_CONTENTS"), "RklMRV9DT05URU5UUw==");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode(""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn binary_round_trip() {
        let data: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
        let text = encode(&data);

        assert!(!text.contains('\n'));
        assert_eq!(decode(&text).unwrap(), data);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("not base64!").is_err());
    }
}
