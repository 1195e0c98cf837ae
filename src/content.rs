//! Content decoding for file entries.
//!
//! Ignition embeds file bodies as RFC 2397 data URLs
//! (`data:[<mediatype>][;base64],<payload>`).  The engine only ever sees the
//! [`ContentDecoder`] trait, so another decoder can be injected by embedders.
use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::percent_decode_str;

use crate::error::ContentError;

/// Standard alphabet, accepting payloads with or without `=` padding.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Turns an encoded content source into the raw bytes to write.
pub trait ContentDecoder: Send + Sync + std::fmt::Debug {
    /// Decode `source` into bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the source is malformed or uses a
    /// scheme the decoder does not handle.
    fn decode(&self, source: &str) -> Result<Vec<u8>, ContentError>;
}

/// Decoder for inline `data:` URLs.
///
/// # Examples
///
/// ```
/// use ignition_apply::content::{ContentDecoder, DataUrlDecoder};
///
/// let bytes = DataUrlDecoder.decode("data:,hello%20world").unwrap();
/// assert_eq!(bytes, b"hello world");
///
/// let bytes = DataUrlDecoder.decode("data:text/plain;base64,aGk=").unwrap();
/// assert_eq!(bytes, b"hi");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlDecoder;

impl ContentDecoder for DataUrlDecoder {
    fn decode(&self, source: &str) -> Result<Vec<u8>, ContentError> {
        let Some(rest) = strip_data_scheme(source) else {
            let scheme = source.split_once(':').map_or(source, |(scheme, _)| scheme);
            return Err(ContentError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        };

        let (header, payload) = rest.split_once(',').ok_or(ContentError::MissingPayload)?;
        let raw: Vec<u8> = percent_decode_str(payload).collect();

        if is_base64(header) {
            let compact: Vec<u8> = raw
                .into_iter()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            Ok(BASE64.decode(compact)?)
        } else {
            Ok(raw)
        }
    }
}

/// Return the part after `data:` if `source` uses the data scheme.
fn strip_data_scheme(source: &str) -> Option<&str> {
    let (scheme, rest) = source.split_once(':')?;
    scheme.eq_ignore_ascii_case("data").then_some(rest)
}

/// The payload is base64 when the final header parameter is `base64`.
fn is_base64(header: &str) -> bool {
    header
        .rsplit_once(';')
        .is_some_and(|(_, param)| param.trim().eq_ignore_ascii_case("base64"))
}
