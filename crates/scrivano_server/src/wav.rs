//! WAV container synthesis.
//!
//! Audio is stored as raw 16-bit PCM; the container header is attached only
//! at download time so storage stays format-agnostic.

const HEADER_SIZE: usize = 44;
const BITS_PER_SAMPLE: u16 = 16;

/// Wrap raw 16-bit PCM samples in a WAV (RIFF) container.
///
/// Produces a standard 44-byte header followed by the samples unchanged.
///
/// # Examples
///
/// ```
/// use scrivano_server::encode_wav;
///
/// let wav = encode_wav(&[0u8; 480], 24_000, 1);
/// assert_eq!(&wav[..4], b"RIFF");
/// assert_eq!(wav.len(), 44 + 480);
/// ```
pub fn encode_wav(pcm: &[u8], sample_rate: u32, channels: u16) -> Vec<u8> {
    let data_size = pcm.len() as u32;
    let file_size = HEADER_SIZE as u32 - 8 + data_size;
    let byte_rate = sample_rate * u32::from(channels) * u32::from(BITS_PER_SAMPLE) / 8;
    let block_align = channels * BITS_PER_SAMPLE / 8;

    let mut wav = Vec::with_capacity(HEADER_SIZE + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk: size 16, PCM format tag 1
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}
