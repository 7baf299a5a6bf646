//! WAV file reading and writing.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file I/O errors.
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file contains no audio channels.
    #[error("WAV file has no channels")]
    NoChannels,
}

/// Result alias for WAV operations.
pub type Result<T> = std::result::Result<T, WavError>;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(WavError::NoChannels);
    }
    let total_samples = reader.len() as u64; // total across all channels
    let num_frames = total_samples / u64::from(spec.channels);
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Deinterleaved stereo audio with its sample rate.
#[derive(Debug, Clone)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl StereoBuffer {
    /// Creates a silent buffer of the given length.
    pub fn silence(frames: usize, sample_rate: u32) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
            sample_rate,
        }
    }

    /// Number of sample frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True when the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Read a WAV file as stereo f32 samples.
///
/// Mono files are expanded by duplicating the channel; files with more
/// than two channels use only the first two. Integer samples are
/// normalized to \[-1.0, 1.0\].
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<StereoBuffer> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(WavError::NoChannels);
    }
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut left = Vec::with_capacity(frames);
    let mut right = Vec::with_capacity(frames);
    for frame in interleaved.chunks_exact(channels) {
        left.push(frame[0]);
        right.push(if channels > 1 { frame[1] } else { frame[0] });
    }

    Ok(StereoBuffer {
        left,
        right,
        sample_rate: spec.sample_rate,
    })
}

/// Write a stereo buffer as a 32-bit float WAV file.
pub fn write_wav_stereo<P: AsRef<Path>>(path: P, buffer: &StereoBuffer) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for (&l, &r) in buffer.left.iter().zip(&buffer.right) {
        writer.write_sample(l)?;
        writer.write_sample(r)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.wav");

        let buffer = StereoBuffer {
            left: vec![0.0, 0.5, -0.5, 1.0],
            right: vec![1.0, -1.0, 0.25, 0.0],
            sample_rate: 48000,
        };
        write_wav_stereo(&path, &buffer).unwrap();

        let read_back = read_wav_stereo(&path).unwrap();
        assert_eq!(read_back.sample_rate, 48000);
        assert_eq!(read_back.left, buffer.left);
        assert_eq!(read_back.right, buffer.right);
    }

    #[test]
    fn test_mono_expands_to_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for sample in [0.1f32, 0.2, 0.3] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = read_wav_stereo(&path).unwrap();
        assert_eq!(buffer.left, buffer.right);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_pcm_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pcm.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        writer.write_sample(i16::MAX).unwrap();
        writer.write_sample(i16::MIN).unwrap();
        writer.finalize().unwrap();

        let buffer = read_wav_stereo(&path).unwrap();
        assert!((buffer.left[0] - 1.0).abs() < 1e-3);
        assert!((buffer.right[0] + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_read_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.wav");
        write_wav_stereo(&path, &StereoBuffer::silence(4800, 48000)).unwrap();

        let info = read_wav_info(&path).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 48000);
        assert_eq!(info.num_frames, 4800);
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert!((info.duration_secs - 0.1).abs() < 1e-9);
    }
}
