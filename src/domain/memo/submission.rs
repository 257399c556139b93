//! Audio submission value object

use std::fmt;

use crate::domain::error::UnsupportedFormatError;

/// Audio formats accepted at upload time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    M4a,
    Mp3,
    Wav,
    Aac,
    Ogg,
}

impl AudioFormat {
    /// Get the MIME type string
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::M4a => "audio/mp4",
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Aac => "audio/aac",
            Self::Ogg => "audio/ogg",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::M4a => "m4a",
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Aac => "aac",
            Self::Ogg => "ogg",
        }
    }

    /// Parse from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "m4a" => Some(Self::M4a),
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "aac" => Some(Self::Aac),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// Parse from a filename's extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (stem, ext) = filename.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Self::from_extension(ext)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Value object representing one uploaded voice memo.
/// Owned by the current submission and dropped when it completes.
#[derive(Debug, Clone)]
pub struct AudioSubmission {
    bytes: Vec<u8>,
    filename: String,
    format: AudioFormat,
}

impl AudioSubmission {
    /// Create a submission, deriving the format from the filename extension
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Result<Self, UnsupportedFormatError> {
        let filename = filename.into();
        let format =
            AudioFormat::from_filename(&filename).ok_or_else(|| UnsupportedFormatError {
                filename: filename.clone(),
            })?;

        Ok(Self {
            bytes,
            filename,
            format,
        })
    }

    /// Get the raw audio bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the original filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the declared format
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the upload carried no data
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
