//! WAV I/O and offline rendering for the bitrot engines.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`] for
//!   loading/saving stereo material
//! - **Offline rendering**: [`BlockRenderer`] drives one engine over a whole
//!   buffer in fixed-size blocks, the way a plugin host would
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bitrot_io::{BlockRenderer, read_wav_stereo, write_wav_stereo};
//! use bitrot_registry::EffectRegistry;
//!
//! # fn main() -> bitrot_io::Result<()> {
//! let (samples, spec) = read_wav_stereo("input.wav")?;
//!
//! let registry = EffectRegistry::new();
//! let mut renderer =
//!     BlockRenderer::from_registry(&registry, "repeat", spec.sample_rate as f32, 512)?;
//! renderer.set_param("active", 1.0)?;
//! renderer.set_param_text("division", "8")?;
//! let processed = renderer.render(&samples);
//!
//! write_wav_stereo("output.wav", &processed, spec)?;
//! # Ok(())
//! # }
//! ```

mod renderer;
mod wav;

pub use renderer::BlockRenderer;
pub use wav::{StereoSamples, WavSpec, read_wav_stereo, write_wav_stereo};

/// Error types for file I/O and engine setup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No engine is registered under this id.
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// The engine has no parameter with this name or symbol.
    #[error("Unknown parameter: {0}")]
    UnknownParam(String),

    /// The text could not be parsed as a value for the parameter.
    #[error("Invalid value '{value}' for parameter '{param}'")]
    InvalidValue {
        /// Parameter name or symbol as given.
        param: String,
        /// Offending text.
        value: String,
    },

    /// Only 16- and 24-bit integer and 32-bit float output are written.
    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
