//! Decoder configuration.
//!
//! The defaults are strict: every fixed header field is checked and a
//! section the decoder does not understand aborts the decode. Loosen them
//! when dealing with homebrew or tool-generated files that cut corners.
//!
//! ```
//! use nitrokit::config::{DecodeOptions, UnknownSectionPolicy};
//!
//! let opts = DecodeOptions::default()
//!     .strict_header(false)
//!     .unknown_sections(UnknownSectionPolicy::Skip);
//! assert!(!opts.is_strict_header());
//! ```

/// What a format decoder does with a section magic it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSectionPolicy {
    /// Fail with [`crate::Error::UnknownSection`].
    #[default]
    Reject,
    /// Log a warning and ignore the section.
    Skip,
}

/// Options shared by the section splitter and the format decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    strict_header: bool,
    unknown_sections: UnknownSectionPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_header: true,
            unknown_sections: UnknownSectionPolicy::Reject,
        }
    }
}

impl DecodeOptions {
    /// Check BOM, version, header size, and declared file size.
    pub fn strict_header(mut self, strict: bool) -> Self {
        self.strict_header = strict;
        self
    }

    /// Set the policy for unrecognized section magics.
    pub fn unknown_sections(mut self, policy: UnknownSectionPolicy) -> Self {
        self.unknown_sections = policy;
        self
    }

    pub fn is_strict_header(&self) -> bool {
        self.strict_header
    }

    pub fn unknown_section_policy(&self) -> UnknownSectionPolicy {
        self.unknown_sections
    }
}
