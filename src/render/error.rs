// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

pub type ComposeResult<T> = Result<T, ComposeError>;

/// Reasons the compositor refuses or fails to produce a result.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    #[error("no picture loaded")]
    NotReady,

    #[error("frame has no area")]
    EmptyFrame,

    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_stable() {
        assert_eq!(ComposeError::NotReady.to_string(), "no picture loaded");
        assert_eq!(ComposeError::EmptyFrame.to_string(), "frame has no area");
    }

    #[test]
    fn encode_preserves_source() {
        let base = image::ImageError::IoError(std::io::Error::other("disk full"));
        let err = ComposeError::from(base);
        assert!(err.to_string().contains("disk full"));
    }
}
