//! Transparent always-on-top overlay surface.
//!
//! The surface is an actor: one dedicated thread owns the Win32 window and a
//! fixed-rate frame loop; external callers talk to it exclusively through
//! [`OverlaySurface`], which turns `show`/`update_data`/`hide` into message
//! sends with explicit startup and exit acknowledgement.
//!
//! Everything above the window layer ([`pixmap`], [`text`], [`layout`],
//! [`state`], [`render`]) is pure software and unit-tested; only
//! [`window`] touches the Win32 API.

use std::time::Duration;

pub mod assets;
pub mod layout;
pub mod pixmap;
pub mod render;
pub mod state;
pub mod surface;
pub mod text;
pub mod window;

pub use assets::OverlayAssets;
pub use surface::{OverlayCommand, OverlaySurface};

#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Failed to load overlay asset {path}: {reason}")]
    Asset { path: String, reason: String },

    #[error("Overlay loop did not confirm startup within {0:?}")]
    StartupTimeout(Duration),

    #[error("Overlay loop did not stop within {0:?}; window resources may be leaked")]
    StopTimeout(Duration),

    #[error("Overlay loop is gone; command channel closed")]
    ChannelClosed,
}

pub type OverlayResult<T> = Result<T, OverlayError>;
