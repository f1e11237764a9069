//! Window position, size and state.

use std::future::Future;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::Provenance;
use crate::protocol::{Command, Rect};

use super::Window;

// ============================================================================
// Window - Geometry
// ============================================================================

impl Window {
    /// Returns the outer position and size of this window.
    pub async fn rect(&self) -> Result<Rect> {
        self.act_as(Command::GetWindowRect, Provenance::unavailable())
            .await
    }

    /// Moves and resizes this window. Returns the rect the window manager
    /// actually applied.
    #[track_caller]
    pub fn set_rect(&self, rect: Rect) -> impl Future<Output = Result<Rect>> + Send {
        let context = Provenance::here();
        async move {
            debug!(window = %self.handle(), ?rect, "Setting window rect");
            self.act_as(Command::SetWindowRect(rect), context).await
        }
    }

    #[track_caller]
    pub fn maximize(&self) -> impl Future<Output = Result<Rect>> + Send {
        self.act_as(Command::MaximizeWindow, Provenance::here())
    }

    #[track_caller]
    pub fn minimize(&self) -> impl Future<Output = Result<Rect>> + Send {
        self.act_as(Command::MinimizeWindow, Provenance::here())
    }

    #[track_caller]
    pub fn fullscreen(&self) -> impl Future<Output = Result<Rect>> + Send {
        self.act_as(Command::FullscreenWindow, Provenance::here())
    }
}
