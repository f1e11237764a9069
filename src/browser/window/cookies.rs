//! Cookies of the current document.

use std::future::Future;

use tracing::debug;

use crate::error::Result;
use crate::identifiers::Provenance;
use crate::protocol::{Command, Cookie};

use super::Window;

// ============================================================================
// Window - Cookies
// ============================================================================

impl Window {
    /// Returns every cookie visible to the document of this window.
    pub async fn cookies(&self) -> Result<Vec<Cookie>> {
        self.act_as(Command::GetAllCookies, Provenance::unavailable())
            .await
    }

    /// Returns the cookie called `name`.
    ///
    /// # Errors
    ///
    /// `no such cookie` when the document has no cookie of that name.
    #[track_caller]
    pub fn cookie(&self, name: impl Into<String>) -> impl Future<Output = Result<Cookie>> + Send {
        let context = Provenance::here();
        let name = name.into();
        async move {
            self.act_as(Command::GetNamedCookie { name }, context)
                .await
        }
    }

    /// Adds `cookie` to the document of this window.
    ///
    /// # Example
    ///
    /// ```ignore
    /// window
    ///     .add_cookie(Cookie::new("session", "abc123").with_http_only(true))
    ///     .await?;
    /// ```
    #[track_caller]
    pub fn add_cookie(&self, cookie: Cookie) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(window = %self.handle(), name = %cookie.name, "Adding cookie");
            self.act_unit(Command::AddCookie(cookie), context).await
        }
    }

    /// Deletes the cookie called `name`. Deleting a missing cookie succeeds.
    #[track_caller]
    pub fn delete_cookie(&self, name: impl Into<String>) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        let name = name.into();
        async move {
            debug!(window = %self.handle(), name = %name, "Deleting cookie");
            self.act_unit(Command::DeleteCookie { name }, context).await
        }
    }

    #[track_caller]
    pub fn delete_all_cookies(&self) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(window = %self.handle(), "Deleting all cookies");
            self.act_unit(Command::DeleteAllCookies, context).await
        }
    }
}
