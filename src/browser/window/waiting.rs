//! Element and document waits on top of the polling engine.

use std::future::Future;

use tracing::{debug, warn};

use crate::browser::Element;
use crate::browser::wait::{DocumentCondition, ElementCondition, Poll, WaitOptions, poll_until};
use crate::error::{Error, Result, WaitTimeout};
use crate::identifiers::Provenance;
use crate::locator::{IntoQuery, Query};
use crate::protocol::{Command, ReadyState};

use super::Window;

// ============================================================================
// Window - Waiting
// ============================================================================

impl Window {
    /// Polls for an element matching `query` until `condition` holds.
    ///
    /// Only `no such element` is retried. Any other failure, a stale
    /// reference included, ends the wait at once.
    ///
    /// # Errors
    ///
    /// [`Error::WaitTimeout`] with the compiled query and, when it can still
    /// be fetched, the page source.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let button = window
    ///     .wait_for_element(
    ///         By::id().equals("submit"),
    ///         ElementCondition::Enabled,
    ///         WaitOptions::default().with_timeout(Duration::from_secs(5)),
    ///     )
    ///     .await?;
    /// ```
    #[track_caller]
    pub fn wait_for_element(
        &self,
        query: impl IntoQuery,
        condition: ElementCondition,
        options: WaitOptions,
    ) -> impl Future<Output = Result<Element>> + Send {
        let context = Provenance::here();
        let query = query.into_query();
        async move {
            let query = query?;
            debug!(window = %self.handle(), %query, ?condition, timeout = ?options.timeout, "Waiting for element");

            let found = poll_until(options, || self.check_element(&query, condition, context)).await?;
            match found {
                Some(element) => Ok(element),
                None => Err(self
                    .timed_out(condition.describe(), Some(query), options, context)
                    .await),
            }
        }
    }

    /// Polls `document.readyState` until `condition` holds.
    #[track_caller]
    pub fn wait_for_document(
        &self,
        condition: DocumentCondition,
        options: WaitOptions,
    ) -> impl Future<Output = Result<()>> + Send {
        let context = Provenance::here();
        async move {
            debug!(window = %self.handle(), ?condition, timeout = ?options.timeout, "Waiting for document");

            let found = poll_until(options, || self.check_document(condition, context)).await?;
            match found {
                Some(()) => Ok(()),
                None => Err(self
                    .timed_out(condition.describe(), None, options, context)
                    .await),
            }
        }
    }
}

// ============================================================================
// Window - Conditions
// ============================================================================

impl Window {
    async fn check_element(
        &self,
        query: &Query,
        condition: ElementCondition,
        context: Provenance,
    ) -> Result<Poll<Element>> {
        let element = self.locate(query.clone(), context).await?;
        match condition {
            ElementCondition::Presence => Ok(Poll::Ready(element)),
            ElementCondition::Enabled => {
                if element.enabled_at(context).await? {
                    Ok(Poll::Ready(element))
                } else {
                    Ok(Poll::Pending)
                }
            }
        }
    }

    async fn check_document(
        &self,
        condition: DocumentCondition,
        context: Provenance,
    ) -> Result<Poll<()>> {
        let state = self.ready_state_at(context).await?;
        let ready = match condition {
            DocumentCondition::Ready => state == ReadyState::Complete,
            DocumentCondition::Interactive => state != ReadyState::Loading,
        };
        Ok(if ready { Poll::Ready(()) } else { Poll::Pending })
    }

    /// Builds the timeout error, attaching the page source when possible.
    async fn timed_out(
        &self,
        condition: &str,
        query: Option<Query>,
        options: WaitOptions,
        context: Provenance,
    ) -> Error {
        warn!(window = %self.handle(), condition, timeout = ?options.timeout, "Wait timed out");

        let snapshot = match self.act_as(Command::GetPageSource, context).await {
            Ok(source) => Some(source),
            Err(e) => {
                debug!(error = %e, "No page snapshot for wait timeout");
                None
            }
        };

        Error::wait_timeout(WaitTimeout {
            condition: condition.to_string(),
            duration: options.timeout,
            query,
            snapshot,
            context,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
