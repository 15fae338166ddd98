// Copyright 2022 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

use std::{borrow::Cow, fmt::Debug, iter::Iterator};

use ::log::debug;

use crate::LogItem;

/// A `StatusTracker` is used in the timestamp resolution logic to control
/// error-handling behavior and to aggregate log messages as they are
/// generated.
///
/// Every recoverable condition (a skipped certificate, an unparseable token,
/// an unrecognized archive coverage indicator, ...) is recorded here, so a
/// validation report can flag reduced confidence without refusing to produce
/// a result.
#[derive(Debug, Default)]
pub struct StatusTracker {
    error_behavior: ErrorBehavior,
    logged_items: Vec<LogItem>,
    signature_ids: Vec<String>,
}

impl StatusTracker {
    /// Returns a [`StatusTracker`] with the specified [`ErrorBehavior`].
    pub fn with_error_behavior(error_behavior: ErrorBehavior) -> Self {
        Self {
            error_behavior,
            logged_items: vec![],
            signature_ids: vec![],
        }
    }

    /// Returns the configured [`ErrorBehavior`].
    pub fn error_behavior(&self) -> ErrorBehavior {
        self.error_behavior
    }

    /// Returns the current list of validation log items.
    pub fn logged_items(&self) -> &[LogItem] {
        &self.logged_items
    }

    /// Appends the contents of another [`StatusTracker`] to this list of
    /// validation log items.
    pub fn append(&mut self, other: &StatusTracker) {
        self.logged_items
            .extend(other.logged_items().iter().cloned());
    }

    /// Adds a non-error [`LogItem`] to this status tracker.
    ///
    /// Primarily intended for use by [`LogItem::success()`]
    /// or [`LogItem::informational()`].
    pub fn add_non_error(&mut self, log_item: LogItem) {
        let log_item = self.tag(log_item);
        debug!("Validation info: {log_item:?}");
        self.logged_items.push(log_item);
    }

    /// Adds an error-case [`LogItem`] to this status tracker.
    ///
    /// Will return `Err(err)` if configured to stop immediately on errors or
    /// `Ok(err)` if configured to continue on errors. _(See
    /// [`ErrorBehavior`].)_
    ///
    /// Primarily intended for use by [`LogItem::failure()`].
    pub fn add_error<E>(&mut self, log_item: LogItem, err: E) -> Result<E, E> {
        let log_item = self.tag(log_item);
        self.logged_items.push(log_item);

        match self.error_behavior {
            ErrorBehavior::StopOnFirstError => Err(err),
            ErrorBehavior::ContinueWhenPossible => Ok(err),
        }
    }

    fn tag(&self, mut log_item: LogItem) -> LogItem {
        if log_item.signature_id.is_none() {
            if let Some(signature_id) = self.signature_ids.last() {
                log_item.signature_id = Some(Cow::Owned(signature_id.clone()));
            }
        }
        log_item
    }

    /// Returns the [`LogItem`]s that have error conditions (`err_val` is
    /// populated).
    pub fn filter_errors(&self) -> impl Iterator<Item = &LogItem> {
        self.logged_items()
            .iter()
            .filter(|item| item.err_val.is_some())
    }

    /// Returns `true` if the validation log contains a specific validation
    /// status code.
    pub fn has_status(&self, val: &str) -> bool {
        self.logged_items().iter().any(|vi| {
            if let Some(vs) = &vi.validation_status {
                vs == val
            } else {
                false
            }
        })
    }

    /// Returns `true` if the validation log contains a specific error.
    pub fn has_error<E: Debug>(&self, err: E) -> bool {
        let err_type = format!("{:?}", &err);
        self.logged_items().iter().any(|vi| {
            if let Some(e) = &vi.err_val {
                e == &err_type
            } else {
                false
            }
        })
    }

    /// Returns `true` if the validation log contains any error.
    pub fn has_any_error(&self) -> bool {
        self.filter_errors().next().is_some()
    }

    /// Keeps track of the signature currently being resolved.
    ///
    /// Counter signatures are resolved recursively; the innermost identifier
    /// is attached to every log item created until it is popped again.
    pub fn push_signature_id<S: Into<String>>(&mut self, id: S) {
        self.signature_ids.push(id.into());
    }

    /// Removes the current signature identifier, if any.
    pub fn pop_signature_id(&mut self) -> Option<String> {
        self.signature_ids.pop()
    }

    /// Returns the current signature identifier, if any.
    pub fn signature_id(&self) -> Option<&str> {
        self.signature_ids.last().map(|s| s.as_str())
    }
}

/// `ErrorBehavior` configures the behavior of [`StatusTracker`] when its
/// [`add_error`] function is called.
///
/// [`add_error`]: StatusTracker::add_error
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ErrorBehavior {
    /// If an error is encountered, stop resolution immediately.
    StopOnFirstError,

    /// If an error is encountered, log it and continue resolution as much as
    /// possible.
    #[default]
    ContinueWhenPossible,
}
