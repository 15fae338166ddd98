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

use std::{borrow::Cow, fmt::Debug};

use crate::StatusTracker;

/// Detailed information about a skipped evidence item, an error, or other
/// noteworthy condition observed while resolving a signature.
///
/// Use the [`log_item`](crate::log_item) macro to create a `LogItem`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogItem {
    /// Kind of log item.
    pub kind: LogKind,

    /// Name of the signature property (if available), or other descriptive
    /// label.
    pub label: Cow<'static, str>,

    /// Description of the condition
    pub description: Cow<'static, str>,

    /// Crate where the condition was detected
    pub crate_name: Cow<'static, str>,

    /// Source file where the condition was detected
    pub file: Cow<'static, str>,

    /// Function where the condition was detected
    pub function: Cow<'static, str>,

    /// Source line number where the condition was detected
    pub line: u32,

    /// Error code as string
    pub err_val: Option<Cow<'static, str>>,

    /// Validation status code (see [`validation_codes`])
    ///
    /// [`validation_codes`]: crate::validation_codes
    pub validation_status: Option<Cow<'static, str>>,

    /// Identifier of the (counter) signature being resolved when this item
    /// was logged.
    pub signature_id: Option<Cow<'static, str>>,
}

impl Default for LogItem {
    fn default() -> Self {
        LogItem {
            kind: LogKind::Success,
            label: Cow::Borrowed(""),
            description: Cow::Borrowed(""),
            crate_name: env!("CARGO_PKG_NAME").into(),
            file: Cow::Borrowed(""),
            function: Cow::Borrowed(""),
            line: 0,
            err_val: None,
            validation_status: None,
            signature_id: None,
        }
    }
}

impl LogItem {
    /// Add a validation status code.
    ///
    /// ## Example
    ///
    /// ```
    /// # use std::borrow::Cow;
    /// # use ades_status_tracker::{log_item, LogItem, LogKind};
    /// let log = log_item!("arcTst", "archive time-stamp", "test func")
    ///     .validation_status("timeStamp.token.malformed");
    ///
    /// assert_eq!(
    ///     log.validation_status,
    ///     Some(Cow::Borrowed("timeStamp.token.malformed"))
    /// );
    /// assert_eq!(log.kind, LogKind::Informational);
    /// ```
    #[must_use]
    pub fn validation_status(self, status: &'static str) -> Self {
        LogItem {
            validation_status: Some(status.into()),
            ..self
        }
    }

    /// Set the log item kind to [`LogKind::Success`] and add it to the
    /// [`StatusTracker`].
    pub fn success(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Success;
        tracker.add_non_error(self);
    }

    /// Set the log item kind to [`LogKind::Informational`] and add it to the
    /// [`StatusTracker`].
    pub fn informational(mut self, tracker: &mut StatusTracker) {
        self.kind = LogKind::Informational;
        tracker.add_non_error(self);
    }

    /// Set the log item kind to [`LogKind::Failure`] and add it to the
    /// [`StatusTracker`].
    ///
    /// If the tracker is configured to stop on the first error, this function
    /// will return `Err(err)`. Otherwise it returns `Ok(err)` so the caller
    /// can keep the error value regardless of [`ErrorBehavior`].
    ///
    /// [`ErrorBehavior`]: crate::ErrorBehavior
    pub fn failure<E: Debug>(mut self, tracker: &mut StatusTracker, err: E) -> Result<E, E> {
        self.kind = LogKind::Failure;
        self.err_val = Some(format!("{err:?}").into());
        tracker.add_error(self, err)
    }

    /// Set the log item kind to [`LogKind::Failure`] and add it to the
    /// [`StatusTracker`].
    ///
    /// Does not return a [`Result`] and thus ignores the [`StatusTracker`]
    /// error-handling configuration.
    pub fn failure_no_throw<E: Debug>(mut self, tracker: &mut StatusTracker, err: E) {
        self.kind = LogKind::Failure;
        self.err_val = Some(format!("{err:?}").into());
        tracker.add_non_error(self);
    }
}

/// Descriptive nature of this [`LogItem`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogKind {
    /// This [`LogItem`] describes a success condition.
    Success,

    /// This [`LogItem`] describes an informational condition.
    Informational,

    /// This [`LogItem`] describes a failure or error condition.
    Failure,
}

/// Creates a [`LogItem`] struct that is annotated with the source file and line
/// number where the log condition was discovered.
///
/// Takes three parameters, each of which may be a `&'static str` or `String`:
///
/// * `label`: name of object this `LogItem` references (typically the header
///   name of a signature property)
/// * `description`: human-readable reason for this `LogItem` to have been
///   generated
/// * `function`: name of the function generating this `LogItem`
///
/// ## Example
///
/// ```
/// # use std::borrow::Cow;
/// # use ades_status_tracker::{log_item, LogItem, LogKind};
/// let log = log_item!("sigTst", "signature time-stamp", "test func");
///
/// assert_eq!(
///     log,
///     LogItem {
///         kind: LogKind::Informational,
///         label: Cow::Borrowed("sigTst"),
///         description: Cow::Borrowed("signature time-stamp"),
///         crate_name: Cow::Borrowed(env!("CARGO_PKG_NAME")),
///         file: Cow::Borrowed(file!()),
///         function: Cow::Borrowed("test func"),
///         line: log.line,
///         ..Default::default()
///     }
/// );
/// #
/// # assert!(log.line > 2);
/// ```
#[macro_export]
macro_rules! log_item {
    ($label:expr, $description:expr, $function:expr) => {{
        $crate::LogItem {
            kind: $crate::LogKind::Informational,
            label: $label.into(),
            crate_name: env!("CARGO_PKG_NAME").into(),
            file: file!().into(),
            function: $function.into(),
            line: line!(),
            description: $description.into(),
            ..Default::default()
        }
    }};
}
