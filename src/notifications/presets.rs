// SPDX-License-Identifier: MPL-2.0
//! Convenience constructors layered over plain submission.
//!
//! [`Toasts`] is implemented for anything that can [`Submit`], so the same
//! helpers work on a bare [`Registry`] and on a [`ToastService`]. Options the
//! caller passes always win over the preset's defaults.
//!
//! ```
//! use toast_rack::notifications::{NotificationOptions, Registry, Toasts};
//!
//! let mut registry = Registry::default();
//! let id = registry.error("Upload failed", NotificationOptions::new());
//! assert_eq!(registry.get(id).map(|n| n.title()), Some("Error"));
//! ```

use super::notification::{Notification, NotificationId, NotificationOptions, Severity};
use super::registry::Registry;
use super::service::ToastService;

/// Sink for fully specified submissions.
pub trait Submit {
    fn submit_options(&mut self, options: NotificationOptions) -> NotificationId;

    /// Duration applied by [`Toasts::error`] when the caller sets none.
    fn error_duration_ms(&self) -> u64;
}

impl Submit for Registry {
    fn submit_options(&mut self, options: NotificationOptions) -> NotificationId {
        self.submit(options)
    }

    fn error_duration_ms(&self) -> u64 {
        self.defaults().error_duration_ms
    }
}

impl Submit for ToastService {
    fn submit_options(&mut self, options: NotificationOptions) -> NotificationId {
        self.submit(options)
    }

    fn error_duration_ms(&self) -> u64 {
        ToastService::error_duration_ms(self)
    }
}

/// Severity and application presets.
pub trait Toasts: Submit {
    fn success(&mut self, message: impl Into<String>, options: NotificationOptions) -> NotificationId {
        self.with_severity(Severity::Success, message.into(), options)
    }

    /// Errors stay on screen longer unless a duration is given.
    fn error(&mut self, message: impl Into<String>, options: NotificationOptions) -> NotificationId {
        let duration_ms = self.error_duration_ms();
        self.with_severity(Severity::Error, message.into(), options.duration_or(duration_ms))
    }

    fn warning(&mut self, message: impl Into<String>, options: NotificationOptions) -> NotificationId {
        self.with_severity(Severity::Warning, message.into(), options)
    }

    fn info(&mut self, message: impl Into<String>, options: NotificationOptions) -> NotificationId {
        self.with_severity(Severity::Info, message.into(), options)
    }

    fn quiz_started(&mut self, quiz_title: &str) -> NotificationId {
        self.success(
            format!("Quiz \"{quiz_title}\" started!"),
            NotificationOptions::new().title("Quiz Started").icon("🎯"),
        )
    }

    /// Reports a score with its rounded percentage. A zero `total` reads 0%.
    fn quiz_completed(&mut self, score: u32, total: u32) -> NotificationId {
        let percentage = score_percentage(score, total);
        self.success(
            format!("Quiz completed! Score: {score}/{total} ({percentage}%)"),
            NotificationOptions::new()
                .title("Quiz Completed")
                .icon("🎉")
                .duration_ms(8000),
        )
    }

    fn quiz_saved(&mut self) -> NotificationId {
        self.success(
            "Quiz saved successfully!",
            NotificationOptions::new().title("Saved").icon("💾"),
        )
    }

    /// Clickable notice; `on_click` typically starts the download.
    fn export_ready(
        &mut self,
        filename: &str,
        on_click: impl FnMut(&Notification) + 'static,
    ) -> NotificationId {
        self.info(
            format!("Export ready: {filename}"),
            NotificationOptions::new()
                .title("Export Complete")
                .icon("📊")
                .clickable(true)
                .on_click(on_click),
        )
    }

    /// Stays until dismissed.
    fn network_error(&mut self) -> NotificationId {
        self.error(
            "Network connection lost. Please check your internet connection.",
            NotificationOptions::new()
                .title("Connection Error")
                .icon("🌐")
                .persistent(true),
        )
    }

    #[doc(hidden)]
    fn with_severity(
        &mut self,
        severity: Severity,
        message: String,
        options: NotificationOptions,
    ) -> NotificationId {
        let mut options = options.title_or(severity.default_title());
        options.severity.get_or_insert(severity);
        options.message.get_or_insert(message);
        self.submit_options(options)
    }
}

impl<T: Submit + ?Sized> Toasts for T {}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(total) * 100.0).round() as u32
}
