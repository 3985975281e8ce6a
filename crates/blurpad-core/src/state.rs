//! The uploader's state and its transitions.
//!
//! [`UploaderState`] holds everything the view renders: the current
//! image, the blur level, the loading flag, and at most one error
//! notification. Every change goes through a method here, so the UI
//! layer only forwards events and re-renders.
//!
//! # Stale reads
//!
//! Reading a file is asynchronous. Each upload takes a [`Ticket`] from
//! [`UploaderState::begin_ingest`]; completions carrying an older ticket
//! are dropped, so a slow first read can never overwrite a faster second
//! one. Removing the image also invalidates any read still in flight.

use crate::types::{BlurLevel, UploadedImage};

/// Identifies one upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The generation number this ticket was issued for.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// A transient error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Distinguishes this notification from ones it replaced, so a
    /// timer armed for an older message cannot dismiss a newer one.
    pub id: u64,
    /// Text shown to the user.
    pub message: String,
}

/// Loading indicator bookkeeping for the upload in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    ticket: Ticket,
    read_done: bool,
    min_elapsed: bool,
}

/// State of the single-image blur view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploaderState {
    image: Option<UploadedImage>,
    blur: BlurLevel,
    generation: u64,
    loading: Option<PendingLoad>,
    notification: Option<Notification>,
    next_notification_id: u64,
}

impl UploaderState {
    /// Empty state: no image, no blur, nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    /// The current image, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    /// The current blur level.
    #[must_use]
    pub const fn blur(&self) -> BlurLevel {
        self.blur
    }

    /// Whether the loading indicator should show.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// The visible notification, if any.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Whether the preview (slider, image, remove button) should show.
    #[must_use]
    pub const fn preview_visible(&self) -> bool {
        self.image.is_some() && self.loading.is_none()
    }

    /// Whether the export action is offered: an image is present and
    /// blurred.
    #[must_use]
    pub const fn can_export(&self) -> bool {
        self.image.is_some() && !self.blur.is_zero()
    }

    /// CSS filter for the preview element.
    #[must_use]
    pub fn filter_css(&self) -> String {
        self.blur.css_filter()
    }

    /// Whether `ticket` belongs to the most recent upload attempt.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    // --- Ingestion ---

    /// Start an upload: raise the loading flag and issue a ticket.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_ingest(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        let ticket = Ticket(self.generation);
        self.loading = Some(PendingLoad {
            ticket,
            read_done: false,
            min_elapsed: false,
        });
        log::debug!("upload {} started", ticket.0);
        ticket
    }

    /// Finish an upload with the decoded image.
    ///
    /// Replaces the current image and resets blur to zero. Returns
    /// `false` and changes nothing when `ticket` is stale.
    pub fn complete_ingest(&mut self, ticket: Ticket, image: UploadedImage) -> bool {
        if !self.is_current(ticket) {
            log::warn!(
                "dropping stale upload {} (current is {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.image = Some(image);
        self.blur = BlurLevel::ZERO;
        self.mark_read_done(ticket);
        log::info!("upload {} complete", ticket.0);
        true
    }

    /// Finish an upload whose read failed.
    ///
    /// Shows `message` and leaves the current image alone. Returns the
    /// notification id, or `None` when `ticket` is stale.
    pub fn fail_ingest(&mut self, ticket: Ticket, message: impl Into<String>) -> Option<u64> {
        if !self.is_current(ticket) {
            return None;
        }
        let id = self.notify(message.into());
        self.mark_read_done(ticket);
        Some(id)
    }

    /// Record that the minimum loading display time has passed.
    pub fn min_loading_elapsed(&mut self, ticket: Ticket) {
        if let Some(pending) = self.loading.as_mut().filter(|p| p.ticket == ticket) {
            pending.min_elapsed = true;
        }
        self.settle_loading();
    }

    /// Refuse an upload: show `message`, keep the current image.
    ///
    /// Returns the notification id for arming the auto-dismiss timer.
    pub fn reject(&mut self, message: impl Into<String>) -> u64 {
        let message = message.into();
        log::info!("upload rejected: {message}");
        self.notify(message)
    }

    fn mark_read_done(&mut self, ticket: Ticket) {
        if let Some(pending) = self.loading.as_mut().filter(|p| p.ticket == ticket) {
            pending.read_done = true;
        }
        self.settle_loading();
    }

    fn settle_loading(&mut self) {
        if self.loading.is_some_and(|p| p.read_done && p.min_elapsed) {
            self.loading = None;
        }
    }

    // --- Editing ---

    /// Set the blur level.
    ///
    /// Without an image the level stays at zero and `false` is returned.
    pub fn set_blur(&mut self, level: BlurLevel) -> bool {
        if self.image.is_none() {
            return false;
        }
        self.blur = level;
        true
    }

    /// Remove the current image.
    ///
    /// Resets blur, hides export, and invalidates any upload in flight.
    pub fn remove(&mut self) {
        self.image = None;
        self.blur = BlurLevel::ZERO;
        self.generation = self.generation.wrapping_add(1);
        self.loading = None;
        log::debug!("image removed");
    }

    // --- Notifications ---

    fn notify(&mut self, message: String) -> u64 {
        self.next_notification_id = self.next_notification_id.wrapping_add(1);
        let id = self.next_notification_id;
        self.notification = Some(Notification { id, message });
        id
    }

    /// Dismiss the visible notification (explicit user action).
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Dismiss notification `id` if it is still the one showing.
    ///
    /// Returns `true` when something was dismissed.
    pub fn expire_notification(&mut self, id: u64) -> bool {
        if self.notification.as_ref().is_some_and(|n| n.id == id) {
            self.notification = None;
            true
        } else {
            false
        }
    }
}
