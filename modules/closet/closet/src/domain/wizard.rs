//! Multi-step item intake wizard.
//!
//! The wizard owns a `DraftItem` and walks it through a fixed sequence of
//! steps. Forward moves are gated by the step's predicate, backward moves
//! never are. Submission is split into `begin_submit` / `finish_submit` so an
//! event-driven front end can run the network calls itself; `submit` chains
//! the two for callers that simply await.

use std::time::{Duration, Instant};

use closet_sdk::models::{
    AttributeTag, Category, ColorToken, ImagePayload, ItemSubmission, PantsType, PersistedItem,
    Session, SubType,
};
use closet_sdk::{ClosetClient, ClosetError};
use tracing::{debug, info, warn};

use super::draft::DraftItem;
use super::error::DomainError;
use super::notice::{Notice, NoticeBoard, NoticeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Image,
    Category,
    Details,
    Colors,
    Review,
}

impl WizardStep {
    pub const ALL: [Self; 5] = [
        Self::Image,
        Self::Category,
        Self::Details,
        Self::Colors,
        Self::Review,
    ];

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Image => Some(Self::Category),
            Self::Category => Some(Self::Details),
            Self::Details => Some(Self::Colors),
            Self::Colors => Some(Self::Review),
            Self::Review => None,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Image => None,
            Self::Category => Some(Self::Image),
            Self::Details => Some(Self::Category),
            Self::Colors => Some(Self::Details),
            Self::Review => Some(Self::Colors),
        }
    }

    /// One-based position, as shown in "Step 2 of 5".
    #[must_use]
    pub const fn number(self) -> usize {
        self as usize + 1
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Image => "Upload Image",
            Self::Category => "Category",
            Self::Details => "Details",
            Self::Colors => "Colors",
            Self::Review => "Review & Submit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing,
    /// Image upload and record creation are in flight.
    Submitting,
}

#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub notice_ttl: Duration,
    pub max_image_bytes: usize,
    /// Bound on the client call made by `Wizard::submit`.
    pub submit_timeout: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::from_secs(3),
            max_image_bytes: 10 * 1024 * 1024,
            submit_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
pub struct Wizard {
    step: WizardStep,
    phase: WizardPhase,
    draft: DraftItem,
    notices: NoticeBoard,
    config: WizardConfig,
}

impl Wizard {
    #[must_use]
    pub fn new(config: WizardConfig) -> Self {
        Self {
            step: WizardStep::Image,
            phase: WizardPhase::Editing,
            draft: DraftItem::new(),
            notices: NoticeBoard::new(config.notice_ttl),
            config,
        }
    }

    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    #[must_use]
    pub fn draft(&self) -> &DraftItem {
        &self.draft
    }

    /// The notice visible at `now`, if it has not expired or been replaced.
    #[must_use]
    pub fn notice_at(&self, now: Instant) -> Option<&Notice> {
        self.notices.active_at(now)
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice_at(Instant::now())
    }

    /// Most recent notice, expired or not.
    #[must_use]
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.latest()
    }

    /// Advance one step if the current step's predicate holds.
    ///
    /// # Errors
    /// - `DomainError::Validation` if the predicate fails; the step is unchanged
    ///   and a validation notice is posted.
    /// - `DomainError::AtLastStep` on the review step.
    /// - `DomainError::Busy` while submitting.
    pub fn next(&mut self) -> Result<WizardStep, DomainError> {
        self.ensure_editing()?;
        let Some(target) = self.step.next() else {
            return Err(self.reject(DomainError::AtLastStep));
        };
        if let Err(e) = self.check_step(self.step) {
            debug!(step = ?self.step, error = %e, "step predicate failed");
            return Err(self.reject(e));
        }
        self.step = target;
        self.notices.dismiss();
        Ok(target)
    }

    /// Go back one step. Never validated; later data is kept.
    ///
    /// # Errors
    /// - `DomainError::AtFirstStep` on the image step.
    /// - `DomainError::Busy` while submitting.
    pub fn back(&mut self) -> Result<WizardStep, DomainError> {
        self.ensure_editing()?;
        let Some(target) = self.step.previous() else {
            return Err(DomainError::AtFirstStep);
        };
        self.step = target;
        Ok(target)
    }

    /// Discard the draft and start over. Not available once submission began.
    ///
    /// # Errors
    /// Returns `DomainError::Busy` while submitting.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.ensure_editing()?;
        debug!(step = ?self.step, "wizard cancelled, draft discarded");
        self.reset();
        Ok(())
    }

    /// # Errors
    /// Returns `DomainError::Validation` for an unusable image, or
    /// `DomainError::Busy` while submitting.
    pub fn set_image(&mut self, image: ImagePayload) -> Result<(), DomainError> {
        self.ensure_editing()?;
        let max = self.config.max_image_bytes;
        let result = self.draft.set_image(image, max);
        self.noted(result)
    }

    /// # Errors
    /// Returns `DomainError::Busy` while submitting.
    pub fn set_category(&mut self, category: Category) -> Result<(), DomainError> {
        self.ensure_editing()?;
        self.draft.set_category(category);
        Ok(())
    }

    /// # Errors
    /// Returns `DomainError::Validation` if the subtype does not fit the
    /// category, or `DomainError::Busy` while submitting.
    pub fn set_sub_type(&mut self, sub_type: SubType) -> Result<(), DomainError> {
        self.ensure_editing()?;
        let result = self.draft.set_sub_type(sub_type);
        self.noted(result)
    }

    /// # Errors
    /// Returns `DomainError::Validation` unless the draft is `Bottom` / `Pants`,
    /// or `DomainError::Busy` while submitting.
    pub fn set_pants_type(&mut self, pants_type: PantsType) -> Result<(), DomainError> {
        self.ensure_editing()?;
        let result = self.draft.set_pants_type(pants_type);
        self.noted(result)
    }

    /// # Errors
    /// Returns `DomainError::Validation` if the tag is not offered, or
    /// `DomainError::Busy` while submitting.
    pub fn toggle_tag(&mut self, tag: AttributeTag) -> Result<bool, DomainError> {
        self.ensure_editing()?;
        let result = self.draft.toggle_tag(tag);
        self.noted(result)
    }

    /// # Errors
    /// Returns `DomainError::Busy` while submitting.
    pub fn toggle_color(&mut self, token: ColorToken) -> Result<bool, DomainError> {
        self.ensure_editing()?;
        Ok(self.draft.toggle_color(token))
    }

    /// Validate the whole draft and enter the submitting phase.
    ///
    /// # Errors
    /// - `DomainError::NotAtReview` unless on the review step.
    /// - `DomainError::Validation` if any step predicate no longer holds.
    /// - `DomainError::Busy` if a submission is already in flight.
    pub fn begin_submit(&mut self) -> Result<ItemSubmission, DomainError> {
        self.ensure_editing()?;
        if self.step != WizardStep::Review {
            return Err(self.reject(DomainError::NotAtReview));
        }
        let submission = match self.draft.to_submission() {
            Ok(s) => s,
            Err(e) => return Err(self.reject(e)),
        };
        self.phase = WizardPhase::Submitting;
        debug!(category = %submission.item.category, "submission started");
        Ok(submission)
    }

    /// Apply the outcome of a submission started with `begin_submit`.
    ///
    /// On success the draft is reset and the wizard returns to the first
    /// step. On failure the draft and step are kept so the user can retry.
    ///
    /// # Errors
    /// - `DomainError::Submission` carrying the client's error.
    /// - `DomainError::NotSubmitting` if no submission was started.
    pub fn finish_submit(
        &mut self,
        outcome: Result<PersistedItem, ClosetError>,
    ) -> Result<PersistedItem, DomainError> {
        if self.phase != WizardPhase::Submitting {
            return Err(DomainError::NotSubmitting);
        }
        self.phase = WizardPhase::Editing;
        match outcome {
            Ok(item) => {
                info!(item_id = %item.id, "item saved");
                self.reset();
                self.notices
                    .post(NoticeKind::Success, "Item added to your closet.");
                Ok(item)
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "item submission failed");
                Err(self.reject(DomainError::Submission(e)))
            }
        }
    }

    /// Leave the submitting phase without an outcome, keeping the draft and
    /// step. For front ends that drive `begin_submit` themselves and give up
    /// on the in-flight request.
    ///
    /// # Errors
    /// Returns `DomainError::NotSubmitting` if no submission was started.
    pub fn abort_submit(&mut self) -> Result<(), DomainError> {
        if self.phase != WizardPhase::Submitting {
            return Err(DomainError::NotSubmitting);
        }
        self.phase = WizardPhase::Editing;
        debug!(step = ?self.step, "submission aborted, draft kept");
        Ok(())
    }

    /// Run the whole submission against `client`, bounded by
    /// `WizardConfig::submit_timeout`.
    ///
    /// If the returned future is dropped before completion the wizard goes
    /// back to `Editing` with the draft intact.
    ///
    /// # Errors
    /// Any error from `begin_submit` or `finish_submit`. Expiry is reported as
    /// `DomainError::Submission(ClosetError::Timeout)`.
    pub async fn submit(
        &mut self,
        client: &dyn ClosetClient,
        session: &Session,
    ) -> Result<PersistedItem, DomainError> {
        let submission = self.begin_submit()?;
        let timeout = self.config.submit_timeout;
        let guard = SubmitGuard { wizard: self };
        let outcome = tokio::time::timeout(timeout, client.submit_item(session, submission))
            .await
            .unwrap_or_else(|_| {
                warn!(timeout_ms = ?timeout.as_millis(), "client did not answer in time");
                Err(ClosetError::Timeout)
            });
        guard.wizard.finish_submit(outcome)
    }

    fn check_step(&self, step: WizardStep) -> Result<(), DomainError> {
        match step {
            WizardStep::Image => self.draft.check_image(),
            WizardStep::Category => self.draft.check_category(),
            WizardStep::Details => self.draft.check_details(),
            WizardStep::Colors => self.draft.check_colors(),
            WizardStep::Review => Ok(()),
        }
    }

    fn ensure_editing(&self) -> Result<(), DomainError> {
        match self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitting => Err(DomainError::Busy),
        }
    }

    /// Post the error as a notice and hand it back.
    fn reject(&mut self, e: DomainError) -> DomainError {
        self.notices.post(e.notice_kind(), e.user_message());
        e
    }

    fn noted<T>(&mut self, result: Result<T, DomainError>) -> Result<T, DomainError> {
        result.map_err(|e| self.reject(e))
    }

    fn reset(&mut self) {
        self.step = WizardStep::Image;
        self.draft = DraftItem::new();
        self.notices.dismiss();
    }
}

/// Returns the wizard to `Editing` if a `submit` future is dropped mid-flight.
struct SubmitGuard<'a> {
    wizard: &'a mut Wizard,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.wizard.phase == WizardPhase::Submitting {
            warn!(step = ?self.wizard.step, "submission dropped before completion, draft kept");
            self.wizard.phase = WizardPhase::Editing;
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}
