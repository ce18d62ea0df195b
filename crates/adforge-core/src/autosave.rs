//! Change detection for draft autosave.
//!
//! The observer holds only the digest of the last draft it saw. Callers
//! persist a draft when [`DraftObserver::observe`] reports a new digest.

use crate::domain::digest::draft_digest;
use crate::domain::draft::CampaignDraft;
use crate::domain::error::Result;
use crate::obs;

#[derive(Debug, Clone, Default)]
pub struct DraftObserver {
    last: Option<String>,
}

impl DraftObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known digest, e.g. that of a draft restored from storage.
    pub fn with_digest(digest: impl Into<String>) -> Self {
        Self {
            last: Some(digest.into()),
        }
    }

    pub fn last_digest(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Digest `draft`; `Some(digest)` only when it differs from the last one seen.
    pub fn observe(&mut self, draft: &CampaignDraft) -> Result<Option<String>> {
        let digest = draft_digest(draft)?;
        if self.last.as_deref() == Some(digest.as_str()) {
            return Ok(None);
        }
        obs::emit_draft_changed(&digest);
        self.last = Some(digest.clone());
        Ok(Some(digest))
    }
}
