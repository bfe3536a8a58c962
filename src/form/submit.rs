use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::form::payload::{FormPayload, UserDetails};

/// A validated ad, ready to hand to a submitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    #[serde(flatten)]
    pub payload: FormPayload,
    pub seller: UserDetails,
}

impl Submission {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub trait Submitter: Send {
    fn submit(&mut self, submission: &Submission) -> Result<()>;
}

/// Logs the submission and keeps the last one for the caller.
#[derive(Debug, Default)]
pub struct LogSubmitter {
    last: Option<Submission>,
}

impl LogSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Submission> {
        self.last.as_ref()
    }

    pub fn take(&mut self) -> Option<Submission> {
        self.last.take()
    }
}

impl Submitter for LogSubmitter {
    fn submit(&mut self, submission: &Submission) -> Result<()> {
        let json = serde_json::to_string(submission)?;
        info!(
            photos = submission.payload.photos.len(),
            payload = %json,
            "ad submitted"
        );
        self.last = Some(submission.clone());
        Ok(())
    }
}
