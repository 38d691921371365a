//! Suspend/resume contract between planning logic and the driver.
//!
//! A saga is a synchronous state machine. Each call to [`Saga::resume`] either
//! suspends with one [`Request`] or completes with the saga's output. The first
//! call carries no response; every later call must carry the response to the
//! request yielded just before it. Requests and responses are bound only by
//! that strict alternation.

use crate::error::LoadError;
use crate::loader::request::{Request, Response};

/// Outcome of advancing a saga by one step.
#[derive(Debug)]
pub enum Step<T> {
    /// Suspended: execute this request and resume with its response.
    Yield(Request),
    /// Finished: the saga will not yield again.
    Complete(T),
}

pub trait Saga {
    type Output;

    fn resume(&mut self, response: Option<Response>) -> Result<Step<Self::Output>, LoadError>;

    /// Run to completion, answering each request synchronously.
    fn run_with<F>(mut self, mut respond: F) -> Result<Self::Output, LoadError>
    where
        Self: Sized,
        F: FnMut(&Request) -> Result<Response, LoadError>,
    {
        let mut step = self.resume(None)?;
        loop {
            match step {
                Step::Yield(request) => {
                    let response = respond(&request)?;
                    step = self.resume(Some(response))?;
                }
                Step::Complete(output) => return Ok(output),
            }
        }
    }
}

/// Where a saga stands in the alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Fresh,
    Suspended,
    Finished,
}

impl Phase {
    /// Check an incoming resume against the current phase and hand back the response.
    pub(crate) fn accept(
        &self,
        saga: &'static str,
        response: Option<Response>,
    ) -> Result<Option<Response>, LoadError> {
        match (self, response) {
            (Phase::Fresh, None) => Ok(None),
            (Phase::Fresh, Some(_)) => Err(LoadError::Protocol(format!(
                "{} was started with a response before yielding any request",
                saga
            ))),
            (Phase::Suspended, Some(response)) => Ok(Some(response)),
            (Phase::Suspended, None) => Err(LoadError::Protocol(format!(
                "{} was resumed without a response to its pending request",
                saga
            ))),
            (Phase::Finished, _) => Err(LoadError::Protocol(format!(
                "{} was resumed after it completed",
                saga
            ))),
        }
    }
}
