use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

use crate::assets::decode::probe_dimensions;
use crate::assets::source::ImageSource;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{GlassError, GlassResult};

/// Monotonic stamp attached to each probe request.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct Generation(pub u64);

impl Generation {
    /// The following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A finished probe, as delivered back to the component.
#[derive(Debug)]
pub struct ProbeOutcome {
    /// Generation the request was issued under.
    pub generation: Generation,
    /// Source the request was issued for.
    pub src: String,
    /// Natural size, or why it could not be determined.
    pub result: GlassResult<PixelSize>,
}

/// Completion handle for one probe request.
///
/// Dropping it without calling [`ProbeReply::resolve`] answers the request with a source error,
/// so an abandoned probe clears the reservation like any other failed load.
#[derive(Debug)]
pub struct ProbeReply {
    generation: Generation,
    src: String,
    tx: Option<mpsc::Sender<ProbeOutcome>>,
}

impl ProbeReply {
    pub(crate) fn new(generation: Generation, src: String, tx: mpsc::Sender<ProbeOutcome>) -> Self {
        Self {
            generation,
            src,
            tx: Some(tx),
        }
    }

    /// Source to probe.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Generation stamp of the request.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Deliver the result. A detached or dropped component simply never sees it.
    pub fn resolve(mut self, result: GlassResult<PixelSize>) {
        self.send(result);
    }

    fn send(&mut self, result: GlassResult<PixelSize>) {
        let Some(tx) = self.tx.take() else {
            return;
        };
        let outcome = ProbeOutcome {
            generation: self.generation,
            src: std::mem::take(&mut self.src),
            result,
        };
        if tx.send(outcome).is_err() {
            tracing::debug!("probe receiver dropped before completion");
        }
    }
}

impl Drop for ProbeReply {
    fn drop(&mut self) {
        if self.tx.is_some() {
            tracing::debug!(src = %self.src, "probe reply dropped unanswered");
            self.send(Err(GlassError::source("probe abandoned")));
        }
    }
}

/// Host facility that determines natural image dimensions out of band.
pub trait ImageProber {
    /// Start probing `reply.src()`; call [`ProbeReply::resolve`] when done, from any thread.
    fn probe(&mut self, reply: ProbeReply);
}

/// Probes on a short-lived worker thread per request.
///
/// Files and `data:` URIs are supported; relative paths resolve against `base_dir`.
#[derive(Clone, Debug)]
pub struct ThreadedProber {
    base_dir: PathBuf,
}

impl ThreadedProber {
    /// Prober resolving relative paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl Default for ThreadedProber {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ImageProber for ThreadedProber {
    fn probe(&mut self, reply: ProbeReply) {
        let base_dir = self.base_dir.clone();
        let spawned = std::thread::Builder::new()
            .name("glass-text-probe".to_string())
            .spawn(move || {
                let result = probe_source(reply.src(), &base_dir);
                reply.resolve(result);
            });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to spawn image probe thread");
        }
    }
}

/// Resolve and probe `src` synchronously.
#[tracing::instrument(skip(base_dir), fields(base_dir = %base_dir.display()))]
pub fn probe_source(src: &str, base_dir: &std::path::Path) -> GlassResult<PixelSize> {
    if src.trim().is_empty() {
        return Err(GlassError::source("empty image source"));
    }
    let bytes = ImageSource::from_uri(src).read_bytes(base_dir)?;
    probe_dimensions(&bytes)
}

/// Prober whose requests are answered by the embedder, in any order.
///
/// Clones share the same queue, so one clone can be handed to the component while another is
/// kept to resolve requests.
#[derive(Clone, Debug, Default)]
pub struct ManualProber {
    pending: Rc<RefCell<Vec<ProbeReply>>>,
}

impl ManualProber {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources of unanswered requests, oldest first.
    pub fn pending_sources(&self) -> Vec<String> {
        self.pending
            .borrow()
            .iter()
            .map(|r| r.src().to_string())
            .collect()
    }

    /// Number of unanswered requests.
    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Answer the oldest unanswered request for `src`. Returns `false` if there is none.
    pub fn resolve(&self, src: &str, result: GlassResult<PixelSize>) -> bool {
        let reply = {
            let mut pending = self.pending.borrow_mut();
            let Some(idx) = pending.iter().position(|r| r.src() == src) else {
                return false;
            };
            pending.remove(idx)
        };
        reply.resolve(result);
        true
    }

    /// Answer every unanswered request with `f(src)`, oldest first.
    pub fn resolve_all(&self, mut f: impl FnMut(&str) -> GlassResult<PixelSize>) -> usize {
        let replies = std::mem::take(&mut *self.pending.borrow_mut());
        let n = replies.len();
        for reply in replies {
            let result = f(reply.src());
            reply.resolve(result);
        }
        n
    }
}

impl ImageProber for ManualProber {
    fn probe(&mut self, reply: ProbeReply) {
        self.pending.borrow_mut().push(reply);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/probe.rs"]
mod tests;
