//! The `<glass-text>` component: attribute store, change dispatch, content observation and
//! aspect synchronization over a private [`GlassView`].
//!
//! The component never fails outward. Malformed attribute values degrade to defaults, probe
//! failures clear the aspect reservation, and stale probe completions are dropped.

/// Observed attribute names, defaults and the attribute store.
pub mod attributes;
/// Nested content and its mutation records.
pub mod content;
pub mod pipeline;

pub(crate) mod aspect;

use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::assets::probe::{ImageProber, ProbeOutcome, ProbeReply, ThreadedProber};
use crate::component::aspect::{AspectSync, AspectUpdate};
use crate::component::attributes::{AttrCategory, AttrName, AttributeChange, AttributeStore};
use crate::component::content::{ContentTree, MutationRecord};
use crate::component::pipeline::{
    GlassView, HostStyle, filter_for, fit_for, glyph_style_for, glyph_text, reserved_host_style,
};

/// Whether the component is inserted into its host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum Lifecycle {
    /// Not observing; attribute changes are stored only.
    #[default]
    Detached,
    /// Observing attributes and content.
    Attached,
}

/// How many times each sub-pipeline recomputed its part of the view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Layer source updates.
    pub image_updates: u64,
    /// Probe requests issued.
    pub probes_issued: u64,
    /// Glass filter recomputations.
    pub filter_updates: u64,
    /// Fit mode recomputations.
    pub fit_updates: u64,
    /// Glyph style recomputations.
    pub text_style_updates: u64,
    /// Glyph text recomputations.
    pub text_content_updates: u64,
    /// Reservation changes applied from probe results (including clears).
    pub aspect_updates: u64,
    /// Probe completions dropped as superseded.
    pub stale_probes: u64,
}

/// A frosted-glass text component.
///
/// The host owns the value: it assigns attributes, mutates nested content, attaches and detaches
/// it, and pumps probe completions with [`GlassText::pump`] or [`GlassText::settle`]. All
/// handlers run on the owner's thread, one at a time.
pub struct GlassText {
    lifecycle: Lifecycle,
    attrs: AttributeStore,
    content: ContentTree,
    view: GlassView,
    aspect: AspectSync,
    prober: Box<dyn ImageProber>,
    probe_tx: mpsc::Sender<ProbeOutcome>,
    probe_rx: mpsc::Receiver<ProbeOutcome>,
    stats: RenderStats,
}

impl std::fmt::Debug for GlassText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlassText")
            .field("lifecycle", &self.lifecycle)
            .field("attrs", &self.attrs)
            .field("view", &self.view)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for GlassText {
    fn default() -> Self {
        Self::new(ThreadedProber::default())
    }
}

impl GlassText {
    /// Detached component using `prober` for image dimension probes.
    pub fn new(prober: impl ImageProber + 'static) -> Self {
        let (probe_tx, probe_rx) = mpsc::channel();
        Self {
            lifecycle: Lifecycle::Detached,
            attrs: AttributeStore::new(),
            content: ContentTree::new(),
            view: GlassView::default(),
            aspect: AspectSync::default(),
            prober: Box::new(prober),
            probe_tx,
            probe_rx,
            stats: RenderStats::default(),
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Whether the component is attached.
    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    /// Insert into the host: subscribe to content and apply every sub-pipeline once.
    pub fn attach(&mut self) {
        if self.is_attached() {
            return;
        }
        tracing::debug!("glass-text attached");
        self.lifecycle = Lifecycle::Attached;
        self.content.observe();
        self.update_image();
        self.update_all_styles();
        self.update_text_content();
    }

    /// Remove from the host: release the content subscription and invalidate in-flight probes.
    pub fn detach(&mut self) {
        if !self.is_attached() {
            return;
        }
        tracing::debug!("glass-text detached");
        self.lifecycle = Lifecycle::Detached;
        self.content.disconnect();
        self.aspect.invalidate();
        while self.probe_rx.try_recv().is_ok() {}
    }

    /// Assign an attribute by markup name.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        if let Some(change) = self.attrs.set(name, value) {
            self.attribute_changed(change);
        }
    }

    /// Remove an attribute by markup name.
    pub fn remove_attribute(&mut self, name: &str) {
        if let Some(change) = self.attrs.remove(name) {
            self.attribute_changed(change);
        }
    }

    /// Raw attribute value by markup name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// All assigned attributes.
    pub fn attributes(&self) -> &AttributeStore {
        &self.attrs
    }

    /// Nested content.
    pub fn content(&self) -> &ContentTree {
        &self.content
    }

    /// Untrimmed text content of the nested content.
    pub fn text_content(&self) -> String {
        self.content.text_content()
    }

    /// Mutate nested content; observed mutations are delivered when `f` returns.
    pub fn mutate_content<R>(&mut self, f: impl FnOnce(&mut ContentTree) -> R) -> R {
        let out = f(&mut self.content);
        self.deliver_mutations();
        out
    }

    /// Replace nested content with a single text node.
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.mutate_content(|c| c.set_text_content(text));
    }

    /// The private view tree.
    pub fn view(&self) -> &GlassView {
        &self.view
    }

    /// Recomputation counters.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Whether the probe for the current source is still unanswered.
    pub fn probe_pending(&self) -> bool {
        self.aspect.in_flight()
    }

    /// Apply every probe completion already delivered. Returns how many were processed.
    pub fn pump(&mut self) -> usize {
        let mut n = 0usize;
        while let Ok(outcome) = self.probe_rx.try_recv() {
            self.apply_probe(outcome);
            n += 1;
        }
        n
    }

    /// Block until the current probe resolves or `timeout` passes. Returns `true` when settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        self.pump();
        while self.aspect.in_flight() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.probe_rx.recv_timeout(remaining) {
                Ok(outcome) => self.apply_probe(outcome),
                Err(mpsc::RecvTimeoutError::Timeout) => return false,
                // The component holds a sender, so this cannot happen.
                Err(mpsc::RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn attribute_changed(&mut self, change: AttributeChange) {
        if !self.is_attached() {
            return;
        }
        tracing::trace!(
            name = %change.name,
            old = ?change.old,
            new = ?change.new,
            "attribute changed"
        );
        match change.name.category() {
            AttrCategory::Image => self.update_image(),
            AttrCategory::Filter => self.update_filter(),
            AttrCategory::Fit => self.update_fit(),
            AttrCategory::TextStyle => self.update_text_styles(),
        }
    }

    fn update_all_styles(&mut self) {
        self.update_fit();
        self.update_filter();
        self.update_text_styles();
    }

    fn update_image(&mut self) {
        let src = self
            .attrs
            .get_attr(AttrName::ImageSrc)
            .unwrap_or_default()
            .to_string();
        self.view.sharp.src = src.clone();
        self.view.glass.src = src.clone();
        self.stats.image_updates += 1;
        self.adapt_container_to_image(src);
    }

    fn adapt_container_to_image(&mut self, src: String) {
        if src.is_empty() {
            self.aspect.invalidate();
            self.clear_reservation();
            return;
        }
        let generation = self.aspect.begin();
        self.stats.probes_issued += 1;
        let reply = ProbeReply::new(generation, src, self.probe_tx.clone());
        self.prober.probe(reply);
    }

    fn apply_probe(&mut self, outcome: ProbeOutcome) {
        match self.aspect.accept(&outcome) {
            AspectUpdate::Stale => {
                self.stats.stale_probes += 1;
                tracing::debug!(
                    src = %outcome.src,
                    generation = outcome.generation.0,
                    current = self.aspect.current().0,
                    "discarding superseded image probe"
                );
            }
            AspectUpdate::Reserve(ratio) => {
                self.view.host = reserved_host_style(ratio);
                self.view.aspect_ratio = Some(ratio);
                self.stats.aspect_updates += 1;
            }
            AspectUpdate::Clear => {
                if let Err(e) = &outcome.result {
                    tracing::error!(src = %outcome.src, error = %e, "glass-text image failed to load");
                }
                self.clear_reservation();
                self.stats.aspect_updates += 1;
            }
        }
    }

    fn clear_reservation(&mut self) {
        self.view.host = HostStyle::default();
        self.view.aspect_ratio = None;
    }

    fn update_filter(&mut self) {
        self.view.glass.filter = Some(filter_for(&self.attrs));
        self.stats.filter_updates += 1;
    }

    fn update_fit(&mut self) {
        let fit = fit_for(&self.attrs);
        self.view.sharp.object_fit = fit.clone();
        self.view.glass.object_fit = fit;
        self.stats.fit_updates += 1;
    }

    fn update_text_styles(&mut self) {
        self.view.glyph.style = glyph_style_for(&self.attrs);
        self.stats.text_style_updates += 1;
    }

    fn update_text_content(&mut self) {
        self.view.glyph.text = glyph_text(&self.content.text_content());
        self.stats.text_content_updates += 1;
    }

    fn deliver_mutations(&mut self) {
        let records: Vec<MutationRecord> = self.content.take_records();
        if records.is_empty() || !self.is_attached() {
            return;
        }
        tracing::trace!(records = records.len(), "content mutated");
        self.update_text_content();
    }
}

#[cfg(test)]
#[path = "../tests/unit/component/glass_text.rs"]
mod tests;
