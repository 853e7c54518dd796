//! In-process audio backend for headless rendering and tests

use super::element::PcmElement;
use crate::analyser::FftAnalyser;
use crate::config::AnalyserConfig;
use crate::error::{Result, VisualizerError};
use crate::graph::{Analyser, AudioBackend, ProcessingContext};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Live-context ceiling, comparable to what browsers allow per page
pub const DEFAULT_MAX_LIVE_CONTEXTS: usize = 6;

#[derive(Debug, Default)]
struct ContextStats {
    opened: Cell<u64>,
    closed: Cell<u64>,
    live: Cell<usize>,
}

/// Opens [`NativeContext`]s, up to a fixed number at once
#[derive(Debug, Clone)]
pub struct NativeBackend {
    stats: Rc<ContextStats>,
    max_live_contexts: usize,
}

impl NativeBackend {
    pub fn new() -> Self {
        Self::with_max_live_contexts(DEFAULT_MAX_LIVE_CONTEXTS)
    }

    pub fn with_max_live_contexts(max_live_contexts: usize) -> Self {
        Self {
            stats: Rc::new(ContextStats::default()),
            max_live_contexts,
        }
    }

    /// Contexts opened so far
    pub fn opened(&self) -> u64 {
        self.stats.opened.get()
    }

    /// Contexts closed so far
    pub fn closed(&self) -> u64 {
        self.stats.closed.get()
    }

    /// Contexts currently open
    pub fn live(&self) -> usize {
        self.stats.live.get()
    }
}

impl Default for NativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for NativeBackend {
    type Context = NativeContext;

    fn open_context(&self) -> Result<NativeContext> {
        let live = self.stats.live.get();
        if live >= self.max_live_contexts {
            return Err(VisualizerError::ContextUnavailable(format!(
                "{} audio contexts already open",
                live
            )));
        }

        self.stats.opened.set(self.stats.opened.get() + 1);
        self.stats.live.set(live + 1);
        debug!("Native audio context opened ({} live)", live + 1);

        Ok(NativeContext {
            stats: Rc::clone(&self.stats),
            source: None,
            closed: false,
        })
    }
}

/// A processing context over one tapped [`PcmElement`]
///
/// The element plays itself; routing to the output sink only wires the
/// analyser to the tap.
#[derive(Debug)]
pub struct NativeContext {
    stats: Rc<ContextStats>,
    source: Option<PcmElement>,
    closed: bool,
}

impl NativeContext {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(VisualizerError::ContextClosed)
        } else {
            Ok(())
        }
    }
}

impl ProcessingContext for NativeContext {
    type Element = PcmElement;
    type Analyser = NativeAnalyser;

    fn tap_source(&mut self, element: &PcmElement) -> Result<()> {
        self.ensure_open()?;
        if self.source.is_some() {
            return Err(VisualizerError::GraphConstruction(
                "context already has a source tap".to_string(),
            ));
        }
        if !element.try_acquire_tap() {
            return Err(VisualizerError::SourceAlreadyTapped);
        }
        self.source = Some(element.clone());
        Ok(())
    }

    fn create_analyser(&mut self, config: &AnalyserConfig) -> Result<NativeAnalyser> {
        self.ensure_open()?;
        let fft = FftAnalyser::new(*config)?;
        Ok(NativeAnalyser {
            window: vec![0.0; fft.fft_size()],
            fft,
            input: None,
        })
    }

    fn route_through(&mut self, analyser: &mut NativeAnalyser) -> Result<()> {
        self.ensure_open()?;
        let source = self.source.as_ref().ok_or_else(|| {
            VisualizerError::GraphConstruction("no source tap to route".to_string())
        })?;
        analyser.input = Some(source.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if let Some(source) = self.source.take() {
            source.release_tap();
        }
        self.stats.closed.set(self.stats.closed.get() + 1);
        self.stats.live.set(self.stats.live.get().saturating_sub(1));
        debug!("Native audio context closed ({} live)", self.stats.live.get());
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for NativeContext {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Analyser fed from the element's playhead
pub struct NativeAnalyser {
    fft: FftAnalyser,
    input: Option<PcmElement>,
    window: Vec<f32>,
}

impl Analyser for NativeAnalyser {
    fn fft_size(&self) -> usize {
        self.fft.fft_size()
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        match &self.input {
            Some(element) => element.fill_window(&mut self.window),
            None => self.window.fill(0.0),
        }
        self.fft.analyse(&self.window, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::AnalysisGraph;
    use crate::native::element::PcmTrack;

    fn element() -> PcmElement {
        PcmElement::new(PcmTrack::new(vec![0.5; 1024], 8000))
    }

    #[test]
    fn second_tap_on_same_element_is_refused() {
        let backend = NativeBackend::new();
        let element = element();
        let config = AnalyserConfig::default();

        let first = AnalysisGraph::build(&backend, &element, &config).unwrap();
        let second = AnalysisGraph::build(&backend, &element, &config);
        assert!(matches!(second, Err(VisualizerError::SourceAlreadyTapped)));
        assert_eq!(backend.live(), 1);

        drop(first);
        assert!(!element.is_tapped());
        assert!(AnalysisGraph::build(&backend, &element, &config).is_ok());
    }

    #[test]
    fn live_context_ceiling() {
        let backend = NativeBackend::with_max_live_contexts(1);
        let held = backend.open_context().unwrap();
        assert!(matches!(
            backend.open_context(),
            Err(VisualizerError::ContextUnavailable(_))
        ));
        drop(held);
        assert_eq!(backend.live(), 0);
        assert!(backend.open_context().is_ok());
    }

    #[test]
    fn closed_context_rejects_new_nodes() {
        let backend = NativeBackend::new();
        let mut context = backend.open_context().unwrap();
        context.close().unwrap();
        context.close().unwrap();
        assert_eq!(backend.closed(), 1);
        assert!(matches!(
            context.tap_source(&element()),
            Err(VisualizerError::ContextClosed)
        ));
    }

    #[test]
    fn analyser_reads_the_playhead() {
        let backend = NativeBackend::new();
        let element = element();
        let mut graph =
            AnalysisGraph::build(&backend, &element, &AnalyserConfig::default()).unwrap();
        let mut bins = [0u8; 128];

        graph.analyser_mut().byte_frequency_data(&mut bins);
        assert!(bins.iter().all(|&b| b == 0), "nothing played yet");

        element.play();
        element.advance(512);
        graph.analyser_mut().byte_frequency_data(&mut bins);
        assert!(bins[0] > 0, "DC offset should show in the first bin");
    }
}
