//! Spectrum visualizer lifecycle and render loop
//!
//! # State machine
//!
//! ```text
//!              bind(A)                 bind(B), B != A
//!   Unbound ───────────▶ Bound(A) ─────────────────────▶ Bound(B)
//!      ▲  ╲                 │                               │
//!      │   ╲ build fails    │ bind(None) / unmount          │
//!      │    ▼               ▼                               ▼
//!      │   Failed(A) ──▶ Unbound ◀──────────────────────────┘
//!      └── bind(None)
//! ```
//!
//! `Failed` remembers the source whose graph could not be built so a repeated
//! bind of that same source does not retry. Every transition out of `Bound`
//! cancels the pending frame before closing the context.
//!
//! # Render loop
//!
//! The live graph sits behind `Rc<RefCell<_>>`. Each frame callback holds only
//! a `Weak` to it, renders once, and requests the next frame at the end. After
//! teardown the `Rc` is gone, so a callback that still fires does nothing.

use crate::config::AnalyserConfig;
use crate::error::{Result, VisualizerError};
use crate::graph::{Analyser, AnalysisGraph, AudioBackend, ElementOf, ProcessingContext};
use crate::layout::BarLayout;
use crate::painter::paint_spectrum;
use crate::scheduler::{FrameCallback, FrameHandle, FrameScheduler};
use crate::snapshot::FrequencySnapshot;
use crate::surface::DrawingSurface;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Result of a [`SpectrumVisualizer::bind`] call
///
/// Diagnostic only. Failures are already logged and never escape as errors.
#[derive(Debug)]
pub enum BindOutcome {
    /// Same source as before; nothing changed
    Unchanged,

    /// No source: any previous graph was torn down
    Idle,

    /// A new graph was built and the render loop started
    Bound,

    /// Graph construction failed; the visualizer stays blank
    Failed(VisualizerError),
}

/// Coarse lifecycle state, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizerState {
    Unbound,
    Bound,
    Failed,
}

struct LiveGraph<C: ProcessingContext, S> {
    graph: AnalysisGraph<C>,
    snapshot: FrequencySnapshot,
    surface: Rc<RefCell<S>>,
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
}

impl<C, S> LiveGraph<C, S>
where
    C: ProcessingContext,
    S: DrawingSurface,
{
    /// Draw one frame; false once the loop has stopped
    fn render(&mut self, timestamp: f64) -> bool {
        self.pending = None;
        if !self.running || self.graph.is_closed() {
            return false;
        }

        self.graph
            .analyser_mut()
            .byte_frequency_data(self.snapshot.bins_mut());

        let mut surface = self.surface.borrow_mut();
        let layout = BarLayout::new(self.snapshot.len(), surface.width(), surface.height());
        paint_spectrum(&self.snapshot, &layout, &mut *surface);

        self.frames += 1;
        trace!(frame = self.frames, timestamp, "spectrum frame drawn");
        true
    }

    /// Stop the loop and release the graph; idempotent
    fn shut_down<F: FrameScheduler + ?Sized>(&mut self, scheduler: &F) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        if let Err(e) = self.graph.close() {
            warn!("Failed to close analysis graph: {}", e);
        }
    }
}

enum Binding<C: ProcessingContext, S> {
    Unbound,
    Bound {
        source: C::Element,
        live: Rc<RefCell<LiveGraph<C, S>>>,
    },
    Failed {
        source: C::Element,
    },
}

/// Draws a live bar spectrum of whatever audio source it is bound to
///
/// `B` opens processing contexts, `S` is the drawing target and `F` drives
/// the render loop. The surface and scheduler are shared so the host can read
/// the picture and pump frames.
pub struct SpectrumVisualizer<B, S, F>
where
    B: AudioBackend,
    S: DrawingSurface + 'static,
    F: FrameScheduler + 'static,
    B::Context: 'static,
{
    backend: B,
    surface: Rc<RefCell<S>>,
    scheduler: Rc<F>,
    config: AnalyserConfig,
    binding: Binding<B::Context, S>,
}

impl<B, S, F> SpectrumVisualizer<B, S, F>
where
    B: AudioBackend,
    S: DrawingSurface + 'static,
    F: FrameScheduler + 'static,
    B::Context: 'static,
{
    /// Mount a visualizer; nothing is drawn until a source is bound
    pub fn new(backend: B, surface: Rc<RefCell<S>>, scheduler: Rc<F>) -> Self {
        Self {
            backend,
            surface,
            scheduler,
            config: AnalyserConfig::default(),
            binding: Binding::Unbound,
        }
    }

    /// Point the visualizer at `source`, or at nothing
    ///
    /// A source equal to the current one is a no-op. Any other source tears
    /// down the current graph first, then builds a new one.
    pub fn bind(&mut self, source: Option<&ElementOf<B>>) -> BindOutcome {
        let Some(source) = source else {
            if self.teardown() {
                debug!("Audio source removed; visualizer idle");
            }
            return BindOutcome::Idle;
        };

        if self.current_source() == Some(source) {
            return BindOutcome::Unchanged;
        }

        self.rebind(source)
    }

    /// Tear down for good; safe to call more than once
    pub fn unmount(&mut self) {
        if self.teardown() {
            debug!("Visualizer unmounted");
        }
    }

    pub fn state(&self) -> VisualizerState {
        match self.binding {
            Binding::Unbound => VisualizerState::Unbound,
            Binding::Bound { .. } => VisualizerState::Bound,
            Binding::Failed { .. } => VisualizerState::Failed,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.binding, Binding::Bound { .. })
    }

    /// Frames drawn by the current graph (0 when not bound)
    pub fn frames_rendered(&self) -> u64 {
        match &self.binding {
            Binding::Bound { live, .. } => live.borrow().frames,
            _ => 0,
        }
    }

    /// Copy of the most recent snapshot, if bound
    pub fn snapshot(&self) -> Option<FrequencySnapshot> {
        match &self.binding {
            Binding::Bound { live, .. } => Some(live.borrow().snapshot.clone()),
            _ => None,
        }
    }

    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    fn current_source(&self) -> Option<&ElementOf<B>> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Bound { source, .. } | Binding::Failed { source } => Some(source),
        }
    }

    fn rebind(&mut self, source: &ElementOf<B>) -> BindOutcome {
        // The previous context must be closed before the new tap exists
        self.teardown();

        match self.build_live(source) {
            Ok(live) => {
                let live = Rc::new(RefCell::new(live));
                debug!("Visualizer bound to new audio source");

                let drawn = live.borrow_mut().render(0.0);
                if drawn {
                    schedule_next(&live, &self.scheduler);
                }

                self.binding = Binding::Bound {
                    source: source.clone(),
                    live,
                };
                BindOutcome::Bound
            }
            Err(e) => {
                warn!("Spectrum visualizer unavailable: {}", e);
                self.binding = Binding::Failed {
                    source: source.clone(),
                };
                BindOutcome::Failed(e)
            }
        }
    }

    fn build_live(&self, source: &ElementOf<B>) -> Result<LiveGraph<B::Context, S>> {
        let graph = AnalysisGraph::build(&self.backend, source, &self.config)?;
        let snapshot = FrequencySnapshot::for_window(graph.analyser().fft_size())?;
        Ok(LiveGraph {
            graph,
            snapshot,
            surface: Rc::clone(&self.surface),
            pending: None,
            running: true,
            frames: 0,
        })
    }

    /// Release the current graph, if any; true when one was live
    fn teardown(&mut self) -> bool {
        match std::mem::replace(&mut self.binding, Binding::Unbound) {
            Binding::Bound { live, .. } => {
                live.borrow_mut().shut_down(&*self.scheduler);
                true
            }
            Binding::Unbound | Binding::Failed { .. } => false,
        }
    }
}

impl<B, S, F> Drop for SpectrumVisualizer<B, S, F>
where
    B: AudioBackend,
    S: DrawingSurface + 'static,
    F: FrameScheduler + 'static,
    B::Context: 'static,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Request the frame after this one for `live`
fn schedule_next<C, S, F>(live: &Rc<RefCell<LiveGraph<C, S>>>, scheduler: &Rc<F>)
where
    C: ProcessingContext + 'static,
    S: DrawingSurface + 'static,
    F: FrameScheduler + 'static,
{
    let weak = Rc::downgrade(live);
    let next_scheduler = Rc::clone(scheduler);
    let callback: FrameCallback = Box::new(move |timestamp| {
        let Some(live) = weak.upgrade() else {
            return;
        };
        let drawn = live.borrow_mut().render(timestamp);
        if drawn {
            schedule_next(&live, &next_scheduler);
        }
    });

    match scheduler.request_frame(callback) {
        Ok(handle) => live.borrow_mut().pending = Some(handle),
        Err(e) => warn!("Failed to schedule spectrum frame; render loop stopped: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Fill;
    use crate::layout::Rect;
    use crate::scheduler::QueueScheduler;
    use std::cell::Cell;

    #[derive(Default)]
    struct Stats {
        opened: Cell<u32>,
        closed: Cell<u32>,
        live: Cell<u32>,
        max_live: Cell<u32>,
    }

    struct FakeBackend {
        stats: Rc<Stats>,
        refuse: Cell<bool>,
    }

    struct FakeContext {
        stats: Rc<Stats>,
        closed: bool,
    }

    struct FakeAnalyser {
        level: u8,
    }

    impl Analyser for FakeAnalyser {
        fn fft_size(&self) -> usize {
            256
        }

        fn byte_frequency_data(&mut self, out: &mut [u8]) {
            out.fill(self.level);
        }
    }

    impl ProcessingContext for FakeContext {
        type Element = u8;
        type Analyser = FakeAnalyser;

        fn tap_source(&mut self, _element: &u8) -> Result<()> {
            Ok(())
        }

        fn create_analyser(&mut self, _config: &AnalyserConfig) -> Result<FakeAnalyser> {
            Ok(FakeAnalyser { level: 10 })
        }

        fn route_through(&mut self, _analyser: &mut FakeAnalyser) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            if !self.closed {
                self.closed = true;
                self.stats.closed.set(self.stats.closed.get() + 1);
                self.stats.live.set(self.stats.live.get() - 1);
            }
            Ok(())
        }

        fn is_closed(&self) -> bool {
            self.closed
        }
    }

    impl AudioBackend for FakeBackend {
        type Context = FakeContext;

        fn open_context(&self) -> Result<FakeContext> {
            if self.refuse.get() {
                return Err(VisualizerError::ContextUnavailable("refused".into()));
            }
            let stats = &self.stats;
            stats.opened.set(stats.opened.get() + 1);
            stats.live.set(stats.live.get() + 1);
            stats.max_live.set(stats.max_live.get().max(stats.live.get()));
            Ok(FakeContext {
                stats: Rc::clone(stats),
                closed: false,
            })
        }
    }

    struct CountingSurface {
        fills: usize,
    }

    impl DrawingSurface for CountingSurface {
        fn width(&self) -> u32 {
            800
        }

        fn height(&self) -> u32 {
            200
        }

        fn fill_rect(&mut self, _rect: Rect, _fill: Fill) {
            self.fills += 1;
        }
    }

    type Harness = (
        SpectrumVisualizer<FakeBackend, CountingSurface, QueueScheduler>,
        Rc<Stats>,
        Rc<RefCell<CountingSurface>>,
        Rc<QueueScheduler>,
    );

    fn harness() -> Harness {
        let stats = Rc::new(Stats::default());
        let backend = FakeBackend {
            stats: Rc::clone(&stats),
            refuse: Cell::new(false),
        };
        let surface = Rc::new(RefCell::new(CountingSurface { fills: 0 }));
        let scheduler = Rc::new(QueueScheduler::new());
        let visualizer =
            SpectrumVisualizer::new(backend, Rc::clone(&surface), Rc::clone(&scheduler));
        (visualizer, stats, surface, scheduler)
    }

    #[test]
    fn bind_draws_first_frame_and_schedules_next() {
        let (mut visualizer, stats, surface, scheduler) = harness();

        assert!(matches!(visualizer.bind(Some(&1)), BindOutcome::Bound));
        assert_eq!(stats.opened.get(), 1);
        assert_eq!(surface.borrow().fills, 129);
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.run_frame(16.0);
        assert_eq!(surface.borrow().fills, 258);
        assert_eq!(visualizer.frames_rendered(), 2);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn same_source_is_a_no_op() {
        let (mut visualizer, stats, _surface, _scheduler) = harness();
        visualizer.bind(Some(&1));
        assert!(matches!(visualizer.bind(Some(&1)), BindOutcome::Unchanged));
        assert_eq!(stats.opened.get(), 1);
        assert_eq!(stats.closed.get(), 0);
    }

    #[test]
    fn null_bind_cancels_and_closes_once() {
        let (mut visualizer, stats, surface, scheduler) = harness();
        visualizer.bind(Some(&1));
        visualizer.bind(None);
        visualizer.bind(None);

        assert_eq!(stats.closed.get(), 1);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.cancelled_count(), 1);

        let fills = surface.borrow().fills;
        scheduler.run_frame(16.0);
        assert_eq!(surface.borrow().fills, fills);
        assert_eq!(visualizer.state(), VisualizerState::Unbound);
    }

    #[test]
    fn construction_failure_is_not_retried_for_same_source() {
        let (mut visualizer, stats, surface, scheduler) = harness();
        visualizer.backend.refuse.set(true);

        assert!(matches!(visualizer.bind(Some(&1)), BindOutcome::Failed(_)));
        assert_eq!(visualizer.state(), VisualizerState::Failed);
        assert_eq!(surface.borrow().fills, 0);
        assert_eq!(scheduler.pending_count(), 0);

        visualizer.backend.refuse.set(false);
        assert!(matches!(visualizer.bind(Some(&1)), BindOutcome::Unchanged));
        assert!(matches!(visualizer.bind(Some(&2)), BindOutcome::Bound));
        assert_eq!(stats.opened.get(), 1);
    }

    #[test]
    fn drop_releases_graph() {
        let (mut visualizer, stats, _surface, scheduler) = harness();
        visualizer.bind(Some(&1));
        drop(visualizer);
        assert_eq!(stats.closed.get(), 1);
        assert_eq!(stats.live.get(), 0);
        assert_eq!(scheduler.run_frame(0.0), 0);
    }
}
