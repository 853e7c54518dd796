//! Platform-agnostic audio analysis graph
//!
//! The platform supplies three pieces through traits:
//! - [`AudioBackend`] opens processing contexts (a scarce platform resource)
//! - [`ProcessingContext`] builds the Source Tap → Analyser → Output Sink chain
//! - [`Analyser`] fills a byte magnitude buffer on demand
//!
//! [`AnalysisGraph`] owns a context for as long as it lives and closes it on
//! every exit path, including a failure halfway through construction.

use crate::config::AnalyserConfig;
use crate::error::Result;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// Frequency-domain analyser node
pub trait Analyser {
    /// Window size in samples
    fn fft_size(&self) -> usize;

    /// Number of magnitude bins (half the window)
    fn frequency_bin_count(&self) -> usize {
        self.fft_size() / 2
    }

    /// Write the current byte magnitudes into `out`
    ///
    /// `out` should hold `frequency_bin_count()` bytes; extra bytes are left
    /// untouched and missing bins are dropped.
    fn byte_frequency_data(&mut self, out: &mut [u8]);
}

/// A platform audio processing context
///
/// Each context taps at most one media element. Implementations must make
/// `close` idempotent.
pub trait ProcessingContext {
    /// Playable media element handle; equality is reference identity
    type Element: Clone + PartialEq;

    /// Analyser node created by this context
    type Analyser: Analyser;

    /// Create the Source Tap for `element`
    ///
    /// Fails when the platform refuses a second tap on the same element.
    fn tap_source(&mut self, element: &Self::Element) -> Result<()>;

    /// Create an analyser node
    fn create_analyser(&mut self, config: &AnalyserConfig) -> Result<Self::Analyser>;

    /// Link Source Tap → analyser → speaker destination
    fn route_through(&mut self, analyser: &mut Self::Analyser) -> Result<()>;

    /// Close the context, releasing every node it created
    fn close(&mut self) -> Result<()>;

    /// Whether `close` has run
    fn is_closed(&self) -> bool;
}

/// Opens processing contexts
pub trait AudioBackend {
    type Context: ProcessingContext;

    /// Open a new processing context
    fn open_context(&self) -> Result<Self::Context>;
}

/// Media element type accepted by a backend
pub type ElementOf<B> = <<B as AudioBackend>::Context as ProcessingContext>::Element;

/// Closes the wrapped context when dropped
pub struct ContextGuard<C: ProcessingContext> {
    context: C,
}

impl<C: ProcessingContext> ContextGuard<C> {
    pub fn new(context: C) -> Self {
        Self { context }
    }
}

impl<C: ProcessingContext> Deref for ContextGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.context
    }
}

impl<C: ProcessingContext> DerefMut for ContextGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.context
    }
}

impl<C: ProcessingContext> Drop for ContextGuard<C> {
    fn drop(&mut self) {
        if !self.context.is_closed() {
            if let Err(e) = self.context.close() {
                warn!("Failed to close audio context: {}", e);
            }
        }
    }
}

/// A live Source Tap → Analyser → Output Sink chain and its context
pub struct AnalysisGraph<C: ProcessingContext> {
    analyser: C::Analyser,
    context: ContextGuard<C>,
}

impl<C: ProcessingContext> AnalysisGraph<C> {
    /// Open a context on `backend` and wire `element` through a new analyser
    ///
    /// On error every resource acquired so far has already been released.
    pub fn build<B>(backend: &B, element: &C::Element, config: &AnalyserConfig) -> Result<Self>
    where
        B: AudioBackend<Context = C>,
    {
        config.validate()?;

        let mut context = ContextGuard::new(backend.open_context()?);
        context.tap_source(element)?;
        let mut analyser = context.create_analyser(config)?;
        context.route_through(&mut analyser)?;

        debug!(
            "Analysis graph built: fft_size={}, bins={}",
            analyser.fft_size(),
            analyser.frequency_bin_count()
        );

        Ok(Self { analyser, context })
    }

    pub fn analyser(&self) -> &C::Analyser {
        &self.analyser
    }

    pub fn analyser_mut(&mut self) -> &mut C::Analyser {
        &mut self.analyser
    }

    /// Close the context (idempotent)
    pub fn close(&mut self) -> Result<()> {
        if self.context.is_closed() {
            return Ok(());
        }
        self.context.close()
    }

    pub fn is_closed(&self) -> bool {
        self.context.is_closed()
    }
}
