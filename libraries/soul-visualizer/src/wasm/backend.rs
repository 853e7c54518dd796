//! Web Audio backend

use super::js_error_message;
use crate::config::AnalyserConfig;
use crate::error::{Result, VisualizerError};
use crate::graph::{Analyser, AudioBackend, ProcessingContext};
use tracing::debug;
use web_sys::{AnalyserNode, AudioContext, HtmlAudioElement, MediaElementAudioSourceNode};

/// Opens a fresh `AudioContext` per graph
#[derive(Debug, Clone, Copy, Default)]
pub struct WebAudioBackend;

impl AudioBackend for WebAudioBackend {
    type Context = WebAudioContext;

    fn open_context(&self) -> Result<WebAudioContext> {
        let context = AudioContext::new()
            .map_err(|e| VisualizerError::ContextUnavailable(js_error_message(&e)))?;
        debug!("AudioContext opened");
        Ok(WebAudioContext {
            context,
            source: None,
            closed: false,
        })
    }
}

/// An `AudioContext` with at most one `MediaElementAudioSourceNode`
pub struct WebAudioContext {
    context: AudioContext,
    source: Option<MediaElementAudioSourceNode>,
    closed: bool,
}

impl WebAudioContext {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(VisualizerError::ContextClosed)
        } else {
            Ok(())
        }
    }
}

impl ProcessingContext for WebAudioContext {
    type Element = HtmlAudioElement;
    type Analyser = WebAnalyser;

    fn tap_source(&mut self, element: &HtmlAudioElement) -> Result<()> {
        self.ensure_open()?;
        // Throws InvalidStateError when the element already has a source node
        let source = self
            .context
            .create_media_element_source(element)
            .map_err(|e| VisualizerError::GraphConstruction(js_error_message(&e)))?;
        self.source = Some(source);
        Ok(())
    }

    fn create_analyser(&mut self, config: &AnalyserConfig) -> Result<WebAnalyser> {
        self.ensure_open()?;
        let node = self
            .context
            .create_analyser()
            .map_err(|e| VisualizerError::GraphConstruction(js_error_message(&e)))?;
        node.set_fft_size(config.fft_size as u32);
        node.set_smoothing_time_constant(config.smoothing_time_constant);
        Ok(WebAnalyser { node })
    }

    fn route_through(&mut self, analyser: &mut WebAnalyser) -> Result<()> {
        self.ensure_open()?;
        let source = self.source.as_ref().ok_or_else(|| {
            VisualizerError::GraphConstruction("no source tap to route".to_string())
        })?;
        source
            .connect_with_audio_node(&analyser.node)
            .map_err(|e| VisualizerError::GraphConstruction(js_error_message(&e)))?;
        analyser
            .node
            .connect_with_audio_node(&self.context.destination())
            .map_err(|e| VisualizerError::GraphConstruction(js_error_message(&e)))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.source = None;
        // The returned promise only reports completion
        self.context
            .close()
            .map(|_| debug!("AudioContext closed"))
            .map_err(|e| VisualizerError::ContextClose(js_error_message(&e)))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Platform `AnalyserNode`
pub struct WebAnalyser {
    node: AnalyserNode,
}

impl Analyser for WebAnalyser {
    fn fft_size(&self) -> usize {
        self.node.fft_size() as usize
    }

    fn frequency_bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }
}
