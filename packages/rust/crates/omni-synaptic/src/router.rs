//! Dispatch of `SynapticRoute` code blocks to the pipeline.

use crate::error::{SynapticError, SyntaxError};
use crate::graph::{NoteGraph, NoteRef, find_synaptic_blocks};
use crate::options::SynapticRouteOptions;
use crate::payload::SynapticPayload;
use crate::pipeline::compute_keyword_cloud;
use crate::settings::{RawSynapticSettings, SynapticSettings};
use serde::{Deserialize, Serialize};

const FAILED_MESSAGE: &str = "Error rendering keyword cloud";

/// Result of processing one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SynapticRouteOutcome {
    /// Pipeline ran; payload ready for rendering.
    Rendered {
        /// Renderer payload.
        payload: SynapticPayload,
    },
    /// Block options were rejected; every offending key is listed.
    SyntaxErrors {
        /// One entry per offending key.
        errors: Vec<SyntaxError>,
    },
    /// Anything else went wrong; a single user-facing message.
    Failed {
        /// User-facing message.
        message: String,
    },
}

/// Routes blocks through option parsing and aggregation with fixed settings.
#[derive(Debug)]
pub struct SynapticRouter {
    settings: Result<SynapticSettings, SynapticError>,
}

impl SynapticRouter {
    /// Router over validated settings.
    #[must_use]
    pub fn new(settings: SynapticSettings) -> Self {
        Self {
            settings: Ok(settings),
        }
    }

    /// Router over raw settings; invalid settings fail each block instead of
    /// the whole note.
    #[must_use]
    pub fn from_raw(raw: RawSynapticSettings) -> Self {
        Self {
            settings: SynapticSettings::try_from(raw),
        }
    }

    /// Process one block written in `focus`.
    #[must_use]
    pub fn process(
        &self,
        graph: &dyn NoteGraph,
        focus: &NoteRef,
        source: &str,
    ) -> SynapticRouteOutcome {
        let options = match SynapticRouteOptions::parse(source) {
            Ok(options) => options,
            Err(SynapticError::Syntax(errors)) => {
                return SynapticRouteOutcome::SyntaxErrors { errors };
            }
            Err(err) => return failed(&err),
        };
        let settings = match &self.settings {
            Ok(settings) => settings,
            Err(err) => return failed(err),
        };
        let entries = compute_keyword_cloud(graph, focus, &options, settings);
        SynapticRouteOutcome::Rendered {
            payload: SynapticPayload::new(options, settings, entries),
        }
    }

    /// Process every `SynapticRoute` block of a note, in document order.
    #[must_use]
    pub fn process_note(
        &self,
        graph: &dyn NoteGraph,
        focus: &NoteRef,
        markdown: &str,
    ) -> Vec<SynapticRouteOutcome> {
        find_synaptic_blocks(markdown)
            .iter()
            .map(|block| self.process(graph, focus, block))
            .collect()
    }
}

fn failed(err: &SynapticError) -> SynapticRouteOutcome {
    log::error!("{FAILED_MESSAGE}: {err}");
    SynapticRouteOutcome::Failed {
        message: format!("{FAILED_MESSAGE}: {err}"),
    }
}
