//! omni-synaptic - Keyword aggregation over a markdown note-link graph
//!
//! Features:
//! - Validated `SynapticRoute` block options with exhaustive syntax errors
//! - Local (one-hop, optionally literature → permanent) or vault-wide scope
//! - Tag or linked-note keywords, ranked by frequency with backlink counts
//! - Log-scaled cloud factors (1..=7) for word cloud rendering
//!
//! # Architecture
//!
//! ```text
//! omni-synaptic/src/
//! ├── lib.rs       # Re-exports (this file)
//! ├── error.rs     # SynapticError, SyntaxError
//! ├── options.rs   # SynapticRouteOptions parsing/validation
//! ├── settings.rs  # Plugin settings loading and validation
//! ├── graph/       # NoteGraph trait, NoteRef, VaultGraph + markdown parser
//! ├── pipeline/    # Selection, exclusion, extraction, ranking, scaling
//! ├── payload.rs   # Renderer payload
//! └── router.rs    # Code block dispatch
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_synaptic::{NoteRef, SynapticRouter, VaultGraph, resolve_synaptic_settings};
//!
//! let graph = VaultGraph::build(vault)?;
//! let router = SynapticRouter::new(resolve_synaptic_settings(vault, None)?);
//! let outcome = router.process(&graph, &NoteRef::new("Zettel/Idea.md"), "type: table");
//! ```

mod error;
mod graph;
mod options;
mod payload;
pub mod pipeline;
mod router;
mod settings;

pub use error::{SynapticError, SyntaxError};
pub use graph::{
    NoteGraph, NoteRef, VaultGraph, VaultGraphStats, find_synaptic_blocks, is_supported_note,
};
pub use options::{
    ChartKind, RenderKind, SynapticRouteOptions, Theme, parse_option_block, validate_options,
};
pub use payload::{ChartDataset, PayloadEntry, SynapticPayload, keyword_label};
pub use pipeline::{
    BacklinkScope, ExclusionRules, KeywordCloudEntry, KeywordMatchStrategy, NoteClassPredicate,
    compute_keyword_cloud,
};
pub use router::{SynapticRouteOutcome, SynapticRouter};
pub use settings::{
    KeywordSelectionMethod, NoteSelectionMethod, PLUGIN_SETTINGS_RELATIVE_PATH,
    RawSynapticSettings, SynapticSettings, plugin_settings_path, resolve_synaptic_settings,
};
