//! Vault indexing and settings resolution against on-disk vaults.

use omni_synaptic::{
    BacklinkScope, KeywordMatchStrategy, NoteGraph, NoteRef, SynapticError, SynapticRouteOutcome,
    SynapticRouter, VaultGraph, plugin_settings_path, resolve_synaptic_settings,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn sample_vault() -> Result<TempDir, Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let root = tmp.path();
    write_file(
        &root.join("Zettel/Focus.md"),
        "---\ntags: [zettel]\n---\n# Focus\n\nSee [[Alpha]] and [beta](../Refs/Beta.md).\n\n```SynapticRoute\ntype: table\n```\n",
    )?;
    write_file(
        &root.join("Zettel/Alpha.md"),
        "---\ntag: \"rust, systems\"\ntags:\n  - ownership\n---\nBody #rust text.\n",
    )?;
    write_file(
        &root.join("Refs/Beta.md"),
        "Links back to [[Focus]]. #rust #serde\n",
    )?;
    write_file(&root.join("Inbox/Loose.md"), "no links #draft\n")?;
    write_file(&root.join(".obsidian/workspace.md"), "[[Focus]] #hidden\n")?;
    write_file(&root.join("Refs/diagram.png"), "not a note")?;
    Ok(tmp)
}

#[test]
fn test_build_indexes_markdown_notes_only() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let graph = VaultGraph::build(tmp.path())?;
    let notes: Vec<String> = graph
        .list_all_notes()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        notes,
        vec!["Inbox/Loose.md", "Refs/Beta.md", "Zettel/Alpha.md", "Zettel/Focus.md"]
    );

    let stats = graph.stats();
    assert_eq!(stats.total_notes, 4);
    assert_eq!(stats.links_in_graph, 3);
    assert_eq!(stats.orphans, 1);
    assert_eq!(stats.malformed_notes, 0);
    Ok(())
}

#[test]
fn test_links_and_tags_are_extracted() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let graph = VaultGraph::build(tmp.path())?;
    let focus = NoteRef::new("Zettel/Focus.md");

    assert_eq!(
        graph.outbound_link_targets(&focus),
        vec![NoteRef::new("Zettel/Alpha.md"), NoteRef::new("Refs/Beta.md")]
    );
    assert_eq!(
        graph.inbound_link_sources(&focus),
        vec![NoteRef::new("Refs/Beta.md")]
    );
    assert_eq!(
        graph.tags(&NoteRef::new("Zettel/Alpha.md"))?,
        vec!["rust", "rust", "ownership"]
    );
    assert_eq!(graph.resolve_display_name("Beta"), Some(NoteRef::new("Refs/Beta.md")));
    assert_eq!(graph.resolve_display_name("Beta.md"), Some(NoteRef::new("Refs/Beta.md")));
    assert_eq!(graph.resolve_display_name("Gamma"), None);
    Ok(())
}

#[test]
fn test_build_rejects_missing_root() {
    let result = VaultGraph::build(Path::new("/definitely/not/a/vault"));
    assert!(matches!(result, Err(SynapticError::Io(_))));
}

#[test]
fn test_settings_merge_plugin_json_and_override() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    write_file(
        &plugin_settings_path(tmp.path()),
        r#"{"keywordSelectionMethod":"tags","keywordBacklinkType":"allNotes","excludeTags":["draft"]}"#,
    )?;
    let override_path = tmp.path().join("synaptic.yaml");
    write_file(
        &override_path,
        "keywordSelectionMethod: fileNamePrefix\nkeywordSelectionInput: Zettel/\n",
    )?;

    let plugin_only = resolve_synaptic_settings(tmp.path(), None)?;
    assert_eq!(plugin_only.backlink_scope, BacklinkScope::AllNotes);
    assert_eq!(plugin_only.exclusions.tags, vec!["draft"]);
    assert!(matches!(plugin_only.keyword_strategy, KeywordMatchStrategy::Tags));

    let merged = resolve_synaptic_settings(tmp.path(), Some(&override_path))?;
    assert_eq!(merged.backlink_scope, BacklinkScope::AllNotes);
    assert!(matches!(
        merged.keyword_strategy,
        KeywordMatchStrategy::FileNamePrefix(ref prefix) if prefix == "Zettel/"
    ));
    Ok(())
}

#[test]
fn test_settings_default_without_files() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    let settings = resolve_synaptic_settings(tmp.path(), None)?;
    assert_eq!(settings.backlink_scope, BacklinkScope::PermanentNotesOnly);
    assert!(!settings.lucy_zettelkasten);
    Ok(())
}

#[test]
fn test_settings_reject_undecodable_plugin_json() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = TempDir::new()?;
    write_file(&plugin_settings_path(tmp.path()), "{not json")?;
    let result = resolve_synaptic_settings(tmp.path(), None);
    assert!(matches!(result, Err(SynapticError::InvalidSettings(_))));
    Ok(())
}

#[test]
fn test_router_renders_block_from_vault() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = sample_vault()?;
    let graph = VaultGraph::build(tmp.path())?;
    let focus = NoteRef::new("Zettel/Focus.md");
    let markdown = fs::read_to_string(tmp.path().join(focus.as_str()))?;
    let router = SynapticRouter::new(resolve_synaptic_settings(tmp.path(), None)?);

    let outcomes = router.process_note(&graph, &focus, &markdown);
    assert_eq!(outcomes.len(), 1);
    let SynapticRouteOutcome::Rendered { payload } = &outcomes[0] else {
        return Err(format!("unexpected outcome: {:?}", outcomes[0]).into());
    };
    let ranked: Vec<(&str, usize)> = payload
        .entries
        .iter()
        .map(|entry| (entry.label.as_str(), entry.entry.score))
        .collect();
    assert_eq!(
        ranked,
        vec![("rust", 3), ("ownership", 1), ("serde", 1), ("zettel", 1)]
    );
    assert_eq!(payload.backlink_label, "Permanent Links");
    Ok(())
}
