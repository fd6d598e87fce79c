//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands, plus
//! the file loading and report rendering they share.

use super::ExportFormat;
use archplan_core::{
    ArchplanError, Dataset, EntityKind, Goal, KnowledgeBase, MaterialQuantity, MaterialSource,
    MaterialStorage, SnapshotHeader, dataset_from_bytes, dataset_to_bytes,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a dataset file (64 MB).
const MAX_DATASET_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Maximum size of a material storage file (4 MB).
const MAX_STORAGE_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Validate file path and size, then read it.
///
/// The path is canonicalized (resolving symlinks and "..") and must name a
/// regular file no larger than `max_size`.
fn read_input_file(path: &Path, max_size: u64) -> Result<Vec<u8>, ArchplanError> {
    let canonical = path.canonicalize().map_err(|e| {
        ArchplanError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ArchplanError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| ArchplanError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > max_size {
        return Err(ArchplanError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }

    std::fs::read(&canonical)
        .map_err(|e| ArchplanError::IoError(format!("Read file '{}': {}", path.display(), e)))
}

/// Validate output path.
///
/// The parent directory must exist; the returned path joins the
/// canonical parent with the original file name.
fn validate_output_path(path: &Path) -> Result<PathBuf, ArchplanError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ArchplanError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(ArchplanError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| ArchplanError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

// =============================================================================
// LOADING
// =============================================================================

/// Load a dataset file.
///
/// Snapshots are recognised by their magic bytes; `.json` files (or text
/// starting with `{`) are JSON; anything else is TOML.
pub fn load_dataset(path: &Path) -> Result<Dataset, ArchplanError> {
    let bytes = read_input_file(path, MAX_DATASET_FILE_SIZE)?;

    if SnapshotHeader::matches(&bytes) {
        tracing::debug!(path = %path.display(), "Reading dataset snapshot");
        return dataset_from_bytes(&bytes);
    }

    let looks_like_json = bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'{');
    if has_extension(path, "json") || looks_like_json {
        tracing::debug!(path = %path.display(), "Reading JSON dataset");
        return Dataset::from_json_slice(&bytes);
    }

    let text = std::str::from_utf8(&bytes).map_err(|e| {
        ArchplanError::DeserializationError(format!("Dataset is not valid UTF-8: {}", e))
    })?;
    tracing::debug!(path = %path.display(), "Reading TOML dataset");
    Dataset::from_toml_str(text)
}

/// Load a material storage file (TOML, or JSON for `.json` files).
///
/// ```toml
/// [materials]
/// "Everlight silvthril" = 100
/// Goldrune = 48
/// ```
pub fn load_storage(path: &Path) -> Result<MaterialStorage, ArchplanError> {
    let bytes = read_input_file(path, MAX_STORAGE_FILE_SIZE)?;

    if has_extension(path, "json") {
        return serde_json::from_slice(&bytes)
            .map_err(|e| ArchplanError::DeserializationError(format!("Invalid storage: {}", e)));
    }

    let text = std::str::from_utf8(&bytes).map_err(|e| {
        ArchplanError::DeserializationError(format!("Storage is not valid UTF-8: {}", e))
    })?;
    toml::from_str(text)
        .map_err(|e| ArchplanError::DeserializationError(format!("Invalid storage: {}", e)))
}

// =============================================================================
// PLAN COMMAND
// =============================================================================

/// Build a goal from collection and artefact names.
///
/// Collections are resolved immediately; artefacts are resolved when the
/// report is computed.
pub fn build_goal(
    knowledge: &KnowledgeBase,
    collections: &[String],
    artefacts: &[String],
) -> Result<Goal, ArchplanError> {
    let mut goal = Goal::new();

    for collection in collections {
        goal.add_collection(knowledge, collection)?;
    }
    for artefact in artefacts {
        goal.add_artefact(artefact.as_str());
    }

    Ok(goal)
}

/// Render a shortfall report as an aligned text table.
pub fn render_report(needed: &[MaterialQuantity]) -> String {
    if needed.is_empty() {
        return "Nothing left to gather.\n".to_string();
    }

    let width = needed
        .iter()
        .map(|entry| entry.material.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in needed {
        let _ = writeln!(out, "  {:<width$}  {:>6}", entry.material, entry.quantity);
    }
    out
}

/// Compute and print the materials still needed.
pub fn cmd_plan(
    knowledge: &KnowledgeBase,
    json_mode: bool,
    collections: &[String],
    artefacts: &[String],
    storage_path: Option<&Path>,
) -> Result<(), ArchplanError> {
    let goal = build_goal(knowledge, collections, artefacts)?;
    tracing::info!(
        artefacts = goal.artefacts().count(),
        restorations = goal.total_restorations(),
        "Goal built"
    );

    let storage = storage_path.map(load_storage).transpose()?;
    if let (Some(path), Some(storage)) = (storage_path, &storage) {
        tracing::info!(path = %path.display(), materials = storage.len(), "Loaded storage");
    }

    let needed = goal.materials_needed(
        knowledge,
        storage.as_ref().map(|s| s as &dyn MaterialSource),
    )?;

    if json_mode {
        let requested: serde_json::Map<String, serde_json::Value> = goal
            .artefacts()
            .map(|(name, count)| (name.to_string(), count.into()))
            .collect();
        let output = serde_json::json!({
            "goal": requested,
            "storage_applied": storage.is_some(),
            "materials_needed": needed,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "Restoring {} artefact(s), {} restoration(s) in total",
        goal.artefacts().count(),
        goal.total_restorations()
    );
    if storage.is_some() {
        println!("Owned materials subtracted.");
    }
    println!();
    print!("{}", render_report(&needed));

    Ok(())
}

// =============================================================================
// SHOW COMMAND
// =============================================================================

/// Describe one definition as text, or fail with `NotFound`.
pub fn describe(
    knowledge: &KnowledgeBase,
    kind: EntityKind,
    name: &str,
) -> Result<String, ArchplanError> {
    let mut out = String::new();

    match kind {
        EntityKind::Material => {
            let material = knowledge
                .get_material(name)
                .ok_or_else(|| ArchplanError::not_found(kind, name))?;
            let used_by: Vec<&str> = knowledge
                .artefacts()
                .filter(|artefact| artefact.quantity_of(material.name()).is_some())
                .map(|artefact| artefact.name())
                .collect();

            let _ = writeln!(out, "Material: {}", material.name());
            let _ = writeln!(out, "Used by:  {}", list_or_none(&used_by));
        }
        EntityKind::Artefact => {
            let artefact = knowledge.require_artefact(name)?;
            let in_collections: Vec<&str> = knowledge
                .collections()
                .filter(|collection| collection.contains(artefact.name()))
                .map(|collection| collection.name())
                .collect();

            let _ = writeln!(out, "Artefact: {}", artefact.name());
            let _ = writeln!(out, "Collections: {}", list_or_none(&in_collections));
            let _ = writeln!(out, "Materials per restoration:");
            if artefact.required_materials().is_empty() {
                let _ = writeln!(out, "  (none)");
            } else {
                out.push_str(&render_report(artefact.required_materials()));
            }
        }
        EntityKind::Collection => {
            let collection = knowledge.require_collection(name)?;

            let _ = writeln!(out, "Collection: {}", collection.name());
            let _ = writeln!(out, "Artefacts:");
            for artefact in collection.artefacts() {
                let marker = if knowledge.get_artefact(artefact).is_some() {
                    ""
                } else {
                    " (unregistered)"
                };
                let _ = writeln!(out, "  {}{}", artefact, marker);
            }
        }
    }

    Ok(out)
}

fn list_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

/// Print one definition.
pub fn cmd_show(
    knowledge: &KnowledgeBase,
    json_mode: bool,
    kind: EntityKind,
    name: &str,
) -> Result<(), ArchplanError> {
    if json_mode {
        let value = match kind {
            EntityKind::Material => knowledge
                .get_material(name)
                .map(serde_json::to_value),
            EntityKind::Artefact => knowledge
                .get_artefact(name)
                .map(serde_json::to_value),
            EntityKind::Collection => knowledge
                .get_collection(name)
                .map(serde_json::to_value),
        }
        .ok_or_else(|| ArchplanError::not_found(kind, name))?
        .map_err(|e| ArchplanError::SerializationError(e.to_string()))?;

        println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        return Ok(());
    }

    print!("{}", describe(knowledge, kind, name)?);
    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show knowledge base counts.
pub fn cmd_status(
    knowledge: &KnowledgeBase,
    json_mode: bool,
    data: Option<&Path>,
) -> Result<(), ArchplanError> {
    let dangling = knowledge.dangling_references().len();

    if json_mode {
        let output = serde_json::json!({
            "data": data.map(|p| p.to_string_lossy().into_owned()),
            "materials": knowledge.material_count(),
            "artefacts": knowledge.artefact_count(),
            "collections": knowledge.collection_count(),
            "dangling_references": dangling,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Archplan Knowledge Base");
    println!("=======================");
    match data {
        Some(path) => println!("Dataset: {:?}", path),
        None => println!("Dataset: (none)"),
    }
    println!();
    println!("Materials:   {}", knowledge.material_count());
    println!("Artefacts:   {}", knowledge.artefact_count());
    println!("Collections: {}", knowledge.collection_count());
    println!("Dangling:    {}", dangling);

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Report dangling references. Fails if any exist.
pub fn cmd_check(knowledge: &KnowledgeBase, json_mode: bool) -> Result<(), ArchplanError> {
    let dangling = knowledge.dangling_references();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&dangling).unwrap_or_default()
        );
    } else if dangling.is_empty() {
        println!("All references resolve.");
    } else {
        for reference in &dangling {
            println!(
                "{} '{}' -> unregistered {} '{}'",
                reference.owner_kind,
                reference.owner,
                reference.missing_kind.to_string().to_lowercase(),
                reference.missing
            );
        }
    }

    if dangling.is_empty() {
        Ok(())
    } else {
        Err(ArchplanError::InvalidDefinition(format!(
            "{} dangling reference(s)",
            dangling.len()
        )))
    }
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Encode the knowledge base contents in the requested format.
pub fn encode_dataset(
    knowledge: &KnowledgeBase,
    format: ExportFormat,
) -> Result<Vec<u8>, ArchplanError> {
    let dataset = Dataset::from_knowledge_base(knowledge);

    match format {
        ExportFormat::Snapshot => dataset_to_bytes(&dataset),
        ExportFormat::Json => dataset.to_json_vec(),
        ExportFormat::Toml => dataset.to_toml_string().map(String::into_bytes),
    }
}

/// Export the loaded dataset.
pub fn cmd_export(
    knowledge: &KnowledgeBase,
    output: &Path,
    format: ExportFormat,
) -> Result<(), ArchplanError> {
    let validated_output = validate_output_path(output)?;
    let data = encode_dataset(knowledge, format)?;

    std::fs::write(&validated_output, &data)
        .map_err(|e| ArchplanError::IoError(format!("Write file: {}", e)))?;

    tracing::info!(path = %validated_output.display(), bytes = data.len(), ?format, "Exported dataset");
    println!("Exported {} bytes to {:?}", data.len(), validated_output);

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
