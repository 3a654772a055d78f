//! Turning directory entries into listing items

use std::fs::{self, Metadata};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use keymacro::{FileAttributes, ListingItem};

fn attributes(name: &str, metadata: &Metadata) -> FileAttributes {
    FileAttributes {
        read_only: metadata.permissions().readonly(),
        hidden: name.starts_with('.'),
        ..FileAttributes::default()
    }
}

/// Describe one file system entry
pub fn listing_item(name: &str, metadata: &Metadata) -> ListingItem {
    let base = if metadata.is_dir() {
        ListingItem::directory(name)
    } else {
        ListingItem::new(name).with_size(metadata.len())
    };
    let item = base.with_attributes(attributes(name, metadata));
    match metadata.modified() {
        Ok(time) => item.with_modified(DateTime::<Local>::from(time).naive_local()),
        Err(_) => item,
    }
}

/// Describe the file at `path`
pub fn listing_item_for_path(path: &Path) -> Result<ListingItem> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(listing_item(&name, &metadata))
}

/// All entries of `dir`, sorted by name
pub fn read_listing(dir: &Path) -> Result<Vec<ListingItem>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to read metadata of {}", entry.path().display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        items.push(listing_item(&name, &metadata));
    }
    items.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!("Read {} entries from {}", items.len(), dir.display());
    Ok(items)
}
