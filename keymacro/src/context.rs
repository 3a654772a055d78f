//! Caller data available to the expander
//!
//! An [`ExpansionContext`] is a read-only snapshot assembled by the caller for
//! one expansion: the current item, the listed file, panel paths, selection
//! lists, the compare pair, the application directory and a way to read
//! environment variables. Anything the caller leaves out expands to empty
//! text.

use crate::keywords::PanelRef;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Source of environment variable values
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables, used by tests and by callers that sandbox expansion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl Environment for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The item under the cursor or the item currently being processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentItem {
    pub full_name: String,
    /// Short 8.3 alias, when the file system provides one
    pub dos_full_name: Option<String>,
}

impl CurrentItem {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            dos_full_name: None,
        }
    }

    pub fn with_dos_name(mut self, dos_full_name: impl Into<String>) -> Self {
        self.dos_full_name = Some(dos_full_name.into());
        self
    }

    /// The DOS name, falling back to the long name
    pub fn dos_or_long(&self) -> &str {
        self.dos_full_name.as_deref().unwrap_or(&self.full_name)
    }
}

/// Attribute bits shown by `$(FileAttributes)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributes {
    pub read_only: bool,
    pub hidden: bool,
    pub system: bool,
    pub archive: bool,
    pub compressed: bool,
    pub encrypted: bool,
}

impl FileAttributes {
    /// Letters `RHSACE` for the bits that are set, in that order
    pub fn letters(&self) -> String {
        [
            (self.read_only, 'R'),
            (self.hidden, 'H'),
            (self.system, 'S'),
            (self.archive, 'A'),
            (self.compressed, 'C'),
            (self.encrypted, 'E'),
        ]
        .into_iter()
        .filter_map(|(set, letter)| set.then_some(letter))
        .collect()
    }
}

/// One entry of a listing, for info-line and file-list templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    /// Name without directory
    pub name: String,
    pub dos_name: Option<String>,
    pub is_dir: bool,
    /// Metadata such as the DOS name and attributes is only meaningful on disk
    pub is_disk: bool,
    /// Size in bytes; directories usually have none
    pub size: Option<u64>,
    pub modified: Option<NaiveDateTime>,
    pub attributes: FileAttributes,
}

impl ListingItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dos_name: None,
            is_dir: false,
            is_disk: true,
            size: None,
            modified: None,
            attributes: FileAttributes::default(),
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            is_dir: true,
            ..Self::new(name)
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_modified(mut self, modified: NaiveDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_dos_name(mut self, dos_name: impl Into<String>) -> Self {
        self.dos_name = Some(dos_name.into());
        self
    }

    pub fn with_attributes(mut self, attributes: FileAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Mark the item as coming from an archive or plugin file system
    pub fn off_disk(mut self) -> Self {
        self.is_disk = false;
        self
    }
}

/// Which panel has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSide {
    #[default]
    Left,
    Right,
}

impl PanelSide {
    pub fn other(self) -> Self {
        match self {
            PanelSide::Left => PanelSide::Right,
            PanelSide::Right => PanelSide::Left,
        }
    }
}

/// Paths shown in the two panels; `None` when a panel has no disk path
/// (search results, archives, plugin file systems)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPaths {
    pub left: Option<String>,
    pub right: Option<String>,
    pub active: PanelSide,
}

impl PanelPaths {
    fn side(&self, side: PanelSide) -> Option<&str> {
        match side {
            PanelSide::Left => self.left.as_deref(),
            PanelSide::Right => self.right.as_deref(),
        }
    }

    pub fn path(&self, panel: PanelRef) -> Option<&str> {
        match panel {
            PanelRef::Left => self.side(PanelSide::Left),
            PanelRef::Right => self.side(PanelSide::Right),
            PanelRef::Inactive => self.side(self.active.other()),
        }
    }
}

/// Pre-joined list of selected names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionList {
    #[default]
    Empty,
    /// The joined list exceeded the caller's limit
    TooLong,
    Text(String),
}

impl SelectionList {
    /// Join names with spaces, quoting names that contain a space
    pub fn from_names<I, S>(names: I, max_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for name in names {
            let name = name.as_ref();
            if !joined.is_empty() {
                joined.push(' ');
            }
            if name.contains(' ') {
                joined.push('"');
                joined.push_str(name);
                joined.push('"');
            } else {
                joined.push_str(name);
            }
            if joined.len() > max_len {
                return SelectionList::TooLong;
            }
        }

        if joined.is_empty() {
            SelectionList::Empty
        } else {
            SelectionList::Text(joined)
        }
    }

    /// The text to substitute; empty for an empty or oversized list
    pub fn as_str(&self) -> &str {
        match self {
            SelectionList::Text(text) => text,
            SelectionList::Empty | SelectionList::TooLong => "",
        }
    }
}

/// Two items chosen for comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparePair {
    /// Full name from the active panel
    pub first: String,
    /// Full name from the inactive panel
    pub second: String,
    pub are_dirs: bool,
    /// `first` comes from the right panel
    pub reversed: bool,
}

/// Snapshot of everything a template can reference
pub struct ExpansionContext {
    pub current: Option<CurrentItem>,
    pub listing: Option<ListingItem>,
    /// Directory of the listing, used by `$(FilePath)` and `$(FileFullName)`
    pub listing_dir: Option<String>,
    pub panels: PanelPaths,
    pub selected_names: SelectionList,
    pub selected_full_names: SelectionList,
    pub compare: Option<ComparePair>,
    pub app_dir: String,
    environment: Box<dyn Environment>,
}

impl Default for ExpansionContext {
    fn default() -> Self {
        Self {
            current: None,
            listing: None,
            listing_dir: None,
            panels: PanelPaths::default(),
            selected_names: SelectionList::Empty,
            selected_full_names: SelectionList::Empty,
            compare: None,
            app_dir: String::new(),
            environment: Box::new(ProcessEnvironment),
        }
    }
}

impl fmt::Debug for ExpansionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionContext")
            .field("current", &self.current)
            .field("listing", &self.listing)
            .field("listing_dir", &self.listing_dir)
            .field("panels", &self.panels)
            .field("selected_names", &self.selected_names)
            .field("selected_full_names", &self.selected_full_names)
            .field("compare", &self.compare)
            .field("app_dir", &self.app_dir)
            .finish_non_exhaustive()
    }
}

impl ExpansionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current(mut self, current: CurrentItem) -> Self {
        self.current = Some(current);
        self
    }

    pub fn with_listing(mut self, listing: ListingItem) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_listing_dir(mut self, dir: impl Into<String>) -> Self {
        self.listing_dir = Some(dir.into());
        self
    }

    pub fn with_panels(mut self, panels: PanelPaths) -> Self {
        self.panels = panels;
        self
    }

    pub fn with_selection(mut self, names: SelectionList, full_names: SelectionList) -> Self {
        self.selected_names = names;
        self.selected_full_names = full_names;
        self
    }

    pub fn with_compare(mut self, compare: ComparePair) -> Self {
        self.compare = Some(compare);
        self
    }

    pub fn with_app_dir(mut self, app_dir: impl Into<String>) -> Self {
        self.app_dir = app_dir.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    /// Replace the listed item, keeping everything else
    pub fn set_listing(&mut self, listing: ListingItem) {
        self.listing = Some(listing);
    }

    pub fn env_var(&self, name: &str) -> Option<String> {
        self.environment.var(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_list_quotes_names_with_spaces() {
        let list = SelectionList::from_names(["a.txt", "my file.txt", "b"], 100);
        assert_eq!(list.as_str(), "a.txt \"my file.txt\" b");
    }

    #[test]
    fn test_selection_list_limits() {
        assert_eq!(
            SelectionList::from_names(Vec::<String>::new(), 10),
            SelectionList::Empty
        );
        assert_eq!(
            SelectionList::from_names(["abc", "def"], 7),
            SelectionList::Text("abc def".into())
        );
        let too_long = SelectionList::from_names(["abc", "def"], 6);
        assert_eq!(too_long, SelectionList::TooLong);
        assert_eq!(too_long.as_str(), "");
    }

    #[test]
    fn test_inactive_panel_follows_active_side() {
        let mut panels = PanelPaths {
            left: Some("/l".into()),
            right: None,
            active: PanelSide::Left,
        };
        assert_eq!(panels.path(PanelRef::Inactive), None);
        panels.active = PanelSide::Right;
        assert_eq!(panels.path(PanelRef::Inactive), Some("/l"));
        assert_eq!(panels.path(PanelRef::Left), Some("/l"));
    }

    #[test]
    fn test_attribute_letters() {
        let attrs = FileAttributes {
            read_only: true,
            archive: true,
            encrypted: true,
            ..FileAttributes::default()
        };
        assert_eq!(attrs.letters(), "RAE");
        assert_eq!(FileAttributes::default().letters(), "");
    }

    #[test]
    fn test_map_environment() {
        let ctx = ExpansionContext::new()
            .with_environment(MapEnvironment::new().with("HOME", "/home/u"));
        assert_eq!(ctx.env_var("HOME").as_deref(), Some("/home/u"));
        assert_eq!(ctx.env_var("PATH"), None);
    }

    #[test]
    fn test_current_item_dos_fallback() {
        let item = CurrentItem::new("C:\\Program Files\\app.exe");
        assert_eq!(item.dos_or_long(), "C:\\Program Files\\app.exe");
        let item = item.with_dos_name("C:\\PROGRA~1\\app.exe");
        assert_eq!(item.dos_or_long(), "C:\\PROGRA~1\\app.exe");
    }
}
