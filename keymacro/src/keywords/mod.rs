//! Keyword tables
//!
//! Every kind of template (user-menu arguments, hot path, generated file
//! list, ...) has its own fixed table of keywords. The tables are plain
//! `static` data: built at compile time, never mutated, and safe to share
//! between threads without synchronization.
//!
//! A table also carries the structural entries (separators, submenus, browse
//! and help items) the menu front end needs. Those entries and the literal
//! snippets (regular-expression helpers, the environment variable skeleton)
//! are never matched by [`KeywordTable::lookup`].

mod tables;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use tables::{
    ARGUMENTS, COMMAND, HOT_PATH, INFO_LINE, INIT_DIR, MAKE_FILE_LIST, REGULAR_EXPRESSION,
    USER_MENU_ARGUMENTS,
};

/// The kind of template a keyword table belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateContext {
    UserMenuArguments,
    HotPath,
    Command,
    Arguments,
    InitDir,
    InfoLine,
    MakeFileList,
    RegularExpression,
}

impl TemplateContext {
    pub const ALL: [TemplateContext; 8] = [
        TemplateContext::UserMenuArguments,
        TemplateContext::HotPath,
        TemplateContext::Command,
        TemplateContext::Arguments,
        TemplateContext::InitDir,
        TemplateContext::InfoLine,
        TemplateContext::MakeFileList,
        TemplateContext::RegularExpression,
    ];

    /// The keyword table for this context
    pub fn table(self) -> &'static KeywordTable {
        match self {
            TemplateContext::UserMenuArguments => &USER_MENU_ARGUMENTS,
            TemplateContext::HotPath => &HOT_PATH,
            TemplateContext::Command => &COMMAND,
            TemplateContext::Arguments => &ARGUMENTS,
            TemplateContext::InitDir => &INIT_DIR,
            TemplateContext::InfoLine => &INFO_LINE,
            TemplateContext::MakeFileList => &MAKE_FILE_LIST,
            TemplateContext::RegularExpression => &REGULAR_EXPRESSION,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateContext::UserMenuArguments => "user-menu-arguments",
            TemplateContext::HotPath => "hot-path",
            TemplateContext::Command => "command",
            TemplateContext::Arguments => "arguments",
            TemplateContext::InitDir => "init-dir",
            TemplateContext::InfoLine => "info-line",
            TemplateContext::MakeFileList => "make-file-list",
            TemplateContext::RegularExpression => "regular-expression",
        }
    }
}

impl fmt::Display for TemplateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateContext::ALL
            .into_iter()
            .find(|ctx| ctx.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown template context: {}", s))
    }
}

/// How a picked menu entry is inserted into the edit control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertFlag {
    /// Replace the whole edit text instead of only the selection
    ReplaceAll,
    /// Leave the cursor one character before the end of the inserted text
    CursorBeforeEnd1,
    /// Leave the cursor two characters before the end of the inserted text
    CursorBeforeEnd2,
    /// Insert as a `$(keyword)` reference
    WrapAsVariable,
    /// Do not hand focus back to the edit control afterwards
    SuppressRefocus,
}

impl InsertFlag {
    pub const ALL: [InsertFlag; 5] = [
        InsertFlag::ReplaceAll,
        InsertFlag::CursorBeforeEnd1,
        InsertFlag::CursorBeforeEnd2,
        InsertFlag::WrapAsVariable,
        InsertFlag::SuppressRefocus,
    ];

    const fn bit(self) -> u8 {
        match self {
            InsertFlag::ReplaceAll => 0x01,
            InsertFlag::CursorBeforeEnd1 => 0x02,
            InsertFlag::CursorBeforeEnd2 => 0x04,
            InsertFlag::WrapAsVariable => 0x08,
            InsertFlag::SuppressRefocus => 0x10,
        }
    }
}

/// Small set of [`InsertFlag`]s
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InsertFlags(u8);

impl InsertFlags {
    pub const EMPTY: InsertFlags = InsertFlags(0);

    pub const fn with(self, flag: InsertFlag) -> Self {
        InsertFlags(self.0 | flag.bit())
    }

    pub const fn contains(self, flag: InsertFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = InsertFlag> {
        InsertFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl fmt::Debug for InsertFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for InsertFlags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Which side of a panel pair a panel-path keyword reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelRef {
    Left,
    Right,
    Inactive,
}

/// What a compare keyword expects the compare pair to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareKind {
    File,
    Dir,
    FileOrDir,
}

/// Whether a compare keyword names its operands by panel position or by focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparePairing {
    LeftRight,
    ActiveInactive,
}

/// First operand is left/active, second is right/inactive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareSide {
    First,
    Second,
}

/// A compare keyword, fully classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CompareRef {
    pub kind: CompareKind,
    pub pairing: ComparePairing,
    pub side: CompareSide,
}

/// Semantic class of a keyword, declared per keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordClass {
    /// Name of the single current item; forces one-by-one processing
    PerItem,
    /// Location of the current item (directory, drive)
    ItemLocation,
    /// List covering the whole selection; forces group processing
    Selection { full_names: bool },
    /// Path shown in one of the panels
    PanelPath(PanelRef),
    /// Operand of a two-item comparison; forces group processing
    Compare(CompareRef),
    /// Application-wide value independent of the panels
    Program,
    /// Field of the listed file (info line, generated file list)
    Listing,
}

impl KeywordClass {
    /// Whether the value comes from the file system context of the caller
    pub fn uses_file_context(self) -> bool {
        !matches!(self, KeywordClass::Program)
    }
}

/// Identity of a substitutable keyword, independent of the table it sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KeywordId {
    FullName,
    Name,
    NamePart,
    ExtPart,
    DosFullName,
    DosName,
    DosNamePart,
    DosExtPart,
    FullPath,
    DosFullPath,
    Drive,
    ListOfSelectedNames,
    ListOfSelectedFullNames,
    FullPathLeft,
    FullPathRight,
    FullPathInactive,
    FileToCompareLeft,
    FileToCompareRight,
    FileToCompareActive,
    FileToCompareInactive,
    DirToCompareLeft,
    DirToCompareRight,
    DirToCompareActive,
    DirToCompareInactive,
    FileOrDirToCompareLeft,
    FileOrDirToCompareRight,
    FileOrDirToCompareActive,
    FileOrDirToCompareInactive,
    AppDir,
    FileName,
    FileNamePart,
    FileExtPart,
    DosFileName,
    FileSize,
    FileDate,
    FileTime,
    FileAttributes,
    FilePath,
    FileFullName,
}

impl KeywordId {
    pub fn class(self) -> KeywordClass {
        use CompareKind::*;
        use ComparePairing::*;
        use CompareSide::*;
        use KeywordId::*;

        let compare = |kind, pairing, side| {
            KeywordClass::Compare(CompareRef {
                kind,
                pairing,
                side,
            })
        };

        match self {
            FullName | Name | NamePart | ExtPart | DosFullName | DosName | DosNamePart
            | DosExtPart => KeywordClass::PerItem,
            FullPath | DosFullPath | Drive => KeywordClass::ItemLocation,
            ListOfSelectedNames => KeywordClass::Selection { full_names: false },
            ListOfSelectedFullNames => KeywordClass::Selection { full_names: true },
            FullPathLeft => KeywordClass::PanelPath(PanelRef::Left),
            FullPathRight => KeywordClass::PanelPath(PanelRef::Right),
            FullPathInactive => KeywordClass::PanelPath(PanelRef::Inactive),
            FileToCompareLeft => compare(File, LeftRight, First),
            FileToCompareRight => compare(File, LeftRight, Second),
            FileToCompareActive => compare(File, ActiveInactive, First),
            FileToCompareInactive => compare(File, ActiveInactive, Second),
            DirToCompareLeft => compare(Dir, LeftRight, First),
            DirToCompareRight => compare(Dir, LeftRight, Second),
            DirToCompareActive => compare(Dir, ActiveInactive, First),
            DirToCompareInactive => compare(Dir, ActiveInactive, Second),
            FileOrDirToCompareLeft => compare(FileOrDir, LeftRight, First),
            FileOrDirToCompareRight => compare(FileOrDir, LeftRight, Second),
            FileOrDirToCompareActive => compare(FileOrDir, ActiveInactive, First),
            FileOrDirToCompareInactive => compare(FileOrDir, ActiveInactive, Second),
            AppDir => KeywordClass::Program,
            FileName | FileNamePart | FileExtPart | DosFileName | FileSize | FileDate
            | FileTime | FileAttributes | FilePath | FileFullName => KeywordClass::Listing,
        }
    }
}

/// One entry of a keyword table as shown in the picker menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeywordDefinition {
    /// Keyword name, or the literal snippet text when `id` is `None`
    pub keyword: &'static str,
    /// Text displayed in the menu
    pub label: &'static str,
    pub flags: InsertFlags,
    pub id: Option<KeywordId>,
}

impl KeywordDefinition {
    /// A substitutable keyword, inserted as `$(keyword)`
    pub const fn variable(keyword: &'static str, label: &'static str, id: KeywordId) -> Self {
        Self {
            keyword,
            label,
            flags: InsertFlags::EMPTY.with(InsertFlag::WrapAsVariable),
            id: Some(id),
        }
    }

    /// A literal snippet inserted as-is
    pub const fn snippet(text: &'static str, label: &'static str, flags: InsertFlags) -> Self {
        Self {
            keyword: text,
            label,
            flags,
            id: None,
        }
    }

    pub fn is_substitutable(&self) -> bool {
        self.id.is_some() && self.flags.contains(InsertFlag::WrapAsVariable)
    }

    pub fn class(&self) -> Option<KeywordClass> {
        self.id.map(KeywordId::class)
    }
}

/// Entry of a keyword table, including the structural entries used by menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEntry {
    Keyword(KeywordDefinition),
    Separator,
    Browse,
    Help,
    SubmenuStart { label: &'static str },
    SubmenuEnd,
}

/// Which `:modifier` suffixes a table accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierPolicy {
    /// No modifiers at all
    None,
    /// `:max` and fixed `:N` column widths
    ColumnWidth,
}

/// Immutable catalog of the keywords legal in one template context
#[derive(Debug, PartialEq, Eq)]
pub struct KeywordTable {
    pub context: TemplateContext,
    pub modifiers: ModifierPolicy,
    entries: &'static [TableEntry],
}

impl KeywordTable {
    /// Find a substitutable keyword by name (ASCII case-insensitive)
    pub fn lookup(&self, name: &str) -> Option<&'static KeywordDefinition> {
        self.iter()
            .find(|def| def.is_substitutable() && def.keyword.eq_ignore_ascii_case(name))
    }

    /// All definitions in menu order, structural entries skipped
    pub fn iter(&self) -> impl Iterator<Item = &'static KeywordDefinition> {
        self.entries.iter().filter_map(|entry| match entry {
            TableEntry::Keyword(def) => Some(def),
            _ => None,
        })
    }

    /// Only the keywords that can appear in a template
    pub fn keywords(&self) -> impl Iterator<Item = &'static KeywordDefinition> {
        self.iter().filter(|def| def.is_substitutable())
    }

    /// Every entry including separators and submenu boundaries
    pub fn entries(&self) -> &'static [TableEntry] {
        self.entries
    }
}
