//! Built-in keyword tables, one per template context

use super::{
    InsertFlag, InsertFlags, KeywordDefinition, KeywordId, KeywordTable, ModifierPolicy,
    TableEntry, TemplateContext,
};

const CURSOR_1: InsertFlags = InsertFlags::EMPTY.with(InsertFlag::CursorBeforeEnd1);

const fn var(keyword: &'static str, label: &'static str, id: KeywordId) -> TableEntry {
    TableEntry::Keyword(KeywordDefinition::variable(keyword, label, id))
}

const fn snip(text: &'static str, label: &'static str, flags: InsertFlags) -> TableEntry {
    TableEntry::Keyword(KeywordDefinition::snippet(text, label, flags))
}

/// `%%` with the cursor left between the two delimiters
const ENV_VARIABLE: TableEntry = snip("%%", "Environment Variable", CURSOR_1);

const APP_DIR: TableEntry = var("AppDir", "Application Directory", KeywordId::AppDir);

pub static USER_MENU_ARGUMENTS: KeywordTable = KeywordTable {
    context: TemplateContext::UserMenuArguments,
    modifiers: ModifierPolicy::None,
    entries: &[
        var("FullName", "Full Name", KeywordId::FullName),
        var("FullPath", "Full Path", KeywordId::FullPath),
        var("Drive", "Drive", KeywordId::Drive),
        var("Name", "Name", KeywordId::Name),
        var("NamePart", "Name Part", KeywordId::NamePart),
        var("ExtPart", "Extension Part", KeywordId::ExtPart),
        TableEntry::SubmenuStart {
            label: "DOS Names",
        },
        var("DOSFullName", "DOS Full Name", KeywordId::DosFullName),
        var("DOSFullPath", "DOS Full Path", KeywordId::DosFullPath),
        var("DOSName", "DOS Name", KeywordId::DosName),
        var("DOSNamePart", "DOS Name Part", KeywordId::DosNamePart),
        var("DOSExtPart", "DOS Extension Part", KeywordId::DosExtPart),
        TableEntry::SubmenuEnd,
        TableEntry::Separator,
        var(
            "ListOfSelectedNames",
            "List of Selected Names",
            KeywordId::ListOfSelectedNames,
        ),
        var(
            "ListOfSelectedFullNames",
            "List of Selected Full Names",
            KeywordId::ListOfSelectedFullNames,
        ),
        TableEntry::Separator,
        var("FullPathLeft", "Full Path of Left Panel", KeywordId::FullPathLeft),
        var("FullPathRight", "Full Path of Right Panel", KeywordId::FullPathRight),
        var(
            "FullPathInactive",
            "Full Path of Inactive Panel",
            KeywordId::FullPathInactive,
        ),
        TableEntry::SubmenuStart { label: "Compare" },
        var(
            "FileToCompareLeft",
            "File to Compare (Left)",
            KeywordId::FileToCompareLeft,
        ),
        var(
            "FileToCompareRight",
            "File to Compare (Right)",
            KeywordId::FileToCompareRight,
        ),
        var(
            "FileToCompareActive",
            "File to Compare (Active)",
            KeywordId::FileToCompareActive,
        ),
        var(
            "FileToCompareInactive",
            "File to Compare (Inactive)",
            KeywordId::FileToCompareInactive,
        ),
        TableEntry::Separator,
        var(
            "DirToCompareLeft",
            "Directory to Compare (Left)",
            KeywordId::DirToCompareLeft,
        ),
        var(
            "DirToCompareRight",
            "Directory to Compare (Right)",
            KeywordId::DirToCompareRight,
        ),
        var(
            "DirToCompareActive",
            "Directory to Compare (Active)",
            KeywordId::DirToCompareActive,
        ),
        var(
            "DirToCompareInactive",
            "Directory to Compare (Inactive)",
            KeywordId::DirToCompareInactive,
        ),
        TableEntry::Separator,
        var(
            "FileOrDirToCompareLeft",
            "File or Directory to Compare (Left)",
            KeywordId::FileOrDirToCompareLeft,
        ),
        var(
            "FileOrDirToCompareRight",
            "File or Directory to Compare (Right)",
            KeywordId::FileOrDirToCompareRight,
        ),
        var(
            "FileOrDirToCompareActive",
            "File or Directory to Compare (Active)",
            KeywordId::FileOrDirToCompareActive,
        ),
        var(
            "FileOrDirToCompareInactive",
            "File or Directory to Compare (Inactive)",
            KeywordId::FileOrDirToCompareInactive,
        ),
        TableEntry::SubmenuEnd,
        TableEntry::Separator,
        APP_DIR,
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Browse,
        TableEntry::Help,
    ],
};

pub static HOT_PATH: KeywordTable = KeywordTable {
    context: TemplateContext::HotPath,
    modifiers: ModifierPolicy::None,
    entries: &[
        APP_DIR,
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Browse,
        TableEntry::Help,
    ],
};

pub static COMMAND: KeywordTable = KeywordTable {
    context: TemplateContext::Command,
    modifiers: ModifierPolicy::None,
    entries: &[
        APP_DIR,
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Browse,
        TableEntry::Help,
    ],
};

pub static ARGUMENTS: KeywordTable = KeywordTable {
    context: TemplateContext::Arguments,
    modifiers: ModifierPolicy::None,
    entries: &[
        var("FullName", "Full Name", KeywordId::FullName),
        var("FullPath", "Full Path", KeywordId::FullPath),
        var("Drive", "Drive", KeywordId::Drive),
        var("Name", "Name", KeywordId::Name),
        var("NamePart", "Name Part", KeywordId::NamePart),
        var("ExtPart", "Extension Part", KeywordId::ExtPart),
        TableEntry::Separator,
        var("DOSFullName", "DOS Full Name", KeywordId::DosFullName),
        var("DOSFullPath", "DOS Full Path", KeywordId::DosFullPath),
        var("DOSName", "DOS Name", KeywordId::DosName),
        var("DOSNamePart", "DOS Name Part", KeywordId::DosNamePart),
        var("DOSExtPart", "DOS Extension Part", KeywordId::DosExtPart),
        TableEntry::Separator,
        APP_DIR,
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Help,
    ],
};

pub static INIT_DIR: KeywordTable = KeywordTable {
    context: TemplateContext::InitDir,
    modifiers: ModifierPolicy::None,
    entries: &[
        var("FullPath", "Full Path", KeywordId::FullPath),
        var("DOSFullPath", "DOS Full Path", KeywordId::DosFullPath),
        var("Drive", "Drive", KeywordId::Drive),
        TableEntry::Separator,
        APP_DIR,
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Browse,
        TableEntry::Help,
    ],
};

pub static INFO_LINE: KeywordTable = KeywordTable {
    context: TemplateContext::InfoLine,
    modifiers: ModifierPolicy::None,
    entries: &[
        var("FileName", "File Name", KeywordId::FileName),
        var("FileNamePart", "File Name Part", KeywordId::FileNamePart),
        var("FileExtPart", "File Extension Part", KeywordId::FileExtPart),
        var("DOSFileName", "DOS File Name", KeywordId::DosFileName),
        TableEntry::Separator,
        var("FileSize", "File Size", KeywordId::FileSize),
        var("FileDate", "File Date", KeywordId::FileDate),
        var("FileTime", "File Time", KeywordId::FileTime),
        var("FileAttributes", "File Attributes", KeywordId::FileAttributes),
        TableEntry::Separator,
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Help,
    ],
};

pub static MAKE_FILE_LIST: KeywordTable = KeywordTable {
    context: TemplateContext::MakeFileList,
    modifiers: ModifierPolicy::ColumnWidth,
    entries: &[
        var("FileName", "File Name", KeywordId::FileName),
        var("FileNamePart", "File Name Part", KeywordId::FileNamePart),
        var("FileExtPart", "File Extension Part", KeywordId::FileExtPart),
        var("DOSFileName", "DOS File Name", KeywordId::DosFileName),
        TableEntry::Separator,
        var("FileSize", "File Size", KeywordId::FileSize),
        var("FileDate", "File Date", KeywordId::FileDate),
        var("FileTime", "File Time", KeywordId::FileTime),
        var("FileAttributes", "File Attributes", KeywordId::FileAttributes),
        TableEntry::Separator,
        var("FilePath", "File Path", KeywordId::FilePath),
        var("FileFullName", "File Full Name", KeywordId::FileFullName),
        TableEntry::Separator,
        snip(":max", "Column Width: Longest Value", InsertFlags::EMPTY),
        ENV_VARIABLE,
        TableEntry::Separator,
        TableEntry::Help,
    ],
};

pub static REGULAR_EXPRESSION: KeywordTable = KeywordTable {
    context: TemplateContext::RegularExpression,
    modifiers: ModifierPolicy::None,
    entries: &[
        snip(".", "Any Character", InsertFlags::EMPTY),
        snip("[]", "Character in Set", CURSOR_1),
        snip("[^]", "Character Not in Set", CURSOR_1),
        snip("\\t", "Tab", InsertFlags::EMPTY),
        snip("\\\\", "Backslash", InsertFlags::EMPTY),
        TableEntry::Separator,
        snip("^", "Beginning of Line", InsertFlags::EMPTY),
        snip("$", "End of Line", InsertFlags::EMPTY),
        snip("\\b", "Word Boundary", InsertFlags::EMPTY),
        TableEntry::Separator,
        snip("*", "Zero or More Times", InsertFlags::EMPTY),
        snip("+", "One or More Times", InsertFlags::EMPTY),
        snip("?", "Zero or One Time", InsertFlags::EMPTY),
        snip("{}", "Repeat Count", CURSOR_1),
        TableEntry::Separator,
        snip("()", "Group", CURSOR_1),
        snip("|", "Alternative", InsertFlags::EMPTY),
        TableEntry::Separator,
        TableEntry::Help,
    ],
};
