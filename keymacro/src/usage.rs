//! Usage profile: which kinds of keywords a template references
//!
//! The caller uses the profile to decide how to run a command: once for the
//! whole selection (group) or once per selected item, and whether a compare
//! pair has to be collected first.

use crate::context::PanelPaths;
use crate::error::{ErrorSpan, ValidationError, ValidationResult};
use crate::keywords::{CompareKind, ComparePairing, CompareRef, CompareSide, KeywordClass, PanelRef};
use serde::Serialize;

/// Kind of compare keywords used by a template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareType {
    #[default]
    None,
    FileLeftRight,
    FileActiveInactive,
    DirLeftRight,
    DirActiveInactive,
    /// Two different compare types were used; stays this way
    InvalidMixed,
    FileOrDirLeftRight,
    FileOrDirActiveInactive,
}

impl CompareType {
    pub fn of(compare: CompareRef) -> Self {
        match (compare.kind, compare.pairing) {
            (CompareKind::File, ComparePairing::LeftRight) => CompareType::FileLeftRight,
            (CompareKind::File, ComparePairing::ActiveInactive) => CompareType::FileActiveInactive,
            (CompareKind::Dir, ComparePairing::LeftRight) => CompareType::DirLeftRight,
            (CompareKind::Dir, ComparePairing::ActiveInactive) => CompareType::DirActiveInactive,
            (CompareKind::FileOrDir, ComparePairing::LeftRight) => CompareType::FileOrDirLeftRight,
            (CompareKind::FileOrDir, ComparePairing::ActiveInactive) => {
                CompareType::FileOrDirActiveInactive
            }
        }
    }
}

/// Summary of the keyword classes referenced by a validated template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UsageProfile {
    pub uses_list_of_sel_names: bool,
    pub uses_list_of_sel_full_names: bool,
    pub uses_full_path_left: bool,
    pub uses_full_path_right: bool,
    pub uses_full_path_inactive: bool,
    pub must_handle_as_group: bool,
    pub must_handle_one_by_one: bool,
    pub compare_type: CompareType,
    pub used_compare_left_or_active: bool,
    pub used_compare_right_or_inactive: bool,
}

impl UsageProfile {
    /// Both operands of the compare pair are referenced
    pub fn uses_both_compare_sides(&self) -> bool {
        self.used_compare_left_or_active && self.used_compare_right_or_inactive
    }

    /// Referenced panel paths that `panels` leaves undefined
    pub fn undefined_panel_paths(&self, panels: &PanelPaths) -> Vec<PanelRef> {
        [
            (self.uses_full_path_left, PanelRef::Left),
            (self.uses_full_path_right, PanelRef::Right),
            (self.uses_full_path_inactive, PanelRef::Inactive),
        ]
        .into_iter()
        .filter(|(used, panel)| *used && panels.path(*panel).is_none())
        .map(|(_, panel)| panel)
        .collect()
    }
}

/// Builds a [`UsageProfile`] reference by reference and remembers where the
/// first conflicts appeared
#[derive(Debug, Default)]
pub(crate) struct UsageTracker {
    profile: UsageProfile,
    usage_conflict: Option<ErrorSpan>,
    compare_conflict: Option<ErrorSpan>,
}

impl UsageTracker {
    pub(crate) fn record(&mut self, class: KeywordClass, span: ErrorSpan) {
        let profile = &mut self.profile;
        match class {
            KeywordClass::PerItem => {
                profile.must_handle_one_by_one = true;
            }
            KeywordClass::Selection { full_names } => {
                if full_names {
                    profile.uses_list_of_sel_full_names = true;
                } else {
                    profile.uses_list_of_sel_names = true;
                }
                profile.must_handle_as_group = true;
            }
            KeywordClass::Compare(compare) => {
                profile.must_handle_as_group = true;
                match compare.side {
                    CompareSide::First => profile.used_compare_left_or_active = true,
                    CompareSide::Second => profile.used_compare_right_or_inactive = true,
                }
                let seen = CompareType::of(compare);
                match profile.compare_type {
                    CompareType::None => profile.compare_type = seen,
                    CompareType::InvalidMixed => {}
                    current if current != seen => {
                        profile.compare_type = CompareType::InvalidMixed;
                        self.compare_conflict = Some(span);
                    }
                    _ => {}
                }
            }
            KeywordClass::PanelPath(panel) => match panel {
                PanelRef::Left => profile.uses_full_path_left = true,
                PanelRef::Right => profile.uses_full_path_right = true,
                PanelRef::Inactive => profile.uses_full_path_inactive = true,
            },
            KeywordClass::ItemLocation | KeywordClass::Program | KeywordClass::Listing => {}
        }

        if self.usage_conflict.is_none()
            && self.profile.must_handle_as_group
            && self.profile.must_handle_one_by_one
        {
            self.usage_conflict = Some(span);
        }
    }

    /// Apply the post-scan checks, first violation wins
    pub(crate) fn finish(self) -> ValidationResult<UsageProfile> {
        if let Some(span) = self.usage_conflict {
            return Err(ValidationError::ConflictingUsage { span });
        }
        if let Some(span) = self.compare_conflict {
            return Err(ValidationError::ConflictingCompareType { span });
        }
        Ok(self.profile)
    }
}
