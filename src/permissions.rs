// src/permissions.rs

//! Typed `resource:action` permissions and the screen-level capabilities
//! derived from them. Enforcement happens upstream; these flags only decide
//! which controls a client offers.

use std::{collections::BTreeSet, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static PERMISSION_SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([a-z_]+)\s*:\s*([a-z_]+)\s*$").expect("permission regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Account,
    Role,
    Student,
    Class,
    Subject,
    Question,
    Exam,
    Schedule,
    Result,
    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Import,
    Export,
}

impl Resource {
    fn as_str(self) -> &'static str {
        match self {
            Resource::Account => "account",
            Resource::Role => "role",
            Resource::Student => "student",
            Resource::Class => "class",
            Resource::Subject => "subject",
            Resource::Question => "question",
            Resource::Exam => "exam",
            Resource::Schedule => "schedule",
            Resource::Result => "result",
            Resource::Statistics => "statistics",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "account" => Resource::Account,
            "role" => Resource::Role,
            "student" => Resource::Student,
            "class" => Resource::Class,
            "subject" => Resource::Subject,
            "question" => Resource::Question,
            "exam" => Resource::Exam,
            "schedule" => Resource::Schedule,
            "result" => Resource::Result,
            "statistics" => Resource::Statistics,
            _ => return None,
        })
    }
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Import => "import",
            Action::Export => "export",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "view" => Action::View,
            "create" => Action::Create,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "import" => Action::Import,
            "export" => Action::Export,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource.as_str(), self.action.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPermission(pub String);

impl fmt::Display for UnknownPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown permission '{}'", self.0)
    }
}

impl std::error::Error for UnknownPermission {}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownPermission(s.to_string());
        let lowered = s.to_ascii_lowercase();
        let caps = PERMISSION_SYNTAX.captures(&lowered).ok_or_else(unknown)?;

        let resource = Resource::parse(&caps[1]).ok_or_else(unknown)?;
        let action = Action::parse(&caps[2]).ok_or_else(unknown)?;
        Ok(Permission::new(resource, action))
    }
}

/// Set of granted permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Parses raw permission strings, skipping the ones it does not know.
    pub fn from_strings<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for entry in raw {
            match entry.as_ref().parse::<Permission>() {
                Ok(p) => {
                    set.insert(p);
                }
                Err(e) => tracing::debug!("Skipping permission: {}", e),
            }
        }
        Self(set)
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.has(*p))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical string forms, sorted.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// Screen-level feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Capabilities {
    /// Exam editor with pool browsing, random pick and save.
    pub can_assemble_exams: bool,
    pub can_manage_questions: bool,
    pub can_import_questions: bool,
    pub can_review_results: bool,
    pub can_view_statistics: bool,
    pub can_manage_accounts: bool,
    pub can_manage_schedules: bool,
}

impl From<&PermissionSet> for Capabilities {
    fn from(set: &PermissionSet) -> Self {
        use Action::*;
        use Resource::*;

        Self {
            can_assemble_exams: set
                .has_all(&[Permission::new(Exam, Update), Permission::new(Question, View)]),
            can_manage_questions: set.has_all(&[
                Permission::new(Question, Create),
                Permission::new(Question, Update),
                Permission::new(Question, Delete),
            ]),
            can_import_questions: set.has(Permission::new(Question, Import)),
            can_review_results: set.has(Permission::new(Result, View)),
            can_view_statistics: set.has(Permission::new(Statistics, View)),
            can_manage_accounts: set
                .has_all(&[Permission::new(Account, Update), Permission::new(Role, Update)]),
            can_manage_schedules: set.has(Permission::new(Schedule, Update)),
        }
    }
}
