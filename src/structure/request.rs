//! What to load: structure type and (for pages/components) a name

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum accepted structure name length
pub const MAX_NAME_LEN: usize = 100;

/// Kinds of structure the backend serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureType {
    Menu,
    Footer,
    Page,
    Component,
}

impl StructureType {
    pub const ALL: [StructureType; 4] = [
        StructureType::Page,
        StructureType::Component,
        StructureType::Menu,
        StructureType::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureType::Menu => "menu",
            StructureType::Footer => "footer",
            StructureType::Page => "page",
            StructureType::Component => "component",
        }
    }

    /// Pages and components are addressed by name; menu and footer are singletons
    pub fn requires_name(&self) -> bool {
        matches!(self, StructureType::Page | StructureType::Component)
    }

    /// Next type in picker order (wraps around)
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous type in picker order (wraps around)
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RequestError::UnknownType(s.to_string()))
    }
}

/// Invalid load request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("unknown structure type '{0}' (expected page, component, menu or footer)")]
    UnknownType(String),
    #[error("a name is required for type {0}")]
    MissingName(StructureType),
    #[error("invalid name '{0}': use letters, digits, '-' and '_' (max 100 characters)")]
    InvalidName(String),
}

/// A structure-fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureRequest {
    pub structure_type: StructureType,
    /// Only kept for types that require one
    pub name: Option<String>,
    /// Ask the backend to annotate nodes with explicit ids
    pub show_ids: bool,
}

impl StructureRequest {
    /// Validate and build a request. A name given for menu/footer is dropped.
    pub fn new(structure_type: StructureType, name: Option<String>) -> Result<Self, RequestError> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        let name = if structure_type.requires_name() {
            let name = name.ok_or(RequestError::MissingName(structure_type))?;
            if !is_valid_name(&name) {
                return Err(RequestError::InvalidName(name));
            }
            Some(name)
        } else {
            None
        };

        Ok(Self {
            structure_type,
            name,
            show_ids: true,
        })
    }

    /// Path segments after the command: `{type}/{name?}/showIds`
    pub fn path_segments(&self) -> Vec<&str> {
        let mut segments = vec![self.structure_type.as_str()];
        if let Some(name) = &self.name {
            segments.push(name);
        }
        if self.show_ids {
            segments.push("showIds");
        }
        segments
    }

    /// Heading shown above a loaded tree
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => format!("Structure: {}/{}", self.structure_type, name),
            None => format!("Structure: {}", self.structure_type),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn is_valid_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
