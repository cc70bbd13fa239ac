//! Domain types for termfolio.
//!
//! The portfolio content model. Field names serialize in camelCase so a
//! profile exported from the web editor (`fullName`, `experiences`, ...)
//! loads unchanged.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONTENT
// ============================================================================

/// A showcased project ("schematic").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Role held on the project, e.g. "Full Stack Developer".
    pub role: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Repository or demo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Preview image reference. Not rendered in the terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A work history entry ("mission log").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    /// Free-form period, e.g. "May 2023 - May 2025".
    pub period: String,
    pub description: String,
}

/// The complete editable portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioData {
    pub full_name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
}

impl PortfolioData {
    /// First word of the name, used for the `NAME.LOG` header.
    pub fn handle(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or("USER")
    }

    /// Link to a project by index, ignoring blank links.
    pub fn project_link(&self, index: usize) -> Option<&str> {
        self.projects
            .get(index)
            .and_then(|p| p.link.as_deref())
            .filter(|l| !l.trim().is_empty())
    }
}

// ============================================================================
// SECTIONS
// ============================================================================

/// Navigable portfolio sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Identity,
    Skills,
    Experience,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Identity,
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Contact,
    ];

    /// Heading shown in the title bar.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Identity => "IDENTITY",
            Section::Skills => "SYSTEM CAPABILITIES",
            Section::Experience => "MISSION LOGS",
            Section::Projects => "PROJECT SCHEMATICS",
            Section::Contact => "ESTABLISH CONNECTION",
        }
    }

    /// 1-based number used by the number-key shortcuts.
    pub fn number(self) -> u8 {
        match self {
            Section::Identity => 1,
            Section::Skills => 2,
            Section::Experience => 3,
            Section::Projects => 4,
            Section::Contact => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next section, wrapping around.
    pub fn next(self) -> Section {
        let i = Section::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Section::ALL[(i + 1) % Section::ALL.len()]
    }

    /// Previous section, wrapping around.
    pub fn prev(self) -> Section {
        let i = Section::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Section::ALL[(i + Section::ALL.len() - 1) % Section::ALL.len()]
    }
}

// ============================================================================
// OUTPUT
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}
