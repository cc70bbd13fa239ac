//! Portfolio profiles: the built-in sample, file loading, validation, and
//! the hero terminal's command list.
//!
//! Structure:
//! - Pure functions: sample data, validation, hero entries
//! - Effect functions: reading profile files

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::HeroConfig;
use crate::error::{Error, Result};
use crate::sequencer::CommandEntry;
use crate::types::{Experience, PortfolioData, Project};

// ============================================================================
// SAMPLE
// ============================================================================

/// The demonstration portfolio shown when no profile is configured.
pub fn sample() -> PortfolioData {
    PortfolioData {
        full_name: "Rayhan Yoshara".into(),
        title: "Software Developer".into(),
        bio: "Software developer specializing in digital transformation for sugar plantation and \
              manufacturing industries. Experienced in building end-to-end systems for operational \
              monitoring, workflow automation, and data-driven decision support using .NET and \
              modern full-stack technologies. Committed to delivering scalable, efficient, and \
              production-ready solutions for industrial environments."
            .into(),
        email: "rayhanyoshara@gmail.com".into(),
        linkedin: Some("https://www.linkedin.com/in/rayhanyoshara".into()),
        github: Some("https://github.com/Rayhanyoshh".into()),
        skills: [
            "Node.js",
            "Vue.js",
            "Next.js",
            ".NET 8",
            "C#",
            "SQL Server",
            "MySQL",
            "Python",
            "SignalR",
            "TypeScript",
            "Tailwind CSS",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        experiences: vec![
            Experience {
                id: "1".into(),
                role: "Software Developer".into(),
                company: "PT Global Papua Abadi".into(),
                period: "May 2025 - Present".into(),
                description: "Automated Purchase Request processes using Node.js and Lark API. \
                              Built automation middleware for processing Excel attachments. \
                              Developed frontend web applications using Vue.js for media \
                              monitoring and salary portals."
                    .into(),
            },
            Experience {
                id: "2".into(),
                role: ".NET Developer".into(),
                company: "PT. Realta Chakradarma".into(),
                period: "May 2023 - May 2025".into(),
                description: "Developed Bimasakti Property & Tenancy Management System. \
                              Constructed backend and frontend using .NET technologies. Managed \
                              data with SQL Server. Integrated external services via Web API."
                    .into(),
            },
        ],
        projects: vec![
            project(
                "p4",
                "Daimler Andon System",
                "Full Stack Developer",
                "Real-time Factory Management Dashboard (Andon) designed to enhance operational \
                 efficiency. Features live production monitoring using SignalR, dynamic RBAC, and \
                 interactive data visualization.",
                &["Next.js 16", ".NET 8", "SignalR", "MySQL", "TypeScript", "Tailwind CSS 4"],
            ),
            project(
                "p5",
                "Dangae Kanban Barcode System",
                "Full Stack Developer",
                "Digital Kanban inventory management system integrated with barcode scanning for \
                 real-time tracking on the production floor, with dual-layer security and Final \
                 Inspection modules.",
                &["FastAPI", "Python", "Next.js", "TypeScript", "MySQL", "SQLAlchemy"],
            ),
            project(
                "p1",
                "Field Data Collection Ecosystem",
                "Lead Full Stack Developer",
                "End-to-end field data collection system: Python/SQL Server backend and Vue.js \
                 monitoring website for real-time data validation, integrated with ArcGIS.",
                &["Python", "SQL Server", "Vue.js", "ArcGIS"],
            ),
            project(
                "p2",
                "Purchase Request Automation Service",
                "Backend Developer",
                "Automated the Purchase Request process across three companies with a Node.js \
                 service integrating the Lark API with Accurate accounting software.",
                &["Node.js", "Lark API", "Accurate", "Automation"],
            ),
            project(
                "p3",
                "Foreman Work Proof Middleware",
                "Automation Engineer",
                "Automation middleware for the Foreman's Work Proof process that reads and \
                 processes Excel attachments directly from Lark.",
                &["Node.js", "Excel Processing", "Lark Integration"],
            ),
        ],
    }
}

fn project(id: &str, title: &str, role: &str, description: &str, tags: &[&str]) -> Project {
    Project {
        id: id.into(),
        title: title.into(),
        role: role.into(),
        description: description.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        link: None,
        image: None,
    }
}

// ============================================================================
// HERO ENTRIES
// ============================================================================

/// The three hero lines: identity, role, biography.
///
/// Empty fields produce empty outputs; the sequencer types the command
/// and moves on.
pub fn hero_entries(data: &PortfolioData, hero: &HeroConfig) -> Vec<CommandEntry> {
    let role = if data.title.trim().is_empty() {
        String::new()
    } else {
        format!("// {}", data.title)
    };

    vec![
        CommandEntry::new("whoami", data.full_name.clone(), hero.name_char_ms),
        CommandEntry::new("cat role.txt", role, hero.role_char_ms),
        CommandEntry::new("cat bio.txt", data.bio.clone(), hero.bio_char_ms),
    ]
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a profile from a `.json` or `.toml` file.
///
/// Files with another extension are tried as JSON, then TOML.
pub fn load(path: &Path) -> Result<PortfolioData> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let data = match ext.as_deref() {
        Some("json") => parse_json(path, &content)?,
        Some("toml") => parse_toml(path, &content)?,
        _ => parse_json(path, &content)
            .or_else(|_| parse_toml(path, &content))
            .map_err(|_| Error::UnsupportedFormat(path.to_path_buf()))?,
    };

    debug!(
        path = %path.display(),
        projects = data.projects.len(),
        experiences = data.experiences.len(),
        "loaded profile"
    );
    Ok(data)
}

fn parse_json(path: &Path, content: &str) -> Result<PortfolioData> {
    serde_json::from_str(content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(path: &Path, content: &str) -> Result<PortfolioData> {
    toml::from_str(content).map_err(|source| Error::Toml {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// VALIDATION
// ============================================================================

/// A non-fatal problem with a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileIssue {
    MissingName,
    MissingTitle,
    MissingBio,
    MissingEmail,
    EmptySkill { index: usize },
    DuplicateProjectId(String),
    DuplicateExperienceId(String),
}

impl fmt::Display for ProfileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileIssue::MissingName => write!(f, "fullName is empty"),
            ProfileIssue::MissingTitle => write!(f, "title is empty"),
            ProfileIssue::MissingBio => write!(f, "bio is empty"),
            ProfileIssue::MissingEmail => write!(f, "email is empty"),
            ProfileIssue::EmptySkill { index } => write!(f, "skill #{} is empty", index + 1),
            ProfileIssue::DuplicateProjectId(id) => write!(f, "duplicate project id '{}'", id),
            ProfileIssue::DuplicateExperienceId(id) => {
                write!(f, "duplicate experience id '{}'", id)
            }
        }
    }
}

/// Report everything that would render as a placeholder or collide.
pub fn validate(data: &PortfolioData) -> Vec<ProfileIssue> {
    let mut issues = Vec::new();

    if data.full_name.trim().is_empty() {
        issues.push(ProfileIssue::MissingName);
    }
    if data.title.trim().is_empty() {
        issues.push(ProfileIssue::MissingTitle);
    }
    if data.bio.trim().is_empty() {
        issues.push(ProfileIssue::MissingBio);
    }
    if data.email.trim().is_empty() {
        issues.push(ProfileIssue::MissingEmail);
    }

    for (index, skill) in data.skills.iter().enumerate() {
        if skill.trim().is_empty() {
            issues.push(ProfileIssue::EmptySkill { index });
        }
    }

    let mut seen = HashSet::new();
    for p in &data.projects {
        if !seen.insert(p.id.as_str()) {
            issues.push(ProfileIssue::DuplicateProjectId(p.id.clone()));
        }
    }

    let mut seen = HashSet::new();
    for e in &data.experiences {
        if !seen.insert(e.id.as_str()) {
            issues.push(ProfileIssue::DuplicateExperienceId(e.id.clone()));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn sample_is_valid() {
        assert!(validate(&sample()).is_empty());
    }

    #[test]
    fn hero_entries_follow_profile() {
        let data = sample();
        let entries = hero_entries(&data, &HeroConfig::default());

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].command(), "whoami");
        assert_eq!(entries[0].output(), "Rayhan Yoshara");
        assert_eq!(entries[1].command(), "cat role.txt");
        assert_eq!(entries[1].output(), "// Software Developer");
        assert_eq!(entries[2].command(), "cat bio.txt");
        assert_eq!(entries[2].output(), data.bio);
    }

    #[test]
    fn hero_entries_use_configured_speeds() {
        let hero = HeroConfig::default();
        let entries = hero_entries(&sample(), &hero);
        assert_eq!(entries[0].char_delay().as_millis(), 50);
        assert_eq!(entries[1].char_delay().as_millis(), 40);
        assert_eq!(entries[2].char_delay().as_millis(), 20);
    }

    #[test]
    fn empty_fields_give_empty_outputs() {
        let entries = hero_entries(&PortfolioData::default(), &HeroConfig::default());
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.output().is_empty()));
    }

    #[test]
    fn validate_reports_missing_fields() {
        let issues = validate(&PortfolioData::default());
        assert_eq!(
            issues,
            vec![
                ProfileIssue::MissingName,
                ProfileIssue::MissingTitle,
                ProfileIssue::MissingBio,
                ProfileIssue::MissingEmail,
            ]
        );
    }

    #[test]
    fn validate_reports_duplicates_and_blank_skills() {
        let mut data = sample();
        data.skills.push("  ".into());
        data.projects.push(data.projects[0].clone());
        data.experiences.push(data.experiences[1].clone());

        let issues = validate(&data);
        assert!(issues.contains(&ProfileIssue::EmptySkill { index: 11 }));
        assert!(issues.contains(&ProfileIssue::DuplicateProjectId("p4".into())));
        assert!(issues.contains(&ProfileIssue::DuplicateExperienceId("2".into())));
    }

    #[test]
    fn issue_display_is_readable() {
        assert_eq!(ProfileIssue::EmptySkill { index: 0 }.to_string(), "skill #1 is empty");
        assert_eq!(
            ProfileIssue::DuplicateProjectId("p1".into()).to_string(),
            "duplicate project id 'p1'"
        );
    }

    #[test]
    fn load_json_profile() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"fullName": "Jane Doe", "title": "Engineer"}}"#).unwrap();
        let data = load(file.path()).unwrap();
        assert_eq!(data.full_name, "Jane Doe");
        assert_eq!(data.title, "Engineer");
    }

    #[test]
    fn load_toml_profile() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "fullName = \"Jane Doe\"\nskills = [\"Rust\"]\n\n[[projects]]\nid = \"x\"\ntitle = \"Thing\""
        )
        .unwrap();
        let data = load(file.path()).unwrap();
        assert_eq!(data.skills, vec!["Rust"]);
        assert_eq!(data.projects[0].title, "Thing");
    }

    #[test]
    fn unknown_extension_falls_back_to_toml() {
        let mut file = tempfile::Builder::new().suffix(".profile").tempfile().unwrap();
        writeln!(file, "fullName = \"Jane\"").unwrap();
        assert_eq!(load(file.path()).unwrap().full_name, "Jane");
    }

    #[test]
    fn unparseable_unknown_extension_is_unsupported() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "not a profile: [").unwrap();
        assert!(matches!(load(file.path()), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn malformed_json_reports_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
