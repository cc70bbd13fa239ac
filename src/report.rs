//! Report formatting for portfolios.
//!
//! Pure functions: (PortfolioData, OutputFormat) → String.
//! No I/O, no side effects.

use crate::types::{OutputFormat, PortfolioData, Section};

/// Format a portfolio for output.
pub fn format_report(data: &PortfolioData, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(data),
        OutputFormat::Json => format_json(data),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn heading(out: &mut String, section: Section) {
    out.push_str(&format!("=== {} ===\n", section.heading()));
}

fn format_human(data: &PortfolioData) -> String {
    let mut out = String::new();

    heading(&mut out, Section::Identity);
    out.push_str(&format!("{}\n", or_placeholder(&data.full_name, "UNKNOWN USER")));
    out.push_str(&format!("// {}\n", or_placeholder(&data.title, "SYSTEM OPERATOR")));
    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        or_placeholder(&data.bio, "No biography data detected in system core.")
    ));
    out.push('\n');

    heading(&mut out, Section::Skills);
    if data.skills.is_empty() {
        out.push_str("  AWAITING DATA INPUT...\n");
    } else {
        out.push_str(&format!("  {}\n", data.skills.join(" · ")));
    }
    out.push('\n');

    heading(&mut out, Section::Experience);
    if data.experiences.is_empty() {
        out.push_str("  NO LOGS FOUND...\n");
    }
    for exp in &data.experiences {
        out.push_str(&format!("[{}] {} @ {}\n", exp.period, exp.role, exp.company));
        if !exp.description.is_empty() {
            out.push_str(&format!("  {}\n", exp.description));
        }
    }
    out.push('\n');

    heading(&mut out, Section::Projects);
    if data.projects.is_empty() {
        out.push_str("  // NO SCHEMATICS UPLOADED //\n");
    }
    for (i, project) in data.projects.iter().enumerate() {
        out.push_str(&format!("{} ({})\n", project.title, project.role));
        if !project.description.is_empty() {
            out.push_str(&format!("  {}\n", project.description));
        }
        if !project.tags.is_empty() {
            let tags: Vec<String> = project.tags.iter().map(|t| format!("[{}]", t)).collect();
            out.push_str(&format!("  {}\n", tags.join(" ")));
        }
        if let Some(link) = data.project_link(i) {
            out.push_str(&format!("  └─ {}\n", link));
        }
    }
    out.push('\n');

    heading(&mut out, Section::Contact);
    if data.email.is_empty() {
        out.push_str("  OFFLINE\n");
    } else {
        out.push_str(&format!("  < {} />\n", data.email));
    }
    if let Some(github) = &data.github {
        out.push_str(&format!("  GitHub:   {}\n", github));
    }
    if let Some(linkedin) = &data.linkedin {
        out.push_str(&format!("  LinkedIn: {}\n", linkedin));
    }

    out
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() { placeholder } else { value }
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json(data: &PortfolioData) -> String {
    // PortfolioData contains only strings and vectors; serialization
    // cannot fail.
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================
