//! Skill tag extraction from description text

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Fixed skill vocabulary for the Pakistani job market
pub const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "PHP", "Ruby", "Go", "Golang",
    "Rust", "Swift", "Kotlin", "R", "Scala",
    // Web technologies
    "HTML", "CSS", "React", "Angular", "Vue", "Node.js", "Django", "Flask", "Laravel",
    "WordPress", "Next.js", "Express",
    // Mobile
    "Android", "iOS", "React Native", "Flutter", "Xamarin",
    // Databases
    "SQL", "PostgreSQL", "MySQL", "MongoDB", "Redis", "Oracle", "MS SQL", "SQLite",
    "Elasticsearch",
    // DevOps and cloud
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "CI/CD", "Git", "GitHub",
    "GitLab", "Linux", "Terraform", "Ansible",
    // Data and ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Pandas", "NumPy",
    "Scikit-learn", "NLP", "Computer Vision", "Data Analysis", "Power BI", "Tableau", "Excel",
    // Methodology and enterprise
    "REST API", "GraphQL", "Microservices", "Agile", "Scrum", "JIRA", "SAP", "ERP", "CRM",
    "Salesforce",
    // Design
    "UI/UX", "Figma", "Adobe XD", "Photoshop", "Illustrator",
    // Testing
    "Selenium", "Jest", "Pytest", "JUnit", "QA", "Testing",
];

static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILL_VOCABULARY
        .iter()
        .map(|skill| {
            let lower = skill.to_lowercase();
            // A \b assertion only works against a word character, so terms
            // ending in '+' or '#' (C++, C#) get no trailing boundary.
            let prefix = if lower.starts_with(|c: char| c.is_alphanumeric()) {
                r"\b"
            } else {
                ""
            };
            let suffix = if lower.ends_with(|c: char| c.is_alphanumeric()) {
                r"\b"
            } else {
                ""
            };
            let pattern = format!("(?i){}{}{}", prefix, regex::escape(&lower), suffix);
            (*skill, Regex::new(&pattern).expect("static pattern"))
        })
        .collect()
});

/// Scans description and requirements text for vocabulary terms
///
/// Matching is case-insensitive on whole words; the result is a set, so
/// repeated mentions collapse and order carries no meaning.
pub fn extract_skills(description: &str, requirements: &str) -> BTreeSet<String> {
    let combined = format!("{} {}", description, requirements);

    SKILL_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(&combined))
        .map(|(skill, _)| skill.to_string())
        .collect()
}
