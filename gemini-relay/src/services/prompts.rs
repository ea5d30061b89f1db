//! Prompt templates sent to the generation API.
//!
//! User-supplied file names and contents are embedded verbatim.

use crate::models::SourceFile;

const ANALYSIS_INSTRUCTIONS: &str = "Analyze this code for potential issues, vulnerabilities, and outdated dependencies. \
Provide the analysis in the following JSON format:
[
  {
    \"type\": \"error|vulnerability|dependency\",
    \"severity\": \"high|medium|low\",
    \"message\": \"Description of the issue\",
    \"location\": \"File and line number\",
    \"impact\": 1-10,
    \"effort\": 1-10,
    \"recommendation\": \"How to fix the issue\"
  }
]

";

const COVERAGE_INSTRUCTIONS: &str = "Given the following source files and test files, \
estimate what percentage of the code is covered by tests. \
Only answer with a single integer number between 0 and 100.";

pub fn analysis_prompt(filename: &str, content: &str) -> String {
    format!("{ANALYSIS_INSTRUCTIONS}File: {filename}\nCode:\n{content}\n")
}

pub fn coverage_prompt(source_files: &[SourceFile], test_files: &[SourceFile]) -> String {
    format!(
        "{COVERAGE_INSTRUCTIONS}\n\nSource files:\n{}\n\nTest files:\n{}\n\nCoverage (%):",
        render_files(source_files),
        render_files(test_files)
    )
}

fn render_files(files: &[SourceFile]) -> String {
    files
        .iter()
        .map(|f| format!("File: {}\n{}", f.name, f.content))
        .collect::<Vec<_>>()
        .join("\n")
}
