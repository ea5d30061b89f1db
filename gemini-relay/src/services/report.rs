//! Telegram summary for a batch of scan results.

use crate::models::{Issue, IssueType, Severity};

const MAX_HIGH_PRIORITY: usize = 3;
const MAX_VULNERABILITIES: usize = 2;
const MAX_DEPENDENCY_ISSUES: usize = 2;

/// Placeholder for a selected issue that arrived without a message.
const MISSING_MESSAGE: &str = "Unknown issue";

const CLOSING_SECTIONS: &str = "4️⃣ \"Code Makeover\" - Beauty Tips:
   • TypeScript: Because \"any\" is not a type, it's a cry for help
   • ESLint: Your code's personal trainer
   • Documentation: Because future you will thank past you

5️⃣ \"Speed\" - Performance Edition:
   • Database queries: Fast & Furious
   • Cache: The memory you wish you had
   • File operations: Size matters

6️⃣ \"The Clean Code\":
   • Dependencies: Out with the old, in with the new
   • Dead code: Time to say goodbye
   • Formatting: Because beauty is in the eye of the beholder

🎬 Stay tuned for the next episode in your code's dramatic journey!";

/// Tallies and selections a report is rendered from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary<'a> {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub errors: usize,
    pub vulnerabilities: usize,
    pub dependencies: usize,
    pub high_priority: Vec<&'a str>,
    pub top_vulnerabilities: Vec<&'a str>,
    pub top_dependency_issues: Vec<&'a str>,
}

impl<'a> ScanSummary<'a> {
    pub fn from_issues(issues: &'a [Issue]) -> Self {
        let count_severity = |s| issues.iter().filter(|i| i.is_severity(s)).count();
        let count_type = |t| issues.iter().filter(|i| i.is_type(t)).count();

        Self {
            total: issues.len(),
            high: count_severity(Severity::High),
            medium: count_severity(Severity::Medium),
            low: count_severity(Severity::Low),
            errors: count_type(IssueType::Error),
            vulnerabilities: count_type(IssueType::Vulnerability),
            dependencies: count_type(IssueType::Dependency),
            high_priority: select(issues, |i| i.is_severity(Severity::High), MAX_HIGH_PRIORITY),
            top_vulnerabilities: select(
                issues,
                |i| i.is_type(IssueType::Vulnerability),
                MAX_VULNERABILITIES,
            ),
            top_dependency_issues: select(
                issues,
                |i| i.is_type(IssueType::Dependency),
                MAX_DEPENDENCY_ISSUES,
            ),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "🎭 Code Drama Report: \"The Good, The Bad, and The Ugly\" 🎭

🎪 Total Plot Twists: {total}

🎭 Drama Level Breakdown:
🔥 \"This is Fine\" (High): {high}
😅 \"Could be Worse\" (Medium): {medium}
😌 \"Meh\" (Low): {low}

🎪 Genre Breakdown:
🤡 Comedy of Errors: {errors}
🎭 Security Thriller: {vulnerabilities}
📚 Dependency Drama: {dependencies}

🎬 Action Items (Starring Your Code):

1️⃣ \"Mission Impossible\" - Critical Issues:
{high_priority}

2️⃣ \"The Matrix\" - Security Plot Holes:
{top_vulnerabilities}

3️⃣ \"Dependency Day\" - Update Required:
{top_dependency_issues}

{CLOSING_SECTIONS}",
            total = self.total,
            high = self.high,
            medium = self.medium,
            low = self.low,
            errors = self.errors,
            vulnerabilities = self.vulnerabilities,
            dependencies = self.dependencies,
            high_priority = numbered(&self.high_priority),
            top_vulnerabilities = numbered(&self.top_vulnerabilities),
            top_dependency_issues = numbered(&self.top_dependency_issues),
        )
    }
}

/// Render the report text for `issues`.
pub fn render_report(issues: &[Issue]) -> String {
    ScanSummary::from_issues(issues).render()
}

fn select<'a>(issues: &'a [Issue], predicate: impl Fn(&Issue) -> bool, limit: usize) -> Vec<&'a str> {
    issues
        .iter()
        .filter(|i| predicate(*i))
        .take(limit)
        .map(|i| i.message.as_deref().unwrap_or(MISSING_MESSAGE))
        .collect()
}

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(n, item)| format!("   {}. {}", n + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(issue_type: Option<IssueType>, severity: Option<Severity>, message: &str) -> Issue {
        Issue {
            issue_type,
            severity,
            message: Some(message.to_string()),
            ..Issue::default()
        }
    }

    #[test]
    fn same_issue_lands_in_several_buckets() {
        let issues = vec![issue(
            Some(IssueType::Vulnerability),
            Some(Severity::High),
            "SQLi risk",
        )];
        let summary = ScanSummary::from_issues(&issues);

        assert_eq!(summary.high_priority, vec!["SQLi risk"]);
        assert_eq!(summary.top_vulnerabilities, vec!["SQLi risk"]);
        assert!(summary.top_dependency_issues.is_empty());

        let report = summary.render();
        assert!(report.contains("Critical Issues:\n   1. SQLi risk\n\n"));
        assert!(report.contains("Security Plot Holes:\n   1. SQLi risk\n\n"));
        assert_eq!(report.matches("SQLi risk").count(), 2);
    }

    #[test]
    fn selections_are_capped_and_keep_input_order() {
        let issues: Vec<Issue> = (1..=5)
            .map(|n| issue(Some(IssueType::Vulnerability), Some(Severity::High), &format!("v{n}")))
            .chain((1..=4).map(|n| issue(Some(IssueType::Dependency), None, &format!("d{n}"))))
            .collect();
        let summary = ScanSummary::from_issues(&issues);

        assert_eq!(summary.high_priority, vec!["v1", "v2", "v3"]);
        assert_eq!(summary.top_vulnerabilities, vec!["v1", "v2"]);
        assert_eq!(summary.top_dependency_issues, vec!["d1", "d2"]);
        assert_eq!(summary.total, 9);
        assert_eq!(summary.high, 5);
        assert_eq!(summary.vulnerabilities, 5);
        assert_eq!(summary.dependencies, 4);
    }

    #[test]
    fn tallies_skip_missing_and_unknown_values() {
        let issues = vec![
            issue(Some(IssueType::Error), Some(Severity::Medium), "a"),
            issue(Some(IssueType::Other), Some(Severity::Other), "b"),
            issue(None, Some(Severity::Low), "c"),
            issue(Some(IssueType::Error), None, "d"),
        ];
        let summary = ScanSummary::from_issues(&issues);

        assert_eq!(summary.total, 4);
        assert_eq!((summary.high, summary.medium, summary.low), (0, 1, 1));
        assert_eq!(
            (summary.errors, summary.vulnerabilities, summary.dependencies),
            (2, 0, 0)
        );
    }

    #[test]
    fn empty_sections_render_empty_bodies() {
        let issues = vec![issue(Some(IssueType::Error), Some(Severity::Low), "typo")];
        let report = render_report(&issues);

        assert!(report.starts_with(
            "🎭 Code Drama Report: \"The Good, The Bad, and The Ugly\" 🎭\n\n🎪 Total Plot Twists: 1\n"
        ));
        assert!(report.contains("🔥 \"This is Fine\" (High): 0\n"));
        assert!(report.contains("😌 \"Meh\" (Low): 1\n"));
        assert!(report.contains("🤡 Comedy of Errors: 1\n"));
        assert!(report.contains("Critical Issues:\n\n\n2️⃣"));
        assert!(report.contains("Security Plot Holes:\n\n\n3️⃣"));
        assert!(report.contains("Update Required:\n\n\n4️⃣"));
        assert!(report.ends_with("your code's dramatic journey!"));
        assert!(!report.contains("typo"));
    }

    #[test]
    fn items_are_numbered_from_one() {
        let issues = vec![
            issue(None, Some(Severity::High), "first"),
            issue(None, Some(Severity::High), "second"),
        ];
        let report = render_report(&issues);

        assert!(report.contains("Critical Issues:\n   1. first\n   2. second\n\n"));
    }

    #[test]
    fn selected_issue_without_message_uses_placeholder() {
        let issues = vec![Issue {
            severity: Some(Severity::High),
            ..Issue::default()
        }];

        assert_eq!(
            ScanSummary::from_issues(&issues).high_priority,
            vec!["Unknown issue"]
        );
    }
}
