/*!
 * Validation module for Netflix style compliance.
 *
 * # Architecture
 *
 * - `length`: Display width and reading speed measurement
 * - `issues`: Structured issue and violation types
 * - `timecodes`: Single-cue and sequence (gap/overlap) checks
 * - `service`: Binds a ruleset to the checks and builds reports
 */

pub mod length;
pub mod issues;
pub mod timecodes;
pub mod service;

// Re-export main types
pub use issues::{ComplianceIssue, IssueKind, Violation};
pub use service::{IssueSummary, ValidationReport, ValidationService};
