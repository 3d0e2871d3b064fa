//! Task-set integrity checks.
//!
//! Structural validation before a simulation is built: task names must be
//! unique, since names identify tasks in fault records and timeline rows.
//! Per-task parameter validation happens at [`PeriodicTask::new`]; this
//! module checks properties of the set as a whole.
//!
//! [`PeriodicTask::new`]: crate::models::PeriodicTask::new

use std::collections::HashSet;

use crate::error::SimError;
use crate::models::PeriodicTask;

/// Validation result.
pub type ValidationResult = Result<(), Vec<SimError>>;

/// Validates a task set, collecting all detected issues.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` listing every duplicate name.
pub fn validate_task_set(tasks: &[PeriodicTask]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for task in tasks {
        if !names.insert(task.name()) {
            errors.push(SimError::invalid_parameters(format!(
                "duplicate task name: \"{}\"",
                task.name()
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Offered demand of the task set, Σ burst / period.
///
/// Above 1.0, no uniprocessor policy can serve the set without eventual
/// deadline misses (Liu & Layland).
pub fn total_utilization(tasks: &[PeriodicTask]) -> f64 {
    tasks.iter().map(|t| t.utilization()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimErrorKind;

    fn make_task(name: &str, period: u64, burst: u64) -> PeriodicTask {
        PeriodicTask::new(name, 0, period, period, burst).unwrap()
    }

    #[test]
    fn test_unique_names_pass() {
        let tasks = vec![make_task("a", 10, 2), make_task("b", 10, 2)];
        assert!(validate_task_set(&tasks).is_ok());
    }

    #[test]
    fn test_duplicate_names_are_all_reported() {
        let tasks = vec![
            make_task("a", 10, 2),
            make_task("a", 12, 3),
            make_task("b", 10, 1),
            make_task("b", 14, 1),
        ];
        let errors = validate_task_set(&tasks).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == SimErrorKind::InvalidTaskParameters));
        assert!(errors[0].message.contains('a'));
        assert!(errors[1].message.contains('b'));
    }

    #[test]
    fn test_empty_set_is_valid() {
        assert!(validate_task_set(&[]).is_ok());
    }

    #[test]
    fn test_total_utilization() {
        let tasks = vec![make_task("a", 10, 5), make_task("b", 20, 5)];
        assert!((total_utilization(&tasks) - 0.75).abs() < 1e-10);
    }
}
