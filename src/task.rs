//! Task selection
//!
//! The task selector is a closed enum: every variant names a model, the
//! mapping is an exhaustive match, and an unrecognized selector fails at
//! argument parsing, before any trainer object is constructed.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

/// The prediction problem a run trains for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Binary classification (one logit, BCE-with-logits)
    Binary,
    /// Multiclass classification (logit row per sample, cross-entropy)
    Multiclass,
    /// Regression (one value, MSE)
    Regression,
}

impl Task {
    /// The selector string, as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Multiclass => "multiclass",
            Self::Regression => "regression",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Self::Binary),
            "multiclass" => Ok(Self::Multiclass),
            "regression" => Ok(Self::Regression),
            other => Err(format!(
                "unknown task '{other}' (expected binary, multiclass, or regression)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_round_trip() {
        for task in [Task::Binary, Task::Multiclass, Task::Regression] {
            let parsed: Task = task.as_str().parse().unwrap();
            assert_eq!(parsed, task);
        }
    }

    #[test]
    fn test_unknown_task_rejected() {
        let err = "ranking".parse::<Task>().unwrap_err();
        assert!(err.contains("ranking"));
        assert!(err.contains("binary"));
    }

    #[test]
    fn test_task_display() {
        assert_eq!(Task::Binary.to_string(), "binary");
        assert_eq!(Task::Multiclass.to_string(), "multiclass");
        assert_eq!(Task::Regression.to_string(), "regression");
    }
}
