//! Overwrite decision policy threaded through one batch run.

use std::path::Path;

use crate::spec::EnumOverwriteDecision;

/// Collaborator asked once per would-be output collision.
pub trait OverwriteDecider {
    /// Decide what to do with the existing `path_file_out`.
    fn decide(&mut self, path_file_out: &Path) -> EnumOverwriteDecision;

    /// Failure raised while producing the last decision, if any.
    ///
    /// A reported failure discards the decision and leaves the output untouched.
    fn take_failure(&mut self) -> Option<String> {
        None
    }
}

impl<F> OverwriteDecider for F
where
    F: FnMut(&Path) -> EnumOverwriteDecision,
{
    fn decide(&mut self, path_file_out: &Path) -> EnumOverwriteDecision {
        self(path_file_out)
    }
}

/// Decider answering every collision with the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOverwriteDecider(pub EnumOverwriteDecision);

impl OverwriteDecider for FixedOverwriteDecider {
    fn decide(&mut self, _path_file_out: &Path) -> EnumOverwriteDecision {
        self.0
    }
}

/// Per-run overwrite state: allow-once, deny-once, or allow-rest.
pub struct OverwritePolicy<'a> {
    decider: &'a mut dyn OverwriteDecider,
    if_allow_rest: bool,
}

impl<'a> OverwritePolicy<'a> {
    /// Fresh policy; the allow-rest flag starts cleared.
    pub fn new(decider: &'a mut dyn OverwriteDecider) -> Self {
        Self {
            decider,
            if_allow_rest: false,
        }
    }

    /// `Ok(true)` when `path_file_out` may be written.
    ///
    /// Missing outputs never consult the decider. After an `AllowAll` answer
    /// every later collision of the run is allowed without asking. A decider
    /// failure comes back as `Err` with its message.
    pub fn should_write(&mut self, path_file_out: &Path) -> Result<bool, String> {
        if !path_file_out.exists() || self.if_allow_rest {
            return Ok(true);
        }
        let decision = self.decider.decide(path_file_out);
        if let Some(message) = self.decider.take_failure() {
            return Err(message);
        }
        Ok(match decision {
            EnumOverwriteDecision::Allow => true,
            EnumOverwriteDecision::Deny => false,
            EnumOverwriteDecision::AllowAll => {
                self.if_allow_rest = true;
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::{OverwriteDecider, OverwritePolicy};
    use crate::spec::EnumOverwriteDecision;

    struct FailingDecider {
        n_asked: usize,
        failure: Option<String>,
    }

    impl OverwriteDecider for FailingDecider {
        fn decide(&mut self, _path_file_out: &Path) -> EnumOverwriteDecision {
            self.n_asked += 1;
            self.failure = Some(format!("answer {} unavailable", self.n_asked));
            EnumOverwriteDecision::AllowAll
        }

        fn take_failure(&mut self) -> Option<String> {
            self.failure.take()
        }
    }

    #[test]
    fn allow_all_stops_further_questions() {
        let tmp = tempfile::tempdir().unwrap();
        let path_a = tmp.path().join("a-LABELS.xlsx");
        let path_b = tmp.path().join("b-LABELS.xlsx");
        fs::write(&path_a, b"").unwrap();
        fs::write(&path_b, b"").unwrap();

        let mut n_asked = 0;
        let mut decider = |_: &Path| {
            n_asked += 1;
            EnumOverwriteDecision::AllowAll
        };
        let mut policy = OverwritePolicy::new(&mut decider);
        assert!(policy.should_write(&path_a).unwrap());
        assert!(policy.should_write(&path_b).unwrap());
        drop(policy);
        assert_eq!(n_asked, 1);
    }

    #[test]
    fn missing_output_is_written_without_asking() {
        let tmp = tempfile::tempdir().unwrap();
        let mut decider = |_: &Path| -> EnumOverwriteDecision {
            panic!("decider must not be asked for new files")
        };
        let mut policy = OverwritePolicy::new(&mut decider);
        assert!(
            policy
                .should_write(&tmp.path().join("new-LABELS.xlsx"))
                .unwrap()
        );
    }

    #[test]
    fn deny_is_asked_per_collision() {
        let tmp = tempfile::tempdir().unwrap();
        let path_a = tmp.path().join("a-LABELS.xlsx");
        fs::write(&path_a, b"").unwrap();

        let mut l_answers = vec![EnumOverwriteDecision::Allow, EnumOverwriteDecision::Deny];
        let mut decider = |_: &Path| l_answers.remove(0);
        let mut policy = OverwritePolicy::new(&mut decider);
        assert!(policy.should_write(&path_a).unwrap());
        assert!(!policy.should_write(&path_a).unwrap());
    }

    #[test]
    fn decider_failure_discards_its_answer() {
        let tmp = tempfile::tempdir().unwrap();
        let path_a = tmp.path().join("a-LABELS.xlsx");
        fs::write(&path_a, b"").unwrap();

        let mut decider = FailingDecider {
            n_asked: 0,
            failure: None,
        };
        let mut policy = OverwritePolicy::new(&mut decider);
        assert_eq!(
            policy.should_write(&path_a),
            Err("answer 1 unavailable".to_string())
        );
        // The failed AllowAll must not unlock the rest of the run.
        assert_eq!(
            policy.should_write(&path_a),
            Err("answer 2 unavailable".to_string())
        );
    }
}
