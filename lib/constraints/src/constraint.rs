use revmatch_core::{Assignment, EntityMap, Error, Paper, Result, ReviewGroup, Reviewer};

/// Shared, read-only inputs every constraint may consult
#[derive(Debug, Clone, Copy)]
pub struct ConstraintContext<'a> {
    pub papers: &'a EntityMap<Paper>,
    pub reviewers: &'a EntityMap<Reviewer>,
    pub reviewers_per_paper: usize,
    /// Most groups a single reviewer may sit on
    pub max_reviewer_load: usize,
}

impl<'a> ConstraintContext<'a> {
    /// Context whose load limit equals `reviewers_per_paper`
    pub fn new(
        papers: &'a EntityMap<Paper>,
        reviewers: &'a EntityMap<Reviewer>,
        reviewers_per_paper: usize,
    ) -> Self {
        Self {
            papers,
            reviewers,
            reviewers_per_paper,
            max_reviewer_load: reviewers_per_paper,
        }
    }

    #[must_use]
    pub fn with_max_reviewer_load(mut self, max_reviewer_load: usize) -> Self {
        self.max_reviewer_load = max_reviewer_load;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.reviewers_per_paper == 0 {
            return Err(Error::InvalidConfig(
                "reviewers_per_paper must be at least 1".to_string(),
            ));
        }
        if self.reviewers_per_paper > self.reviewers.len() {
            return Err(Error::InvalidConfig(format!(
                "reviewers_per_paper is {} but only {} reviewers are available",
                self.reviewers_per_paper,
                self.reviewers.len()
            )));
        }
        if self.max_reviewer_load == 0 {
            return Err(Error::InvalidConfig(
                "max_reviewer_load must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A hard feasibility rule over a (partial or complete) assignment.
///
/// Implementations must be monotonic: once an assignment violates the rule,
/// every extension of it violates it too. The search relies on this to prune
/// as soon as a group is added.
pub trait Constraint: Send + Sync {
    fn name(&self) -> &str;

    /// Evaluate the rule against the whole assignment
    fn is_satisfied(&self, assignment: &Assignment, ctx: &ConstraintContext<'_>) -> bool;

    /// Evaluate the rule right after `latest` was appended to `assignment`,
    /// given that the assignment without `latest` already satisfied it.
    ///
    /// Implementations may inspect only what `latest` can change.
    fn admits(
        &self,
        assignment: &Assignment,
        latest: &ReviewGroup,
        ctx: &ConstraintContext<'_>,
    ) -> bool {
        let _ = latest;
        self.is_satisfied(assignment, ctx)
    }
}

/// A rule that looks at one paper's group at a time.
///
/// Every `PaperConstraint` is a [`Constraint`]: the assignment satisfies it
/// when every group does, and adding a group only needs that group checked.
pub trait PaperConstraint: Send + Sync {
    fn name(&self) -> &str;

    fn check_group(&self, group: &ReviewGroup, ctx: &ConstraintContext<'_>) -> bool;
}

impl<T: PaperConstraint> Constraint for T {
    fn name(&self) -> &str {
        PaperConstraint::name(self)
    }

    fn is_satisfied(&self, assignment: &Assignment, ctx: &ConstraintContext<'_>) -> bool {
        assignment
            .groups()
            .iter()
            .all(|group| self.check_group(group, ctx))
    }

    fn admits(
        &self,
        _assignment: &Assignment,
        latest: &ReviewGroup,
        ctx: &ConstraintContext<'_>,
    ) -> bool {
        self.check_group(latest, ctx)
    }
}
