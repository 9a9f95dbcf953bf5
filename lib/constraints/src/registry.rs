use crate::builtin::{
    ReviewerNotAuthor, ReviewerUnderload, ReviewersFromDifferentInstitutions,
    ReviewersNotAuthorsInstitutions, UniqueReviewers, REVIEWERS_FROM_DIFFERENT_INSTITUTIONS,
    REVIEWERS_NOT_AUTHORS_INSTITUTIONS, REVIEWER_NOT_AUTHOR, REVIEWER_UNDERLOAD, UNIQUE_REVIEWERS,
};
use crate::constraint::{Constraint, ConstraintContext};
use ahash::AHashSet;
use revmatch_core::{Assignment, Error, Result, ReviewGroup};

/// Builds a constraint once its context is known
pub type ConstraintFactory =
    Box<dyn Fn(&ConstraintContext<'_>) -> Box<dyn Constraint> + Send + Sync>;

/// Named constraint factories, kept in registration order
pub struct ConstraintRegistry {
    factories: Vec<(String, ConstraintFactory)>,
}

impl ConstraintRegistry {
    /// A registry without any constraint
    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// A registry holding the five built-in constraints
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.insert(REVIEWER_UNDERLOAD, |ctx| {
            Box::new(ReviewerUnderload::new(ctx.max_reviewer_load))
        });
        registry.insert(REVIEWER_NOT_AUTHOR, |_| Box::new(ReviewerNotAuthor));
        registry.insert(UNIQUE_REVIEWERS, |_| Box::new(UniqueReviewers));
        registry.insert(REVIEWERS_FROM_DIFFERENT_INSTITUTIONS, |_| {
            Box::new(ReviewersFromDifferentInstitutions)
        });
        registry.insert(REVIEWERS_NOT_AUTHORS_INSTITUTIONS, |_| {
            Box::new(ReviewersNotAuthorsInstitutions)
        });
        registry
    }

    /// Add a constraint under a new name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn(&ConstraintContext<'_>) -> Box<dyn Constraint> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(Error::InvalidConfig(format!(
                "constraint {} is already registered",
                name
            )));
        }
        self.insert(name, factory);
        Ok(())
    }

    fn insert<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ConstraintContext<'_>) -> Box<dyn Constraint> + Send + Sync + 'static,
    {
        self.factories.push((name.into(), Box::new(factory)));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Resolve constraint names against `ctx`.
    ///
    /// An empty list selects every registered constraint. Names are checked
    /// before anything is built; the first unknown one is an error. Repeated
    /// names resolve once.
    pub fn resolve<'a, S: AsRef<str>>(
        &self,
        names: &[S],
        ctx: ConstraintContext<'a>,
    ) -> Result<ConstraintSet<'a>> {
        if let Some(unknown) = names.iter().find(|n| !self.contains(n.as_ref())) {
            return Err(Error::UnknownConstraint(unknown.as_ref().to_string()));
        }
        ctx.validate()?;

        let selected: Vec<&str> = if names.is_empty() {
            self.names().collect()
        } else {
            let mut seen = AHashSet::new();
            names
                .iter()
                .map(|n| n.as_ref())
                .filter(|n| seen.insert(*n))
                .collect()
        };

        let constraints = selected
            .into_iter()
            .filter_map(|name| {
                self.factories
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, factory)| factory(&ctx))
            })
            .collect();

        Ok(ConstraintSet::new(ctx, constraints))
    }
}

impl Default for ConstraintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Resolved constraints bound to their context; feasibility is their conjunction
pub struct ConstraintSet<'a> {
    context: ConstraintContext<'a>,
    constraints: Vec<Box<dyn Constraint>>,
}

impl<'a> ConstraintSet<'a> {
    pub fn new(context: ConstraintContext<'a>, constraints: Vec<Box<dyn Constraint>>) -> Self {
        Self {
            context,
            constraints,
        }
    }

    #[inline]
    pub fn context(&self) -> &ConstraintContext<'a> {
        &self.context
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constraints.iter().map(|c| c.name())
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Whether every constraint holds on the whole assignment
    pub fn check(&self, assignment: &Assignment) -> bool {
        self.constraints
            .iter()
            .all(|c| c.is_satisfied(assignment, &self.context))
    }

    /// Incremental check after `latest` was appended to an assignment that
    /// already passed
    pub fn admits(&self, assignment: &Assignment, latest: &ReviewGroup) -> bool {
        self.first_rejection(assignment, latest).is_none()
    }

    /// Name of the first constraint rejecting `latest`, if any
    pub fn first_rejection(&self, assignment: &Assignment, latest: &ReviewGroup) -> Option<&str> {
        self.constraints
            .iter()
            .find(|c| !c.admits(assignment, latest, &self.context))
            .map(|c| c.name())
    }

    /// Names of every constraint the whole assignment violates
    pub fn violations(&self, assignment: &Assignment) -> Vec<&str> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied(assignment, &self.context))
            .map(|c| c.name())
            .collect()
    }
}

impl std::fmt::Debug for ConstraintSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSet")
            .field("constraints", &self.names().collect::<Vec<_>>())
            .field("reviewers_per_paper", &self.context.reviewers_per_paper)
            .field("max_reviewer_load", &self.context.max_reviewer_load)
            .finish()
    }
}
