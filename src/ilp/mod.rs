//! Time-indexed integer programming formulation.
//!
//! Translates a [`TimetableConfig`](crate::config::TimetableConfig) into a
//! solver-neutral [`LinearModel`]: binary start variables `X[job, slot, day]`,
//! continuous congestion counters `Y[slot, day]`, linear constraints and a
//! linear objective (minimized). A [`MipSolver`] then turns the model into an
//! assignment.
//!
//! # Variables
//! - `X[j, s, d] ∈ {0, 1}`: job `j` starts at slot `s` on day `d`. The only
//!   decision; occupancy is derived from it (see [`occupancy`]).
//! - `Y[t, d] ≥ 0`: congestion excess at `(t, d)`; only created when a
//!   contended job set is configured.
//!
//! Variables carry their structured key ([`VarKind`]); no index is ever
//! recovered from a display name.
//!
//! # Reference
//! - Sousa & Wolsey (1992), "A time indexed formulation of non-preemptive
//!   single machine scheduling problems"
//! - Burke & Petrovic (2002), "Recent research directions in automated
//!   timetabling"

pub mod builder;
pub mod occupancy;
pub mod solver;

pub use builder::ModelBuilder;
pub use occupancy::{occupancy_window, occupied_slots, OccupancyTable};
pub use solver::{GoodLpSolver, MipSolution, MipSolver, SolverConfig};

use serde::{Deserialize, Serialize};

use crate::models::{GroupKind, SlotKey, TimeGrid};

/// Dense index of a model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

impl VarId {
    /// Position in the model's variable list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a variable stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// Start decision of a job.
    Start(SlotKey),
    /// Congestion excess of a cell.
    Congestion {
        /// Slot index.
        slot: usize,
        /// Day index.
        day: usize,
    },
}

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VarDomain {
    /// 0/1 integer.
    Binary,
    /// Real-valued, bounded below.
    Continuous {
        /// Lower bound.
        min: f64,
    },
}

/// A declared variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarDef {
    /// Meaning.
    pub kind: VarKind,
    /// Domain.
    pub domain: VarDomain,
}

/// Index arithmetic of the start variables.
///
/// Start variables are laid out job-major, then day, then slot, and occupy
/// the first `jobs × days × slots_per_day` variable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLayout {
    grid: TimeGrid,
    jobs: usize,
}

impl StartLayout {
    /// Creates a layout for `jobs` jobs over `grid`.
    pub fn new(grid: TimeGrid, jobs: usize) -> Self {
        Self { grid, jobs }
    }

    /// Variable id of `X[job, slot, day]`.
    #[inline]
    pub fn start_var(&self, job: usize, slot: usize, day: usize) -> VarId {
        VarId((job * self.grid.days + day) * self.grid.slots_per_day + slot)
    }

    /// Number of start variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs * self.grid.cell_count()
    }

    /// Whether there are no start variables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The grid.
    pub fn grid(&self) -> TimeGrid {
        self.grid
    }

    /// Number of jobs.
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// All start variables of one job, day-major.
    pub fn job_vars(&self, job: usize) -> impl Iterator<Item = VarId> + '_ {
        self.grid
            .cells()
            .map(move |(slot, day)| self.start_var(job, slot, day))
    }
}

/// A linear expression `Σ coefficient · variable + constant`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// Weighted variables. A variable may appear more than once.
    pub terms: Vec<(VarId, f64)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of variables with coefficient 1.
    pub fn sum_of(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Adds `coefficient · var`.
    pub fn add_term(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// Adds every variable with coefficient 1.
    pub fn extend_vars(&mut self, vars: impl IntoIterator<Item = VarId>) {
        self.terms.extend(vars.into_iter().map(|v| (v, 1.0)));
    }

    /// Builder: adds a term.
    pub fn with_term(mut self, var: VarId, coefficient: f64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression against a value per variable.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values[v.index()])
            .sum::<f64>()
            + self.constant
    }
}

/// Constraint relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// `expr == rhs`
    Eq,
    /// `expr <= rhs`
    Le,
    /// `expr >= rhs`
    Ge,
}

/// The rule a constraint comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintFamily {
    /// Each job starts exactly once.
    SingleStart,
    /// Occupancy of a group ≤ 1 per cell.
    MutualExclusion(GroupKind),
    /// A job's start is pinned.
    FixedAssignment,
    /// No occupancy inside a blocked region.
    ForbiddenWindow,
    /// No start at or after a cutoff slot.
    StartCutoff,
    /// At most one start of a subject per day.
    SameDayRepeat,
    /// No start whose run overflows the day.
    DayBound,
    /// Congestion counter lower bound.
    Congestion,
}

/// A linear constraint `expr (relation) rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Originating rule.
    pub family: ConstraintFamily,
    /// Diagnostic label naming the group, job or window involved.
    pub label: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relation.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Whether `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= tolerance,
            Relation::Le => lhs <= self.rhs + tolerance,
            Relation::Ge => lhs >= self.rhs - tolerance,
        }
    }
}

/// A complete minimization model.
#[derive(Debug, Clone)]
pub struct LinearModel {
    /// Model name.
    pub name: String,
    layout: StartLayout,
    vars: Vec<VarDef>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl LinearModel {
    /// Creates a model and declares every start variable up front.
    pub fn new(name: impl Into<String>, layout: StartLayout) -> Self {
        let grid = layout.grid();
        let mut vars = Vec::with_capacity(layout.len() + grid.cell_count());
        for job in 0..layout.jobs() {
            for day in 0..grid.days {
                for slot in 0..grid.slots_per_day {
                    vars.push(VarDef {
                        kind: VarKind::Start(SlotKey::new(job, slot, day)),
                        domain: VarDomain::Binary,
                    });
                }
            }
        }
        Self {
            name: name.into(),
            layout,
            vars,
            constraints: Vec::new(),
            objective: LinearExpr::new(),
        }
    }

    /// Declares an extra variable.
    pub fn add_var(&mut self, kind: VarKind, domain: VarDomain) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarDef { kind, domain });
        id
    }

    /// Adds a constraint.
    pub fn add_constraint(
        &mut self,
        family: ConstraintFamily,
        label: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            family,
            label: label.into(),
            expr,
            relation,
            rhs,
        });
    }

    /// Sets the objective (minimized).
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Start variable layout.
    pub fn layout(&self) -> &StartLayout {
        &self.layout
    }

    /// Declared variables.
    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    /// Constraints in insertion order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The objective.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of constraints of one family.
    pub fn count_family(&self, family: ConstraintFamily) -> usize {
        self.constraints
            .iter()
            .filter(|c| c.family == family)
            .count()
    }

    /// Constraints not satisfied by `values`.
    pub fn violated(&self, values: &[f64], tolerance: f64) -> Vec<&LinearConstraint> {
        self.constraints
            .iter()
            .filter(|c| !c.is_satisfied(values, tolerance))
            .collect()
    }
}
