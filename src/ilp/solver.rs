//! Solver invocation.
//!
//! The mixed-integer search itself is delegated to an external solver
//! through `good_lp`. [`MipSolver`] is the seam: it takes a finished
//! [`LinearModel`] and returns one value per model variable, or a terminal
//! error. No retries and no relaxation happen here.
//!
//! # Backends
//! Selected at compile time through cargo features:
//! - `microlp` (default): pure-Rust branch and bound. Ignores time limits.
//! - `highs`: HiGHS. Honours time limit, relative gap and thread count; a
//!   limit hit with an incumbent is reported as [`SolveStatus::BestFound`].
//!
//! When both are enabled, HiGHS is used.

#[cfg(not(any(feature = "microlp", feature = "highs")))]
compile_error!("u-timetable needs a solver backend: enable the `microlp` or `highs` feature");

use std::time::Instant;

use good_lp::{
    constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::models::SolveStatus;

use super::{LinearExpr, LinearModel, Relation, VarDomain};

/// Solver settings. Backends ignore what they do not support.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds.
    pub time_limit_secs: Option<f64>,
    /// Relative MIP gap at which to stop.
    pub mip_gap: Option<f64>,
    /// Worker threads.
    pub threads: Option<u32>,
    /// Let the backend print its own log.
    pub verbose: bool,
}

impl SolverConfig {
    /// Creates the default configuration (no limits).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit in seconds.
    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// Sets the relative MIP gap.
    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    /// Sets the thread count.
    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Enables backend logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Assignment returned by a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct MipSolution {
    /// Optimality status.
    pub status: SolveStatus,
    /// One value per model variable, indexed by [`VarId`](super::VarId).
    pub values: Vec<f64>,
    /// Objective value of `values`.
    pub objective: f64,
}

/// A mixed-integer solver.
pub trait MipSolver {
    /// Solves `model` to optimality or to the configured limits.
    ///
    /// # Errors
    /// - [`TimetableError::Infeasible`] if no assignment satisfies the model.
    /// - [`TimetableError::SolverUnavailable`] for any other backend failure.
    fn solve(&self, model: &LinearModel) -> Result<MipSolution>;
}

/// `good_lp`-backed solver.
#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver {
    config: SolverConfig,
}

impl GoodLpSolver {
    /// Creates a solver with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solver with the given settings.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Active settings.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Name of the compiled-in backend.
    pub fn backend_name(&self) -> &'static str {
        if cfg!(feature = "highs") {
            "highs"
        } else {
            "microlp"
        }
    }

    #[cfg(feature = "highs")]
    fn run(
        &self,
        problem: ProblemVariables,
        objective: Expression,
        constraints: Vec<Constraint>,
        vars: &[Variable],
    ) -> std::result::Result<(Vec<f64>, SolveStatus), ResolutionError> {
        use good_lp::solvers::SolutionStatus;

        let mut lp = problem
            .minimise(objective)
            .using(good_lp::highs)
            .set_option("output_flag", self.config.verbose);
        if let Some(secs) = self.config.time_limit_secs {
            lp = lp.set_option("time_limit", secs);
        }
        if let Some(gap) = self.config.mip_gap {
            lp = lp.set_option("mip_rel_gap", gap);
        }
        if let Some(threads) = self.config.threads {
            lp = lp.set_option("threads", threads as i32);
        }
        for c in constraints {
            lp.add_constraint(c);
        }
        let solution = lp.solve()?;
        let status = match solution.status() {
            SolutionStatus::Optimal => SolveStatus::Optimal,
            _ => SolveStatus::BestFound,
        };
        Ok((vars.iter().map(|&v| solution.value(v)).collect(), status))
    }

    #[cfg(all(feature = "microlp", not(feature = "highs")))]
    fn run(
        &self,
        problem: ProblemVariables,
        objective: Expression,
        constraints: Vec<Constraint>,
        vars: &[Variable],
    ) -> std::result::Result<(Vec<f64>, SolveStatus), ResolutionError> {
        if self.config.time_limit_secs.is_some() || self.config.mip_gap.is_some() {
            warn!("microlp backend ignores time limit and MIP gap settings");
        }
        let mut lp = problem.minimise(objective).using(good_lp::microlp);
        for c in constraints {
            lp.add_constraint(c);
        }
        let solution = lp.solve()?;
        Ok((
            vars.iter().map(|&v| solution.value(v)).collect(),
            SolveStatus::Optimal,
        ))
    }
}

impl MipSolver for GoodLpSolver {
    fn solve(&self, model: &LinearModel) -> Result<MipSolution> {
        let mut problem = ProblemVariables::new();
        let vars: Vec<Variable> = model
            .vars()
            .iter()
            .map(|def| match def.domain {
                VarDomain::Binary => problem.add(variable().binary()),
                VarDomain::Continuous { min } => problem.add(variable().min(min)),
            })
            .collect();

        let objective = to_expression(model.objective(), &vars);
        let constraints: Vec<Constraint> = model
            .constraints()
            .iter()
            .map(|c| {
                let lhs = to_expression(&c.expr, &vars);
                let rhs = c.rhs;
                match c.relation {
                    Relation::Eq => constraint!(lhs == rhs),
                    Relation::Le => constraint!(lhs <= rhs),
                    Relation::Ge => constraint!(lhs >= rhs),
                }
            })
            .collect();

        info!(
            "Solving '{}' with {} ({} variables, {} constraints)",
            model.name,
            self.backend_name(),
            vars.len(),
            constraints.len()
        );
        let started = Instant::now();
        let (values, status) = self
            .run(problem, objective, constraints, &vars)
            .map_err(|e| {
                warn!("Solver stopped without a timetable: {e}");
                map_resolution_error(e)
            })?;
        let objective = model.objective().evaluate(&values);
        info!(
            "Solver finished in {:.2?}: {:?}, objective {objective}",
            started.elapsed(),
            status
        );
        if status == SolveStatus::BestFound {
            warn!("Solver hit a limit; the timetable may be suboptimal");
        }

        Ok(MipSolution {
            status,
            values,
            objective,
        })
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let mut out = Expression::from(expr.constant);
    for &(v, c) in &expr.terms {
        out += c * vars[v.index()];
    }
    out
}

fn map_resolution_error(err: ResolutionError) -> TimetableError {
    match err {
        ResolutionError::Infeasible => TimetableError::Infeasible,
        other => TimetableError::SolverUnavailable(other.to_string()),
    }
}
