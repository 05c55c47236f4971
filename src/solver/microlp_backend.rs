use std::cmp::Ordering;
use std::time::{Duration, Instant};

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem, Solution};
use tracing::{debug, warn};

use crate::solver::{Assignment, LinearModel, MilpBackend, Relation, SolveStatus, VariableKind};

/// A relaxed binary counts as integral within this distance of 0 or 1.
const INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Nodes whose bound is within this relative gap of the incumbent are pruned.
const RELATIVE_GAP: f64 = 1e-6;

/// Depth-first branch-and-bound over `microlp` LP relaxations.
///
/// Binaries are relaxed to `[0, 1]` and fixed one at a time with
/// `Solution::fix_var`, which re-solves the child from its parent's basis.
/// The search dives toward 1 on the most selected fractional binary, so an
/// integer-feasible incumbent appears after a handful of nodes. The deadline
/// is checked before every node; when it passes, the best incumbent is
/// returned as [`SolveStatus::Feasible`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl MicroLpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl MilpBackend for MicroLpBackend {
    fn solve(&self, model: &LinearModel, time_limit: Duration) -> SolveStatus {
        let deadline = Instant::now() + time_limit;
        let (problem, vars) = relaxation(model);

        let root = match problem.solve() {
            Ok(root) => root,
            Err(microlp::Error::Infeasible) => return SolveStatus::Infeasible,
            Err(e) => return SolveStatus::Failed(e.to_string()),
        };

        let binaries = model
            .variables()
            .iter()
            .enumerate()
            .filter(|(_, def)| def.kind == VariableKind::Binary)
            .map(|(i, _)| i)
            .collect();

        Search {
            vars,
            binaries,
            deadline,
            incumbent: None,
            nodes: 0,
        }
        .run(root)
    }
}

/// The model with every binary relaxed to a continuous `[0, 1]` variable.
fn relaxation(model: &LinearModel) -> (Problem, Vec<microlp::Variable>) {
    let mut problem = Problem::new(OptimizationDirection::Minimize);

    let vars: Vec<microlp::Variable> = model
        .variables()
        .iter()
        .map(|def| problem.add_var(def.cost, (def.lower, def.upper)))
        .collect();

    for constraint in model.constraints() {
        let mut expr = LinearExpr::empty();
        for (var, coeff) in &constraint.terms {
            expr.add(vars[var.index()], *coeff);
        }
        let op = match constraint.relation {
            Relation::LessOrEqual => ComparisonOp::Le,
            Relation::GreaterOrEqual => ComparisonOp::Ge,
            Relation::Equal => ComparisonOp::Eq,
        };
        problem.add_constraint(expr, op, constraint.rhs);
    }

    (problem, vars)
}

/// A child node not yet solved: `parent` with binary `var` fixed to `value`.
struct Branch {
    parent: Solution,
    var: usize,
    value: f64,
}

struct Search {
    vars: Vec<microlp::Variable>,
    binaries: Vec<usize>,
    deadline: Instant,
    incumbent: Option<Assignment>,
    nodes: usize,
}

impl Search {
    fn run(mut self, root: Solution) -> SolveStatus {
        let mut stack = Vec::new();
        self.visit(root, &mut stack);

        let mut exhausted = true;
        while let Some(branch) = stack.pop() {
            if Instant::now() >= self.deadline {
                exhausted = false;
                break;
            }
            if self.is_dominated(branch.parent.objective()) {
                continue;
            }
            match branch.parent.fix_var(self.vars[branch.var], branch.value) {
                Ok(node) => self.visit(node, &mut stack),
                Err(microlp::Error::Infeasible) => {}
                Err(e) => debug!(error = %e, "branch dropped"),
            }
        }

        debug!(nodes = self.nodes, exhausted, "branch and bound finished");
        match (self.incumbent, exhausted) {
            (Some(best), true) => SolveStatus::Optimal(best),
            (Some(best), false) => {
                debug!(objective = best.objective(), "time budget spent, keeping incumbent");
                SolveStatus::Feasible(best)
            }
            (None, true) => SolveStatus::Infeasible,
            (None, false) => {
                warn!(nodes = self.nodes, "solver exceeded its time budget");
                SolveStatus::TimedOut
            }
        }
    }

    fn visit(&mut self, node: Solution, stack: &mut Vec<Branch>) {
        self.nodes += 1;
        if self.is_dominated(node.objective()) {
            return;
        }

        match self.branching_variable(&node) {
            Some(var) => {
                // Popped first: the up branch.
                stack.push(Branch {
                    parent: node.clone(),
                    var,
                    value: 0.0,
                });
                stack.push(Branch {
                    parent: node,
                    var,
                    value: 1.0,
                });
            }
            None => {
                let values = self
                    .vars
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        if self.binaries.contains(&i) {
                            node[*v].round()
                        } else {
                            node[*v]
                        }
                    })
                    .collect();
                debug!(objective = node.objective(), nodes = self.nodes, "new incumbent");
                self.incumbent = Some(Assignment::new(values, node.objective()));
            }
        }
    }

    /// The fractional binary with the largest relaxed value.
    fn branching_variable(&self, node: &Solution) -> Option<usize> {
        self.binaries
            .iter()
            .map(|&i| (i, node[self.vars[i]]))
            .filter(|(_, value)| (value - value.round()).abs() > INTEGRALITY_TOLERANCE)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i)
    }

    fn is_dominated(&self, bound: f64) -> bool {
        self.incumbent.as_ref().is_some_and(|best| {
            bound >= best.objective() - RELATIVE_GAP * best.objective().abs().max(1.0)
        })
    }
}
