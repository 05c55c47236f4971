mod microlp_backend;

use std::time::Duration;

pub use microlp_backend::MicroLpBackend;

/// Handle to a variable inside one [`LinearModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable(usize);

impl Variable {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Continuous,
    Binary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub kind: VariableKind,
    pub lower: f64,
    pub upper: f64,
    /// Objective coefficient.
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    LessOrEqual,
    GreaterOrEqual,
    Equal,
}

/// `Σ coeff·var  <relation>  rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub terms: Vec<(Variable, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

/// A minimization problem over continuous and binary variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearModel {
    variables: Vec<VariableDef>,
    constraints: Vec<Constraint>,
}

impl LinearModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a continuous variable in `[lower, upper]`. `upper` may be
    /// `f64::INFINITY`.
    pub fn add_continuous(&mut self, lower: f64, upper: f64, cost: f64) -> Variable {
        self.push_variable(VariableDef {
            kind: VariableKind::Continuous,
            lower,
            upper,
            cost,
        })
    }

    /// Add a 0/1 variable.
    pub fn add_binary(&mut self, cost: f64) -> Variable {
        self.push_variable(VariableDef {
            kind: VariableKind::Binary,
            lower: 0.0,
            upper: 1.0,
            cost,
        })
    }

    pub fn add_constraint(&mut self, terms: Vec<(Variable, f64)>, relation: Relation, rhs: f64) {
        self.constraints.push(Constraint {
            terms,
            relation,
            rhs,
        });
    }

    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn push_variable(&mut self, def: VariableDef) -> Variable {
        self.variables.push(def);
        Variable(self.variables.len() - 1)
    }
}

/// Variable values of a solved model.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    values: Vec<f64>,
    objective: f64,
}

impl Assignment {
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    pub fn value(&self, var: Variable) -> f64 {
        self.values.get(var.0).copied().unwrap_or(0.0)
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// Result of one backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveStatus {
    Optimal(Assignment),
    /// Best integer-feasible assignment found before the time limit.
    Feasible(Assignment),
    Infeasible,
    /// The time limit passed before any integer-feasible assignment.
    TimedOut,
    Failed(String),
}

impl SolveStatus {
    /// The assignment, only when optimality was proven.
    pub fn into_optimal(self) -> Option<Assignment> {
        match self {
            SolveStatus::Optimal(assignment) => Some(assignment),
            _ => None,
        }
    }

    /// The assignment, proven optimal or the incumbent at the time limit.
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            SolveStatus::Optimal(assignment) | SolveStatus::Feasible(assignment) => {
                Some(assignment)
            }
            _ => None,
        }
    }
}

/// A mixed-integer solver over a [`LinearModel`].
///
/// Implementations must stop searching once `time_limit` has passed and
/// return the best incumbent as [`SolveStatus::Feasible`], or
/// [`SolveStatus::TimedOut`] when there is none.
pub trait MilpBackend: Send + Sync {
    fn solve(&self, model: &LinearModel, time_limit: Duration) -> SolveStatus;
}
