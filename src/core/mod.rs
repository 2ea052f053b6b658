mod engine;
mod solver;
mod types;

pub use engine::{chart_age_ticks, run_projection, run_projection_for_year};
pub use solver::{ideal_retirement_capital, net_monthly_income, required_monthly_contribution};
pub use types::{ChartPoint, Params, Priority, Project, ProjectType, Projection, Repetition};
