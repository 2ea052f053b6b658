use chrono::{Datelike, Local};

use super::solver::{ideal_retirement_capital, net_monthly_income, required_monthly_contribution};
use super::types::{ChartPoint, Params, Project, Projection, Repetition};

const PROJECTION_END_AGE: u32 = 100;

pub fn run_projection(params: &Params, projects: &[Project]) -> Projection {
    run_projection_for_year(params, projects, Local::now().year())
}

pub fn run_projection_for_year(
    params: &Params,
    projects: &[Project],
    base_year: i32,
) -> Projection {
    let net_income = net_monthly_income(params);
    let ideal_capital = ideal_retirement_capital(params);
    let annual_contribution = params.monthly_investment * 12.0;

    let mut series =
        Vec::with_capacity((PROJECTION_END_AGE + 1).saturating_sub(params.current_age) as usize);
    let mut total_wealth = 0.0_f64;
    let mut principal_wealth = 0.0_f64;

    for age in params.current_age..=PROJECTION_END_AGE {
        let calendar_year = base_year.saturating_add((age - params.current_age) as i32);

        if age <= params.retirement_age {
            total_wealth = if age == params.current_age {
                annual_contribution
            } else {
                total_wealth * (1.0 + params.accumulation_rate / 100.0) + annual_contribution
            };
            principal_wealth += annual_contribution;

            let project_costs = total_project_costs(projects, calendar_year);
            total_wealth = (total_wealth - project_costs).max(0.0);
            principal_wealth = (principal_wealth - project_costs).max(0.0);
        } else {
            let annual_withdrawal = net_income * 12.0;
            total_wealth = (total_wealth * (1.0 + params.post_retirement_rate / 100.0)
                - annual_withdrawal)
                .max(0.0);
            // Principal keeps its last accumulation-phase value from here on.
        }

        series.push(ChartPoint {
            age,
            patrimonio_total: total_wealth,
            patrimonio_principal: principal_wealth,
            aposentadoria_ideal: ideal_capital,
        });
    }

    let final_patrimony = series
        .iter()
        .find(|point| point.age == params.retirement_age)
        .map(|point| point.patrimonio_total)
        .unwrap_or(0.0);
    let target_age = series
        .iter()
        .find(|point| point.patrimonio_total >= point.aposentadoria_ideal)
        .map(|point| point.age)
        .unwrap_or(PROJECTION_END_AGE);

    Projection {
        series,
        ideal_retirement_capital: ideal_capital,
        monthly_contribution_needed: required_monthly_contribution(params),
        final_patrimony,
        target_age,
    }
}

pub fn chart_age_ticks(current_age: u32) -> Vec<u32> {
    (current_age..=PROJECTION_END_AGE).step_by(8).collect()
}

fn total_project_costs(projects: &[Project], calendar_year: i32) -> f64 {
    projects
        .iter()
        .filter(|project| project.is_active)
        .map(|project| project_cost_for_year(project, calendar_year))
        .sum()
}

fn project_cost_for_year(project: &Project, calendar_year: i32) -> f64 {
    let Some(start_year) = project_start_year(project) else {
        return 0.0;
    };

    if project.is_term_project {
        // The whole cost lands as one lump in the year the term ends.
        let duration_years = match project.repetition {
            Repetition::Mensal => project.repetition_count.div_ceil(12),
            Repetition::Anual => project.repetition_count,
            Repetition::Unica => 0,
        };
        let final_year =
            start_year.saturating_add(i32::try_from(duration_years).unwrap_or(i32::MAX));
        if calendar_year == final_year {
            project.total_value
        } else {
            0.0
        }
    } else {
        match project.repetition {
            Repetition::Unica => {
                if calendar_year == start_year {
                    project.total_value
                } else {
                    0.0
                }
            }
            Repetition::Anual => {
                let count = i32::try_from(project.repetition_count).unwrap_or(i32::MAX);
                let window = start_year..start_year.saturating_add(count);
                if window.contains(&calendar_year) {
                    project.total_value / project.repetition_count as f64
                } else {
                    0.0
                }
            }
            // No schedule is defined for monthly non-term projects yet.
            Repetition::Mensal => 0.0,
        }
    }
}

fn project_start_year(project: &Project) -> Option<i32> {
    project
        .start_date
        .split('/')
        .nth(2)
        .and_then(|year| year.trim().parse::<i32>().ok())
}
