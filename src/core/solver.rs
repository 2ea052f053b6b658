use super::types::Params;

pub fn net_monthly_income(params: &Params) -> f64 {
    (params.desired_income - params.other_incomes).max(0.0)
}

pub fn ideal_retirement_capital(params: &Params) -> f64 {
    let net_income = net_monthly_income(params);
    if net_income <= 0.0 || params.post_retirement_rate <= 0.0 {
        // The perpetuity has no finite principal at a non-positive rate;
        // report 0 rather than letting Infinity reach the series.
        return 0.0;
    }
    let capital = (net_income * 12.0) / (params.post_retirement_rate / 100.0);
    // A denormal rate can overflow the division; same sentinel.
    if capital.is_finite() { capital } else { 0.0 }
}

pub fn required_monthly_contribution(params: &Params) -> f64 {
    let capital = ideal_retirement_capital(params);
    if params.retirement_age <= params.current_age || capital <= 0.0 {
        return 0.0;
    }

    let years = f64::from(params.retirement_age - params.current_age);
    let rate = params.accumulation_rate / 100.0;
    let compound_factor = (1.0 + rate).powf(years);
    let growth = compound_factor - 1.0;
    if growth == 0.0 {
        // No compounding to lean on; spread the target evenly over the months.
        return capital / (years * 12.0);
    }
    (capital * rate) / (growth * 12.0)
}
