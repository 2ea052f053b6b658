use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repetition {
    Unica,
    Anual,
    Mensal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProjectType {
    Viagem,
    #[serde(rename = "Veículo", alias = "Veiculo")]
    Veiculo,
    Casa,
    #[serde(rename = "Família", alias = "Familia")]
    Familia,
    #[serde(rename = "Eletrônico", alias = "Eletronico")]
    Eletronico,
    #[serde(rename = "Educação", alias = "Educacao")]
    Educacao,
    Hobby,
    Profissional,
    #[serde(rename = "Saúde", alias = "Saude")]
    Saude,
    Outro,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Priority {
    Essencial,
    Desejo,
    Sonho,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub current_age: u32,
    pub retirement_age: u32,
    pub desired_income: f64,
    pub other_incomes: f64,
    pub monthly_investment: f64,
    pub accumulation_rate: f64,
    pub post_retirement_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub start_date: String,
    pub total_value: f64,
    #[serde(default)]
    pub is_term_project: bool,
    #[serde(default)]
    pub has_airfare: bool,
    #[serde(default = "default_repetition")]
    pub repetition: Repetition,
    #[serde(default = "default_repetition_count")]
    pub repetition_count: u32,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_repetition() -> Repetition {
    Repetition::Unica
}

fn default_repetition_count() -> u32 {
    1
}

fn default_priority() -> Priority {
    Priority::Essencial
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub age: u32,
    pub patrimonio_total: f64,
    pub patrimonio_principal: f64,
    pub aposentadoria_ideal: f64,
}

#[derive(Debug, Clone)]
pub struct Projection {
    pub series: Vec<ChartPoint>,
    pub ideal_retirement_capital: f64,
    pub monthly_contribution_needed: f64,
    pub final_patrimony: f64,
    pub target_age: u32,
}
