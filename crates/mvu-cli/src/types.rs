use mvu_cli::session::SessionReport;

/// One expectation of the reference scenario.
#[derive(Debug, Clone)]
pub struct ScenarioCheck {
    pub name: &'static str,
    pub expected: String,
    pub actual: String,
}

impl ScenarioCheck {
    pub fn new(name: &'static str, expected: impl ToString, actual: impl ToString) -> Self {
        Self {
            name,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub report: SessionReport,
    pub checks: Vec<ScenarioCheck>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(ScenarioCheck::passed)
    }
}
