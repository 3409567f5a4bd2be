use std::sync::Arc;

use crate::analysis::lifetime::{LifetimeImpactProjector, ProjectionRates};
use crate::benchmark::resolver::{BenchmarkResolver, GenderBenchmarkResolver};
use crate::benchmark::tables::BenchmarkTables;
use crate::benchmark::warehouse::SalaryWarehouse;
use crate::career_break::impact::ImpactAssumptions;
use crate::career_break::sandbox::BankingSandbox;
use crate::career_break::simulator::{CareerBreakSimulator, SimulationSettings};
use crate::config::Config;
use crate::negotiation::coach::ReplyEnricher;
use crate::negotiation::selector::TipSelector;
use crate::negotiation::store::TipStore;
use crate::negotiation::tips::TipTable;

/// Live collaborators. Any of them may be absent.
#[derive(Clone, Default)]
pub struct Sources {
    pub warehouse: Option<Arc<dyn SalaryWarehouse>>,
    pub tip_store: Option<Arc<dyn TipStore>>,
    pub sandbox: Option<Arc<dyn BankingSandbox>>,
    pub coach: Option<Arc<dyn ReplyEnricher>>,
}

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub benchmarks: BenchmarkResolver,
    pub gender_benchmarks: GenderBenchmarkResolver,
    pub projector: LifetimeImpactProjector,
    pub simulator: CareerBreakSimulator,
    pub impact: ImpactAssumptions,
    pub tips: TipSelector,
    pub coach: Option<Arc<dyn ReplyEnricher>>,
}

impl AppState {
    pub fn new(config: &Config, sources: Sources) -> Self {
        let timeout = config.external_timeout;
        let tables = Arc::new(BenchmarkTables::default());

        let simulation = SimulationSettings {
            pacing: config.sandbox_pacing,
            budget: config.simulation_budget,
            ..SimulationSettings::default()
        };

        Self {
            benchmarks: BenchmarkResolver::new(sources.warehouse.clone(), tables.clone(), timeout),
            gender_benchmarks: GenderBenchmarkResolver::new(sources.warehouse, tables, timeout),
            projector: LifetimeImpactProjector::new(ProjectionRates::default()),
            simulator: CareerBreakSimulator::new(sources.sandbox, simulation),
            impact: ImpactAssumptions::default(),
            tips: TipSelector::new(sources.tip_store, Arc::new(TipTable::default()), timeout),
            coach: sources.coach,
        }
    }
}
