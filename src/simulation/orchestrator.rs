//! Main generation orchestrator
//!
//! Runs the phases in dependency order: homes and beds, staff, the admission
//! lifecycle of every home, daily care logs, activities, incidents,
//! appointments and documents. The finished dataset is audited before it is
//! handed back. Every phase draws from its own seeded stream (see
//! [`crate::simulation::seeding`]), so a fixed seed and anchor replay the
//! same dataset.

use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::documents::{DocumentPlanner, DocumentRenderer, PlainTextRenderer, RenderedDocument};
use crate::events::{
    ActivityGenerator, AppointmentGenerator, CareLogGenerator, CareLogs, HomeIncidentCounter, IncidentGenerator,
};
use crate::facility::{Home, HomeGenerator, HomeRegistry};
use crate::phase_span;
use crate::reference::BuiltinNameSource;
use crate::resident::{HomeCensus, LifecycleSimulator, ResidentGenerator};
use crate::simulation::audit::DatasetAuditor;
use crate::simulation::dataset::SyntheticDataset;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::horizon::SimulationHorizon;
use crate::simulation::seeding::{derive_seed, stream_rng, SeedStream};
use crate::simulation::statistics::GenerationStatistics;
use crate::types::{validate_weight_tables, SimulationConfig, UserId};
use crate::user::{CaregiverRoster, StaffDirectory, StaffGenerator};

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// The linked collections
    pub dataset: SyntheticDataset,
    /// Document blobs matching `dataset.documents`
    pub rendered_documents: Vec<RenderedDocument>,
    /// Counts for the run report
    pub statistics: GenerationStatistics,
}

/// Coordinates the generation phases of one run
#[derive(Debug)]
pub struct SimulationOrchestrator {
    config: SimulationConfig,
    horizon: SimulationHorizon,
    names: BuiltinNameSource,
    renderer: Box<dyn DocumentRenderer>,
}

impl SimulationOrchestrator {
    /// Validate `config` and fix the horizon
    ///
    /// Without an anchor the horizon ends at the current wall clock time,
    /// resolved once here.
    #[instrument(skip(config), fields(seed = config.seed, homes = config.home_count))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;
        validate_weight_tables()?;

        let horizon = SimulationHorizon::ending_at(config.resolve_anchor(), config.horizon_days);
        info!(
            start = %horizon.start(),
            end = %horizon.end(),
            "Initializing orchestrator for {} homes",
            config.home_count
        );

        Ok(Self { config, horizon, names: BuiltinNameSource::new(), renderer: Box::new(PlainTextRenderer::new()) })
    }

    /// Replace the document renderer
    pub fn with_renderer(mut self, renderer: Box<dyn DocumentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Configuration of the run
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Horizon every timestamp falls in
    pub fn horizon(&self) -> SimulationHorizon {
        self.horizon
    }

    /// Generate, audit and summarize the full dataset
    #[instrument(skip(self), fields(seed = self.config.seed))]
    pub fn run(&self) -> SimulationResult<GenerationOutput> {
        let started = Instant::now();
        let mut dataset = SyntheticDataset::default();

        let mut staff_generator = StaffGenerator::from_rng(Box::new(self.rng(SeedStream::Staff, 0)));
        let administrators = staff_generator.generate_administrators(&self.horizon, &self.names);

        let registry = self.generate_homes(administrators.0.id)?;
        let home_records: Vec<Home> = registry.homes().cloned().collect();

        let staff = {
            let _span = phase_span!("staff").entered();
            let staff = staff_generator.staff_homes(
                administrators,
                &home_records,
                self.config.caregivers_per_home(),
                self.config.cross_home_assignment_probability,
                &self.horizon,
                &self.names,
            );
            info!(users = staff.users.len(), caregivers = staff.caregiver_count(), "Staff generated");
            staff
        };
        let roster = staff.roster();

        let censuses = self.simulate_lifecycles(&registry, &roster)?;

        dataset.homes = home_records;
        dataset.beds = registry.beds().cloned().collect();
        let StaffDirectory { users, assignments } = staff;
        dataset.users = users;
        dataset.caregiver_home_assignments = assignments;
        for census in censuses {
            dataset.residents.extend(census.residents);
            dataset.bed_occupancy.extend(census.ledger.into_intervals());
        }

        self.generate_care_logs(&mut dataset, &roster);
        self.generate_activities(&mut dataset, &roster);
        self.generate_incidents(&mut dataset, &roster)?;
        self.generate_appointments(&mut dataset, &roster);
        let rendered_documents = self.generate_documents(&mut dataset, &registry)?;

        {
            let _span = phase_span!("audit").entered();
            DatasetAuditor::new(self.horizon).check(&dataset)?;
            info!(records = dataset.record_count(), "Dataset passed audit");
        }

        let statistics = GenerationStatistics::from_dataset(&dataset, self.horizon.length_days(), started.elapsed());
        Ok(GenerationOutput { dataset, rendered_documents, statistics })
    }

    fn rng(&self, stream: SeedStream, index: usize) -> StdRng {
        stream_rng(self.config.seed, stream, index as u64)
    }

    fn generate_homes(&self, admin: UserId) -> SimulationResult<HomeRegistry> {
        let _span = phase_span!("homes").entered();
        let mut generator = HomeGenerator::from_rng(Box::new(self.rng(SeedStream::Homes, 0)));
        let registry: HomeRegistry =
            generator.generate_homes(&self.config, &self.horizon, admin, &self.names)?.into_iter().collect();
        registry.validate().map_err(SimulationError::invariant_violation)?;

        info!(homes = registry.home_count(), beds = registry.bed_count(), "Homes generated");
        Ok(registry)
    }

    fn simulate_lifecycles(
        &self,
        registry: &HomeRegistry,
        roster: &CaregiverRoster,
    ) -> SimulationResult<Vec<HomeCensus>> {
        let _span = phase_span!("lifecycle").entered();
        let simulator = LifecycleSimulator::new(ResidentGenerator::new(&self.names), roster, self.horizon);

        let mut censuses = Vec::with_capacity(registry.home_count());
        for (index, entry) in registry.entries().iter().enumerate() {
            let mut rng = self.rng(SeedStream::Lifecycle, index);
            censuses.push(simulator.simulate_home(&entry.home, &entry.beds, &mut rng)?);
        }

        info!(
            residents = censuses.iter().map(|census| census.residents.len()).sum::<usize>(),
            active = censuses.iter().map(HomeCensus::active_count).sum::<usize>(),
            "Lifecycle simulated"
        );
        Ok(censuses)
    }

    fn generate_care_logs(&self, dataset: &mut SyntheticDataset, roster: &CaregiverRoster) {
        let _span = phase_span!("care_logs").entered();
        let generator = CareLogGenerator::new(self.horizon);

        let mut logs = CareLogs::default();
        for (index, resident) in dataset.residents.iter().enumerate() {
            let seed = derive_seed(self.config.seed, SeedStream::CareLogs, index as u64);
            logs.extend(generator.stream(resident, roster, seed));
        }
        dataset.absorb_care_logs(logs);

        info!(records = dataset.care_log_count(), "Care logs generated");
    }

    fn generate_activities(&self, dataset: &mut SyntheticDataset, roster: &CaregiverRoster) {
        let _span = phase_span!("activities").entered();
        let generator = ActivityGenerator::new(self.horizon);

        for (index, home) in dataset.homes.iter().enumerate() {
            let residents: Vec<_> =
                dataset.residents.iter().filter(|resident| resident.home_id == home.id).cloned().collect();
            let mut rng = self.rng(SeedStream::Activities, index);
            let schedule = generator.generate_for_home(home, &residents, roster, &mut rng);
            dataset.activities.extend(schedule.activities);
            dataset.activity_participants.extend(schedule.participations);
        }

        info!(
            activities = dataset.activities.len(),
            participants = dataset.activity_participants.len(),
            "Activities generated"
        );
    }

    fn generate_incidents(&self, dataset: &mut SyntheticDataset, roster: &CaregiverRoster) -> SimulationResult<()> {
        let _span = phase_span!("incidents").entered();
        let generator = IncidentGenerator::new(self.horizon);

        let mut incidents = Vec::new();
        for (index, home) in dataset.homes.iter().enumerate() {
            let residents: Vec<_> =
                dataset.residents.iter().filter(|resident| resident.home_id == home.id).cloned().collect();
            let mut counter = HomeIncidentCounter::new(home.sequence);
            let mut rng = self.rng(SeedStream::Incidents, index);
            incidents.extend(generator.generate_for_home(home, &residents, roster, &mut counter, &mut rng)?);
            debug!(home = %home.name, issued = counter.issued(), "Incident numbers issued");
        }
        dataset.incidents = incidents;

        info!(incidents = dataset.incidents.len(), "Incidents generated");
        Ok(())
    }

    fn generate_appointments(&self, dataset: &mut SyntheticDataset, roster: &CaregiverRoster) {
        let _span = phase_span!("appointments").entered();
        let generator = AppointmentGenerator::new(self.horizon, &self.names)
            .with_upcoming_days(self.config.upcoming_appointment_days);

        let mut appointments = Vec::new();
        for (index, resident) in dataset.residents.iter().enumerate() {
            let mut rng = self.rng(SeedStream::Appointments, index);
            appointments.extend(generator.generate_for_resident(resident, roster, &mut rng));
        }
        dataset.appointments = appointments;

        info!(appointments = dataset.appointments.len(), "Appointments generated");
    }

    fn generate_documents(
        &self,
        dataset: &mut SyntheticDataset,
        registry: &HomeRegistry,
    ) -> SimulationResult<Vec<RenderedDocument>> {
        if !self.config.render_documents {
            debug!("Document rendering disabled");
            return Ok(Vec::new());
        }

        let _span = phase_span!("documents").entered();
        let planner = DocumentPlanner::new(self.horizon);

        let mut rendered = Vec::new();
        for (index, resident) in dataset.residents.iter().enumerate() {
            let home = registry.get_home(resident.home_id).ok_or_else(|| {
                SimulationError::invariant_violation(format!(
                    "resident {} lives in unknown home {}",
                    resident.id, resident.home_id
                ))
            })?;
            let mut rng = self.rng(SeedStream::Documents, index);
            for request in planner.plan(resident, &mut rng) {
                rendered.push(self.renderer.render(resident, home, &request, &mut rng)?);
            }
        }
        dataset.documents = rendered.iter().map(|document| document.metadata.clone()).collect();

        info!(documents = dataset.documents.len(), "Documents rendered");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn config() -> SimulationConfig {
        SimulationConfig {
            seed: 7,
            anchor: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
            horizon_days: 365,
            home_count: 2,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig { home_count: 0, ..config() };
        let error = SimulationOrchestrator::new(config).unwrap_err();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
    }

    #[test]
    fn test_run_produces_linked_dataset() {
        let output = SimulationOrchestrator::new(config()).unwrap().run().unwrap();
        let dataset = &output.dataset;

        assert_eq!(dataset.homes.len(), 2);
        assert!(!dataset.residents.is_empty());
        assert_eq!(dataset.bed_occupancy.len(), dataset.residents.len());
        assert_eq!(output.rendered_documents.len(), dataset.documents.len());
        assert_eq!(output.statistics.total_residents, dataset.residents.len());
        assert!(dataset.care_log_count() > 0);
    }

    #[test]
    fn test_documents_can_be_disabled() {
        let config = SimulationConfig { render_documents: false, ..config() };
        let output = SimulationOrchestrator::new(config).unwrap().run().unwrap();
        assert!(output.dataset.documents.is_empty());
        assert!(output.rendered_documents.is_empty());
    }
}
