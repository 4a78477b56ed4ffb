pub mod engine;
pub mod journal;
pub mod params;
pub mod result;
pub mod schedules;
pub mod term;

pub use engine::{compute, measure};
pub use params::LeaseContractParameters;
pub use result::{AmortizationRow, CashflowRow, DepreciationRow, JournalEntry, LeaseMeasurementResult};
pub use term::{determine_lease_term, LeaseTerm, LeaseTermBasis};
