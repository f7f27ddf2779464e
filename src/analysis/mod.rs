pub mod compare;
pub mod environment;
pub mod plan;
pub mod states;

pub use compare::{ScoreComparison, compare};
pub use environment::{BnaEnv, City, StateInfo, derive_state_info, prepare_environment};
pub use plan::{ModularPlan, reference_step, run_comparison, run_modular};
