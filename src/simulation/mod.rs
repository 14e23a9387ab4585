pub mod performance;
pub mod rates;

pub use performance::{compare_channels, simulate_performance, AppliedMultipliers, SimulationInput, SimulationResult};
pub use rates::{
    CampaignStrategy, Channel, ChannelRateTable, ChannelRates, SimulationTables, StrategyMultiplier,
    StrategyMultiplierTable,
};
