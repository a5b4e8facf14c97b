pub mod zonal_statistics;

pub use zonal_statistics::{
    Period, PeriodSelector, ZonalMean, ZonalStatisticsRound, compute_zonal_statistics,
    process_period_list, process_periods,
};
