pub mod metrics;
pub mod nearest_neighbor;
pub mod optimizer;
pub mod optimizer_params;
