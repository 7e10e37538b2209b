use dispatch_optimizer::{provider::osrm::OsrmRouteProvider, solver::optimizer::RouteOptimizer};

pub struct AppState {
    pub optimizer: RouteOptimizer<OsrmRouteProvider>,
}
