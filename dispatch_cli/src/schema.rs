use dispatch_optimizer::json::types::{JsonOptimizedRoute, JsonRouteRequest};
use schemars::schema_for;
use serde_json::json;

pub fn run() -> anyhow::Result<()> {
    let schemas = json!({
        "request": schema_for!(JsonRouteRequest),
        "response": schema_for!(JsonOptimizedRoute),
    });

    println!("{}", serde_json::to_string_pretty(&schemas)?);

    Ok(())
}
