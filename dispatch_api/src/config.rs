use std::{env::VarError, fmt::Display, net::SocketAddr, str::FromStr};

use anyhow::{Context, anyhow};
use dispatch_optimizer::{
    problem::kmh::Kmh,
    solver::optimizer_params::{
        DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_DWELL_TIME, DEFAULT_PROVIDER_TIMEOUT, OptimizerParams,
    },
};
use dispatch_osrm::client::OsrmClientParams;
use jiff::SignedDuration;

pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_OSRM_PROFILE: &str = "driving";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub osrm_url: String,
    pub osrm_profile: String,
    pub provider_timeout: SignedDuration,
    pub average_speed: Kmh,
    pub dwell_time: SignedDuration,
}

impl Config {
    pub fn env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name))
    }

    /// Reads every setting through `var`, unset ones fall back to their default.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let listen_addr = setting(&var, "DISPATCH_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?;
        let osrm_url: String = setting(&var, "OSRM_URL", DEFAULT_OSRM_URL)?;
        let osrm_profile = setting(&var, "OSRM_PROFILE", DEFAULT_OSRM_PROFILE)?;
        let timeout_secs: u32 = setting(
            &var,
            "DISPATCH_PROVIDER_TIMEOUT_SECS",
            &DEFAULT_PROVIDER_TIMEOUT.as_secs().to_string(),
        )?;
        let speed_kmh: f64 = setting(
            &var,
            "DISPATCH_AVERAGE_SPEED_KMH",
            &DEFAULT_AVERAGE_SPEED_KMH.to_string(),
        )?;
        let dwell_secs: u32 = setting(
            &var,
            "DISPATCH_DWELL_SECS",
            &DEFAULT_DWELL_TIME.as_secs().to_string(),
        )?;

        let config = Self {
            listen_addr,
            osrm_url: osrm_url.trim_end_matches('/').to_string(),
            osrm_profile,
            provider_timeout: SignedDuration::from_secs(i64::from(timeout_secs)),
            average_speed: Kmh::new(speed_kmh),
            dwell_time: SignedDuration::from_secs(i64::from(dwell_secs)),
        };

        config
            .optimizer_params()
            .validate()
            .context("invalid DISPATCH_* settings")?;

        Ok(config)
    }

    pub fn optimizer_params(&self) -> OptimizerParams {
        OptimizerParams {
            provider_timeout: self.provider_timeout,
            average_speed: self.average_speed,
            dwell_time: self.dwell_time,
        }
    }

    pub fn osrm_params(&self) -> OsrmClientParams {
        OsrmClientParams {
            osrm_url: self.osrm_url.clone(),
            profile: self.osrm_profile.clone(),
            timeout: self.provider_timeout.unsigned_abs(),
        }
    }
}

fn setting<F, T>(var: &F, name: &str, default: &str) -> anyhow::Result<T>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: Display,
{
    let value = match var(name) {
        Ok(value) => value,
        Err(VarError::NotPresent) => default.to_string(),
        Err(VarError::NotUnicode(_)) => return Err(anyhow!("{name} value is not valid unicode")),
    };

    value
        .trim()
        .parse()
        .map_err(|error| anyhow!("{name} is invalid: {error}"))
}
