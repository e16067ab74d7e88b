use std::f64::consts::TAU;

/// Astronomical unit in meters
pub const AU: f64 = 1.495978707e11;

/// Simulation time units per Earth year.
///
/// The core runs in normalized units (μ = 1, lengths in AU), so a body with
/// a = 1 AU has period 2π. Calendar conversion only happens at the display
/// boundary.
pub const SIM_UNITS_PER_YEAR: f64 = TAU;

/// Days per Julian year
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Meters per renderer scene unit (display scaling, never used in the core)
pub const RENDER_METERS_PER_UNIT: f64 = 1.0e9;

/// Simulation time to Julian years since the reference epoch
pub fn sim_time_to_years(t: f64) -> f64 {
    t / SIM_UNITS_PER_YEAR
}

/// Julian years since the reference epoch to simulation time
pub fn years_to_sim_time(years: f64) -> f64 {
    years * SIM_UNITS_PER_YEAR
}

/// Normalized distance (AU) to meters
pub fn au_to_meters(au: f64) -> f64 {
    au * AU
}

/// Normalized distance (AU) to renderer scene units
pub fn au_to_render_units(au: f64) -> f64 {
    au * AU / RENDER_METERS_PER_UNIT
}
