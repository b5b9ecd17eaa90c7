//! State of the Earth relative to the Sun at midnight (UTC) of the current day.
//!
//! Kernels are read from `$BARYTRACK_KERNEL_DIR` or the working directory.
use barytrack::{
    config::KernelSet,
    context::EphemerisContext,
    ephemeris::EphemerisQuery,
    frames::ReferenceFrame,
    spk::naif_ids::NaifBody,
    time::{TimeConverter, UtcTimestamp},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let context = EphemerisContext::load(&KernelSet::from_env())?;

    let now = UtcTimestamp::now()?;
    println!("Current time (UTC):\t\t\t{now}");

    let midnight = now.at_midnight();
    println!("Current time (UTC, midnight):\t\t{midnight}");

    let et = context.utc_to_et(&midnight)?;
    println!("Current time (ephemeris time, ET):\t{et}");

    let (state, light_time) = context.state(
        NaifBody::EARTH,
        et,
        ReferenceFrame::EclipJ2000,
        NaifBody::Sun,
    )?;

    println!("\n=== Earth state wrt the Sun ({}) ===", ReferenceFrame::EclipJ2000);
    println!(
        "position (km):   [{:.6}, {:.6}, {:.6}]",
        state.position.x, state.position.y, state.position.z
    );
    println!(
        "velocity (km/s): [{:.9}, {:.9}, {:.9}]",
        state.velocity.x, state.velocity.y, state.velocity.z
    );
    println!("distance (km):   {:.6}", state.distance());
    println!("light time (s):  {light_time:.6}");
    Ok(())
}
