//! Trajectory of the Solar System Barycentre seen from the Sun over 10000 days,
//! in Sun radii, drawn to `ssb_wrt_sun.png`.
use barytrack::{
    config::{KernelSet, SsbScenario},
    context::EphemerisContext,
    pipeline::SsbPipeline,
    plot::PngPresenter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let context = EphemerisContext::load(&KernelSet::from_env())?;
    context.describe();

    let scenario = SsbScenario::default();
    let presenter = PngPresenter::new(scenario.plot.clone());
    let report = SsbPipeline::new(&context, &context, &presenter).run(&scenario)?;

    let (min, max) = report
        .distances
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });

    println!("start: {} UTC (ET {:.6})", scenario.start, report.start_et);
    println!("end:   ET {:.6}", report.end_et);
    println!("samples: {}", report.series.len());
    println!("{} radius: {} km", scenario.radius_body, report.radius);
    println!(
        "SSB distance to the Sun: min {:.3} km ({:.4} radii), max {:.3} km ({:.4} radii)",
        min,
        min / report.radius,
        max,
        max / report.radius
    );
    println!("plot written to {}", scenario.plot.output);
    Ok(())
}
