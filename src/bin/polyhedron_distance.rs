use clap::Parser;
use geodesic_lib::{
    geodesic_polyhedron::{
        self, mean_spacing_estimate, mean_spacing_estimate_alt, refine, Projection,
        RefineParams,
    },
    icosahedron::icosahedron_with_radius,
};
use tracing_subscriber::EnvFilter;

// Compares the predicted vertex spacing of each refinement level with the spacing measured on
// the unit sphere.
#[derive(Parser)]
struct Args {
    /// Highest refinement level to measure
    #[arg(long, default_value_t = 6)]
    max_levels: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let params: RefineParams = Projection::FixedRadius(1.).into();

    println!("level\tfreq\tpredicted\tpredicted_alt\tmean\tmin\tmax");
    for levels in 0..=args.max_levels {
        let mesh = refine(icosahedron_with_radius(1.)?, levels, &params)?;
        let angles = mesh.edge_angles();
        let mean = angles.iter().sum::<f64>() / angles.len() as f64;
        let min = angles.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = angles.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        println!(
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            levels,
            geodesic_polyhedron::frequency(levels),
            mean_spacing_estimate(levels),
            mean_spacing_estimate_alt(levels),
            mean,
            min,
            max,
        );
    }

    Ok(())
}
