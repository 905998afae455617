use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use geodesic_lib::{
    config::SphereConfig,
    geodesic_polyhedron::{MidpointSharing, Projection},
    obj::write_obj,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds a geodesic sphere from a refined icosahedron and writes it as Wavefront OBJ.
///
/// Flags override the values read from --config.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// RON file describing the sphere
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of subdivision passes
    #[arg(long)]
    levels: Option<u32>,

    /// Project new vertices onto a sphere of this radius
    #[arg(long, conflicts_with_all = ["inherit_radius", "flat"])]
    radius: Option<f64>,

    /// Project each new vertex to the radius of its edge's first endpoint
    #[arg(long, conflicts_with = "flat")]
    inherit_radius: bool,

    /// Leave new vertices on the flat faces
    #[arg(long)]
    flat: bool,

    /// Radius the seed icosahedron is projected onto before refining
    #[arg(long)]
    seed_radius: Option<f64>,

    /// Keep the seed at its golden rectangle coordinates
    #[arg(long, conflicts_with = "seed_radius")]
    raw_seed: bool,

    /// Give every face its own edge midpoints instead of sharing them between neighbours
    #[arg(long)]
    per_face_midpoints: bool,

    /// Refuse to build meshes with more faces than this
    #[arg(long)]
    max_faces: Option<usize>,

    /// Object name written to the OBJ file
    #[arg(long, default_value = "geodesic")]
    name: String,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut SphereConfig) {
        if let Some(levels) = self.levels {
            config.levels = levels;
        }
        if let Some(radius) = self.radius {
            config.projection = Projection::FixedRadius(radius);
        }
        if self.inherit_radius {
            config.projection = Projection::InheritRadius;
        }
        if self.flat {
            config.projection = Projection::None;
        }
        if let Some(radius) = self.seed_radius {
            config.seed_radius = Some(radius);
        }
        if self.raw_seed {
            config.seed_radius = None;
        }
        if self.per_face_midpoints {
            config.midpoints = MidpointSharing::PerFace;
        }
        if let Some(max_faces) = self.max_faces {
            config.max_faces = max_faces;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SphereConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SphereConfig::default(),
    };
    args.apply(&mut config);
    config.validate().context("invalid options")?;

    let mesh = config.build().context("building sphere")?;
    info!(
        "Built sphere: {} vertices, {} faces, euler characteristic {}",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.euler_characteristic()
    );
    if let Some((min, max)) = mesh.radius_range() {
        info!("Vertex radius range: {} to {}", min, max);
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_obj(&mesh, Some(args.name.as_str()), BufWriter::new(file))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_obj(&mesh, Some(args.name.as_str()), BufWriter::new(stdout.lock()))
                .context("writing to stdout")?;
        }
    }

    Ok(())
}
