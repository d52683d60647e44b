// main.rs
//
// Load a mesh stored as two .npy arrays, compute its face and vertex normals,
// and save both as .npy arrays.

use clap::Parser;
use mesh_normals::io::{format_array, load_float_array, load_int_array, save_array};
use mesh_normals::{MeshResult, TriangleMesh};
use nalgebra::Vector3;
use std::path::PathBuf;
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(name = "mesh-normals")]
#[command(version, about = "Compute face and vertex normals of a triangle mesh stored as .npy arrays")]
struct Cli {
    /// (n, 3) float64 array of vertex coordinates.
    #[arg(long, default_value = "data/bunny_vertices.npy")]
    vertices: PathBuf,

    /// (m, 3) int32 array of counter-clockwise vertex index triples.
    #[arg(long, default_value = "data/bunny_faces.npy")]
    faces: PathBuf,

    /// Output path of the (m, 3) face normal array.
    #[arg(long, default_value = "data/face_normals.npy")]
    face_normals: PathBuf,

    /// Output path of the (n, 3) vertex normal array.
    #[arg(long, default_value = "data/vertex_normals.npy")]
    vertex_normals: PathBuf,

    /// Orientation of the mesh relative to +Z, applied before computing.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    orientation: Option<Vec<f64>>,

    /// Print the loaded and computed arrays.
    #[arg(long)]
    print: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> MeshResult<()> {
    // Load both inputs before doing any work
    let faces = load_int_array(&cli.faces)?;
    let vertices = load_float_array(&cli.vertices)?;
    info!(
        vertices = vertices.nrows(),
        faces = faces.nrows(),
        "loaded mesh arrays"
    );

    if cli.print {
        println!("vertices =\n{}", format_array(&vertices));
        println!("faces =\n{}", format_array(&faces));
    }

    let mut mesh = TriangleMesh::from_arrays(&vertices, &faces)?;

    if let Some([x, y, z]) = cli.orientation.as_deref() {
        mesh.set_orientation(Vector3::new(*x, *y, *z))?;
        info!(angle = mesh.object_angle(), "applied orientation");
    }

    mesh.compute_normals();

    let isolated = mesh.isolated_vertices().len();
    if isolated > 0 {
        warn!(isolated, "vertices not referenced by any face have zero normals");
    }

    let face_normals = mesh.face_normals_array();
    let vertex_normals = mesh.vertex_normals_array();

    if cli.print {
        println!("face_normals =\n{}", format_array(&face_normals));
        println!("vertex_normals =\n{}", format_array(&vertex_normals));
    }

    save_array(&cli.face_normals, &face_normals)?;
    save_array(&cli.vertex_normals, &vertex_normals)?;
    info!(
        face_normals = %cli.face_normals.display(),
        vertex_normals = %cli.vertex_normals.display(),
        "saved normals"
    );

    Ok(())
}
