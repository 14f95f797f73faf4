//! Skeletal depth demo.
//!
//! Builds a small Y-shaped skin skeleton, computes its depth field and
//! radius attribute, and writes the result as a flexible-mesh file:
//!
//! ```text
//! cargo run --example skeleton_depth              # writes skeleton.fmt
//! cargo run --example skeleton_depth -- out.fmt   # custom output path
//! ```

use flexmesh::format::{AttributeMapping, ExportFlexibleMesh, Topology, POSITION_ATTRIBUTE};
use flexmesh::math::Point3;
use flexmesh::mesh::{Mesh, SkinLayer, SkinVertex};
use flexmesh::operations::{
    ComputeDepth, SkinRadiusToAttribute, DEPTH_ATTRIBUTE, RADIUS_ATTRIBUTE,
};

fn main() -> flexmesh::Result<()> {
    // Default: WARN for everything, DEBUG for flexmesh.
    // Override with RUST_LOG env var (e.g. RUST_LOG=flexmesh=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("flexmesh=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "skeleton.fmt".into());

    // A spine with two arms branching at vertex 2; vertex 0 is the root.
    let mut mesh = Mesh::new();
    mesh.positions = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 2.0, 0.0),
        Point3::new(-1.0, 2.5, 0.0),
        Point3::new(-2.0, 2.5, 0.0),
        Point3::new(1.0, 2.5, 0.0),
        Point3::new(2.0, 2.5, 0.0),
    ];
    mesh.edges = vec![[0, 1], [1, 2], [2, 3], [3, 4], [2, 5], [5, 6]];

    let radii = [0.5, 0.4, 0.3, 0.2, 0.1, 0.2, 0.1];
    let mut skin = SkinLayer::new(
        radii
            .iter()
            .map(|&r| SkinVertex::new([r, r]))
            .collect(),
    );
    skin.vertices[0] = SkinVertex::root([radii[0], radii[0]]);
    mesh.skin = Some(skin);

    ComputeDepth::new().execute(&mut mesh)?;
    SkinRadiusToAttribute::new().execute(&mut mesh)?;

    let depth = mesh.attributes.by_name(DEPTH_ATTRIBUTE)?;
    println!("depth field: {:?}", depth.values);

    let document = ExportFlexibleMesh::new(
        vec![
            AttributeMapping::new(POSITION_ATTRIBUTE, "POSITION"),
            AttributeMapping::new(RADIUS_ATTRIBUTE, "TEXCOORD0"),
            AttributeMapping::new(DEPTH_ATTRIBUTE, "TEXCOORD1"),
        ],
        Topology::Edge,
    )
    .execute(&mesh)?;
    document.write_file(&output)?;
    println!("wrote {output}");
    Ok(())
}
