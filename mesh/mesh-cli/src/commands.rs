//! Subcommand implementations.
//!
//! Each command writes its human-readable output to `out` so tests can
//! capture it.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use mesh::buffers::{RenderBuffers, RenderVertex, ShadingMode};
use mesh::io::{MeshFormat, save_mesh};
use mesh::subdivide::{
    SubdivideParams, SubdivisionMethod, icosphere, sphere_report, subdivide_mesh,
};
use mesh::types::{IndexedMesh, MeshTopology, icosahedron_with_radius};
use owo_colors::OwoColorize;
use tracing::info;

use crate::SphereArgs;

/// Build the refined mesh, logging the subdivision summary.
fn build(sphere: SphereArgs, method: SubdivisionMethod) -> Result<IndexedMesh> {
    let SphereArgs { levels, radius } = sphere;
    ensure!(
        radius.is_finite() && radius > 0.0,
        "radius must be a positive number, got {radius}"
    );

    if levels == 0 {
        return icosphere(0, radius).context("failed to build icosahedron");
    }

    let params = SubdivideParams::spherical(radius)
        .with_method(method)
        .with_iterations(levels);
    let result = subdivide_mesh(&icosahedron_with_radius(radius), &params)
        .with_context(|| format!("failed to subdivide {levels} levels"))?;
    info!("{result}");

    Ok(result.into_mesh())
}

/// `generate`: write the mesh to `output`.
pub fn generate(
    sphere: SphereArgs,
    method: SubdivisionMethod,
    output: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let format = MeshFormat::from_path(output).with_context(|| {
        format!(
            "cannot tell the format of {} (expected .obj or .stl)",
            output.display()
        )
    })?;

    let mesh = build(sphere, method)?;
    save_mesh(&mesh, output).with_context(|| format!("failed to write {}", output.display()))?;

    writeln!(
        out,
        "Wrote {} ({}): {} vertices, {} triangles",
        output.display(),
        format,
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    Ok(())
}

/// `report`: print the sphere report. Returns whether the sphere is valid.
pub fn report(sphere: SphereArgs, tolerance: f64, out: &mut impl Write) -> Result<bool> {
    ensure!(
        tolerance.is_finite() && tolerance >= 0.0,
        "tolerance must be a non-negative number, got {tolerance}"
    );

    let mesh = build(sphere, SubdivisionMethod::Spherical)?;
    let report = sphere_report(&mesh, sphere.radius, tolerance);

    writeln!(
        out,
        "Icosphere: {} levels, radius {}",
        sphere.levels, sphere.radius
    )?;
    writeln!(out)?;
    write!(out, "{report}")?;
    writeln!(out)?;

    let valid = report.is_valid_sphere();
    if valid {
        writeln!(out, "{}", "PASS".green().bold())?;
    } else {
        writeln!(out, "{}", "FAIL".red().bold())?;
    }
    Ok(valid)
}

/// `buffers`: print buffer sizes and the attribute layout.
pub fn buffers(sphere: SphereArgs, shading: ShadingMode, out: &mut impl Write) -> Result<()> {
    let mesh = build(sphere, SubdivisionMethod::Spherical)?;
    let buffers =
        RenderBuffers::from_mesh(&mesh, shading).context("failed to build render buffers")?;

    writeln!(out, "Render buffers ({shading:?} shading):")?;
    writeln!(out, "  Vertices:  {}", buffers.vertex_count())?;
    writeln!(out, "  Triangles: {}", buffers.triangle_count())?;
    writeln!(out, "  Indices:   {}", buffers.indices.len())?;
    writeln!(out, "  Position bytes: {}", buffers.position_bytes().len())?;
    writeln!(out, "  Normal bytes:   {}", buffers.normal_bytes().len())?;
    writeln!(out, "  Index bytes:    {}", buffers.index_bytes().len())?;
    writeln!(out, "  Total bytes:    {}", buffers.total_bytes())?;
    writeln!(out)?;
    writeln!(out, "  Interleaved stride: {} bytes", RenderVertex::stride())?;
    for (name, attr) in ["position", "normal"].iter().zip(RenderVertex::ATTRIBUTES) {
        writeln!(
            out,
            "    slot {}: {name} ({} x f32, offset {})",
            attr.slot, attr.components, attr.offset
        )?;
    }

    Ok(())
}
