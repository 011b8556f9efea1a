use anyhow::{bail, Context, Result};
use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use terrain_engine::{BakeConfig, Baker};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    out_dir: PathBuf,
    mesh: bool,
}

const USAGE: &str = "usage: terrain_bake [CONFIG.ron] [--out DIR] [--no-mesh]";

fn parse_args() -> Result<Args> {
    let mut args = Args { out_dir: PathBuf::from("."), mesh: true, ..Args::default() };
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let dir = it.next().context("--out needs a directory")?;
                args.out_dir = PathBuf::from(dir);
            }
            "--no-mesh" => args.mesh = false,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with('-') => bail!("unknown flag {other}\n{USAGE}"),
            path => {
                if args.config.is_some() {
                    bail!("only one config file may be given\n{USAGE}");
                }
                args.config = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => BakeConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            info!("No config given, using the default background scene");
            BakeConfig::default()
        }
    };

    let baker = Baker::new(config);
    let bake = baker.bake()?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let texture_path = args.out_dir.join("texture.png");
    bake.texture.save(&texture_path)
        .with_context(|| format!("writing {}", texture_path.display()))?;
    info!("Wrote {}", texture_path.display());

    let height_path = args.out_dir.join("heightmap.png");
    bake.heightmap.to_gray_image().save(&height_path)
        .with_context(|| format!("writing {}", height_path.display()))?;
    info!("Wrote {}", height_path.display());

    if args.mesh {
        match bake.mesh(&baker.config) {
            Ok(mesh) => {
                let obj_path = args.out_dir.join("terrain.obj");
                let file = File::create(&obj_path)
                    .with_context(|| format!("creating {}", obj_path.display()))?;
                mesh.write_obj(BufWriter::new(file))
                    .with_context(|| format!("writing {}", obj_path.display()))?;
                info!("Wrote {} ({} triangles)", obj_path.display(), mesh.triangle_count());
            }
            Err(e) => warn!("Skipping mesh export: {e}"),
        }
    }

    Ok(())
}
