use std::fs;
use std::path::Path;

const FRONTEND_DIST: &str = "../frontend/dist";
const STATIC_DIR: &str = "static";

/// Replaces `static/dist` with the trunk build of the frontend, if one exists.
fn embed_frontend(dist: &Path, target: &Path) -> fs_extra::error::Result<()> {
    let embedded = target.join("dist");
    if embedded.exists() {
        fs::remove_dir_all(&embedded)?;
    }
    fs::create_dir_all(target)?;
    fs_extra::dir::copy(dist, target, &fs_extra::dir::CopyOptions::new().overwrite(true))?;
    Ok(())
}

fn main() {
    let dist = Path::new(FRONTEND_DIST);
    if dist.join("index.html").exists() {
        if let Err(e) = embed_frontend(dist, Path::new(STATIC_DIR)) {
            panic!("failed to embed {}: {}", FRONTEND_DIST, e);
        }
    } else {
        println!(
            "cargo:warning={} has no index.html; embedding the placeholder page",
            FRONTEND_DIST
        );
    }
    println!("cargo:rerun-if-changed={}", FRONTEND_DIST);
}
