use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

fn main() {
    println!("cargo::rerun-if-changed=assets");

    let assets = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    let mut files = Vec::new();
    collect(&assets, "", &mut files);
    files.sort();

    let mut out = String::from("pub static ASSETS: &[Asset] = &[\n");
    for (route, path) in &files {
        writeln!(
            out,
            "    Asset {{ path: {route:?}, content_type: {:?}, content: ::core::include_bytes!({path:?}) }},",
            content_type(path),
        )
        .unwrap();
    }
    out.push_str("];\n");

    let out_path = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("assets.rs");
    std::fs::write(&out_path, out).unwrap();
    println!("cargo::rustc-env=ASSETS={}", out_path.display());
}

fn collect(dir: &Path, prefix: &str, files: &mut Vec<(String, PathBuf)>) {
    for entry in dir.read_dir().unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().into_string().unwrap();
        if name.starts_with('.') {
            continue;
        }

        let route = format!("{prefix}/{name}");
        let file_type = entry.file_type().unwrap();
        if file_type.is_dir() {
            collect(&entry.path(), &route, files);
        } else if file_type.is_file() {
            files.push((route, entry.path()));
        }
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
