use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../migrations");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap(); // "debug" or "release"

    // OUT_DIR is target/<profile>/build/backend-xxx/out; files go to target/<profile>
    let out_path = Path::new(&out_dir);
    let target_dir = out_path
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .expect("Could not find target profile directory");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root");

    let source_config = workspace_root.join("config.toml");
    let dest_config = target_dir.join("config.toml");
    if source_config.exists() {
        fs::copy(&source_config, &dest_config)
            .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
        println!("cargo:warning=Copied config.toml to {:?}", dest_config);
    } else {
        println!(
            "cargo:warning=config.toml not found at {:?}, using default config",
            source_config
        );
    }

    let source_migrations = workspace_root.join("migrations");
    let dest_migrations = target_dir.join("migrations");
    if source_migrations.is_dir() {
        fs::create_dir_all(&dest_migrations)
            .unwrap_or_else(|e| panic!("Failed to create migrations dir: {}", e));
        for entry in fs::read_dir(&source_migrations).expect("Failed to read migrations") {
            let path = entry.expect("Failed to read migration entry").path();
            if path.extension().map_or(false, |ext| ext == "sql") {
                if let Some(name) = path.file_name() {
                    fs::copy(&path, dest_migrations.join(name))
                        .unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", path, e));
                }
            }
        }
    }
}
