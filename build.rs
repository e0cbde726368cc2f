use dotenv::dotenv;
use std::env;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use toml::Value;

struct AppMetadata {
    file: std::fs::File,
}

impl AppMetadata {
    pub fn new() -> io::Result<Self> {
        let out_dir = env::var("OUT_DIR").unwrap();
        let dest_path = Path::new(&out_dir).join("app_metadata.rs");
        let file = File::create(&dest_path)?;
        Ok(Self { file })
    }

    pub fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        write!(
            self.file,
            "#[allow(unused)]\npub const APP_METADATA_{}: &str = {:?};\n",
            &key.to_uppercase(),
            &value
        )
    }
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=AVATASK_BACKEND_URL");

    // Load .env file if it exists
    let _ = dotenv();

    let cargo_toml = fs::read_to_string("Cargo.toml").expect("Failed to read Cargo.toml");
    let cargo_toml: Value = toml::from_str(&cargo_toml).expect("Failed to parse Cargo.toml");

    let mut app_metadata = AppMetadata::new()?;
    app_metadata.write("NAME", &env::var("CARGO_PKG_NAME").unwrap())?;
    app_metadata.write("VERSION", &env::var("CARGO_PKG_VERSION").unwrap())?;

    let mut default_backend_url = String::from("http://localhost:8001");
    if let Some(metadata) = cargo_toml.get("package").and_then(|pkg| pkg.get("metadata")).and_then(|meta| meta.as_table()) {
        for (key, value) in metadata {
            if let Some(value) = value.as_str() {
                if key == "default_backend_url" {
                    default_backend_url = value.to_string();
                    continue;
                }
                app_metadata.write(key, value)?;
            }
        }
    }

    // A backend URL from the build environment is baked in as the default
    let backend_url = match env::var("AVATASK_BACKEND_URL") {
        Ok(url) if !url.trim().is_empty() => url,
        _ => {
            println!("cargo:warning=AVATASK_BACKEND_URL not found in environment, using {}", default_backend_url);
            default_backend_url
        }
    };
    app_metadata.write("DEFAULT_BACKEND_URL", &backend_url)?;

    Ok(())
}
